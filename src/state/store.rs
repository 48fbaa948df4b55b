use std::path::Path;

use crate::error::{PathError, Result};
use crate::state::UserPositionState;

/// Load a user position record asynchronously. A missing file is `Ok(None)`.
pub async fn load_state(path: &Path) -> Result<Option<UserPositionState>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let state = UserPositionState::from_json(&content)?;
            tracing::debug!(path = ?path, position = state.current_position, "Loaded user state");
            Ok(Some(state))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PathError::io(path, e)),
    }
}

