use serde::Serialize;

/// Unified error type for the addressing and scheduling core.
/// Resolution and lookup failures are returned to the immediate caller; nothing
/// in the core retries them or logs them away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PathError {
    #[error("position {position} is outside the corpus (0..{total})")]
    OutOfRangePosition { position: i64, total: u32 },

    #[error("unknown section name: {0}")]
    UnknownSectionName(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("JSON error: {0}")]
    Json(String),
}

impl PathError {
    pub fn out_of_range(position: impl Into<i64>, total: u32) -> Self {
        PathError::OutOfRangePosition {
            position: position.into(),
            total,
        }
    }

    pub fn io<P: AsRef<std::path::Path>>(path: P, err: std::io::Error) -> Self {
        PathError::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Stage of the pipeline that produced the error.
    pub fn stage(&self) -> &'static str {
        match self {
            PathError::OutOfRangePosition { .. } => "resolve",
            PathError::UnknownSectionName(_) => "catalog_lookup",
            PathError::InvalidCatalog(_) => "catalog_load",
            PathError::InvalidDate(_) => "calendar",
            PathError::Config { .. } => "config",
            PathError::Io { .. } => "io",
            PathError::Json(_) => "json_parse",
        }
    }

    /// Out-of-range positions are a normal "nothing scheduled" outcome for
    /// planners; only direct lookups surface them.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, PathError::OutOfRangePosition { .. })
    }
}

impl From<serde_json::Error> for PathError {
    fn from(err: serde_json::Error) -> Self {
        PathError::Json(err.to_string())
    }
}

impl From<toml::de::Error> for PathError {
    fn from(err: toml::de::Error) -> Self {
        PathError::Config {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PathError>;
