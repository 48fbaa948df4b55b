#[cfg(not(target_arch = "wasm32"))]
pub mod store;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarGate, HolidayCalendar};
use crate::catalog::Catalog;
use crate::config::ScheduleConfig;
use crate::error::Result;
use crate::pace::{PaceKind, PacePolicy};
use crate::resolver::{checked_position, GlobalPosition};
use crate::review::{ReviewIntensity, ReviewSchedule};

/// A user's progress record, read as plain values. Nothing here writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPositionState {
    pub current_position: i64,
    pub path_start_date: NaiveDate,
    #[serde(alias = "pace_policy")]
    pub pace: PaceKind,
    #[serde(default)]
    pub review_intensity: ReviewIntensity,
}

impl UserPositionState {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn policy(&self, catalog: &Catalog, config: &ScheduleConfig) -> Result<PacePolicy> {
        PacePolicy::from_kind(self.pace, catalog, config)
    }

    /// Cursor to plan from. A stored position equal to the corpus size means
    /// the user has finished; anything else out of range is rejected.
    pub fn start_cursor(&self, catalog: &Catalog, policy: &PacePolicy) -> Result<u32> {
        if self.current_position == catalog.total_items() as i64 {
            return Ok(policy.cursor_limit(catalog));
        }
        let position = checked_position(catalog, self.current_position)?;
        Ok(policy.cursor_for_position(catalog, position))
    }

    /// Number of items already learned, i.e. the stored position itself.
    pub fn learned_count(&self, catalog: &Catalog) -> Result<GlobalPosition> {
        if self.current_position == catalog.total_items() as i64 {
            return Ok(catalog.total_items());
        }
        checked_position(catalog, self.current_position)
    }

    pub fn review_schedule<'a, H: HolidayCalendar>(
        &self,
        catalog: &'a Catalog,
        policy: PacePolicy,
        gate: &'a CalendarGate<H>,
    ) -> ReviewSchedule<'a, H> {
        ReviewSchedule::new(catalog, policy, gate, self.path_start_date, self.review_intensity)
    }
}
