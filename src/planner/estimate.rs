use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{CalendarGate, HolidayCalendar};
use crate::catalog::Catalog;
use crate::pace::PacePolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionEstimate {
    /// Admitted study days still needed to finish the corpus.
    pub study_days: u32,
    /// Last study day of the path, `None` when nothing remains or the
    /// calendar never admits enough days.
    pub finish_date: Option<NaiveDate>,
    /// Remaining cursor units (items, or chapters for chapter pace).
    pub remaining: u32,
}

pub fn completion_estimate<H: HolidayCalendar>(
    catalog: &Catalog,
    policy: &PacePolicy,
    gate: &CalendarGate<H>,
    start_cursor: u32,
    start_date: NaiveDate,
) -> CompletionEstimate {
    let remaining = policy
        .cursor_limit(catalog)
        .saturating_sub(start_cursor);

    let mut study_days: u32 = 0;
    let mut cursor = start_cursor;
    loop {
        let step = policy.advance(catalog, cursor);
        if step.is_empty() {
            break;
        }
        cursor = step.next;
        study_days += 1;
    }

    let finish_date = match study_days {
        0 => None,
        n => gate.add_study_days(start_date, n - 1),
    };

    CompletionEstimate {
        study_days,
        finish_date,
        remaining,
    }
}
