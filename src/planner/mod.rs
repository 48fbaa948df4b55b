pub mod estimate;

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{CalendarGate, HolidayCalendar, MAX_IDLE_DAYS};
use crate::catalog::Catalog;
use crate::pace::PacePolicy;
use crate::resolver::{content_ref, GlobalPosition};

/// One admitted study day of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyDay {
    pub date: NaiveDate,
    pub positions: Vec<GlobalPosition>,
    pub references: Vec<String>,
}

/// Serializable result of one planning call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub catalog_fingerprint: String,
    pub policy: PacePolicy,
    pub start_cursor: u32,
    pub start_date: NaiveDate,
    pub next_cursor: u32,
    /// True once the plan has consumed the last item of the corpus.
    pub completed: bool,
    pub days: Vec<StudyDay>,
    pub references: Vec<String>,
}

impl PlanReport {
    pub fn build<H: HolidayCalendar>(
        catalog: &Catalog,
        start_cursor: u32,
        start_date: NaiveDate,
        horizon_days: u32,
        policy: &PacePolicy,
        gate: &CalendarGate<H>,
    ) -> Self {
        let (days, next_cursor) =
            walk(catalog, start_cursor, start_date, horizon_days, policy, gate);
        let references = dedup_references(&days);

        PlanReport {
            catalog_fingerprint: catalog.fingerprint(),
            policy: *policy,
            start_cursor,
            start_date,
            next_cursor,
            completed: policy.is_exhausted(catalog, next_cursor),
            days,
            references,
        }
    }
}

/// Walk calendar days from `start_date`, consuming one pace step on every
/// admitted day, until `horizon_days` study days are planned or the corpus
/// runs out.
pub fn plan_days<H: HolidayCalendar>(
    catalog: &Catalog,
    start_cursor: u32,
    start_date: NaiveDate,
    horizon_days: u32,
    policy: &PacePolicy,
    gate: &CalendarGate<H>,
) -> Vec<StudyDay> {
    walk(catalog, start_cursor, start_date, horizon_days, policy, gate).0
}

/// References due over the horizon, deduplicated in first-seen order.
///
/// A start cursor at or past the end of the corpus yields an empty plan.
pub fn plan_horizon<H: HolidayCalendar>(
    catalog: &Catalog,
    start_cursor: u32,
    start_date: NaiveDate,
    horizon_days: u32,
    policy: &PacePolicy,
    gate: &CalendarGate<H>,
) -> Vec<String> {
    let days = plan_days(catalog, start_cursor, start_date, horizon_days, policy, gate);
    dedup_references(&days)
}

/// Cursor reached at the start of `date` by someone who began at cursor 0
/// on `path_start` and completed every admitted day since.
pub fn cursor_on<H: HolidayCalendar>(
    catalog: &Catalog,
    policy: &PacePolicy,
    gate: &CalendarGate<H>,
    path_start: NaiveDate,
    date: NaiveDate,
) -> u32 {
    let Some(last_day) = date.pred_opt() else {
        return 0;
    };
    if last_day < path_start {
        return 0;
    }

    let studied = gate.count_study_days(path_start, last_day);
    let mut cursor = 0;
    for _ in 0..studied {
        let step = policy.advance(catalog, cursor);
        if step.is_empty() {
            break;
        }
        cursor = step.next;
    }
    cursor
}

fn walk<H: HolidayCalendar>(
    catalog: &Catalog,
    start_cursor: u32,
    start_date: NaiveDate,
    horizon_days: u32,
    policy: &PacePolicy,
    gate: &CalendarGate<H>,
) -> (Vec<StudyDay>, u32) {
    let mut days = Vec::new();
    let mut cursor = start_cursor;
    let mut date = start_date;
    let mut idle: u32 = 0;

    if policy.is_exhausted(catalog, cursor) {
        tracing::debug!(cursor, "Start cursor is past the corpus, nothing to plan");
        return (days, cursor);
    }

    while (days.len() as u32) < horizon_days {
        if gate.is_study_day(date) {
            idle = 0;
            let step = policy.advance(catalog, cursor);
            if step.is_empty() {
                break;
            }
            let references = step
                .positions
                .iter()
                .filter_map(|&p| content_ref(catalog, p).ok())
                .collect();
            days.push(StudyDay {
                date,
                positions: step.positions,
                references,
            });
            cursor = step.next;
        } else {
            idle += 1;
            if idle >= MAX_IDLE_DAYS {
                tracing::debug!(date = %date, idle, "Calendar admitted no day in scan window, stopping plan");
                break;
            }
        }

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    tracing::debug!(
        start_cursor,
        next_cursor = cursor,
        planned_days = days.len(),
        "Plan computed"
    );
    (days, cursor)
}

fn dedup_references(days: &[StudyDay]) -> Vec<String> {
    let mut seen = HashSet::new();
    days.iter()
        .flat_map(|d| d.references.iter())
        .filter(|r| seen.insert(*r))
        .cloned()
        .collect()
}
