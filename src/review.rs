//! Spaced review of learned items.
//!
//! An item is learned on the study day its pace reaches it. It comes back
//! for review a fixed number of calendar days later, moved forward to the
//! next study day when that date is not one.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, CalendarGate, HolidayCalendar, NoHolidays};
use crate::catalog::Catalog;
use crate::error::{PathError, Result};
use crate::pace::PacePolicy;
use crate::planner::plan_days;
use crate::resolver::{resolve, GlobalPosition, ItemSummary};

/// Review settings as stored on user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewIntensity {
    #[default]
    None,
    Light,
    Medium,
    Intensive,
}

impl ReviewIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewIntensity::None => "none",
            ReviewIntensity::Light => "light",
            ReviewIntensity::Medium => "medium",
            ReviewIntensity::Intensive => "intensive",
        }
    }

    /// Calendar days after learning, ascending.
    pub fn intervals(&self) -> &'static [u32] {
        match self {
            ReviewIntensity::None => &[],
            ReviewIntensity::Light => &[7, 30],
            ReviewIntensity::Medium => &[3, 7, 30],
            ReviewIntensity::Intensive => &[1, 3, 7, 14, 30],
        }
    }
}

impl std::str::FromStr for ReviewIntensity {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "none" => Ok(ReviewIntensity::None),
            "light" => Ok(ReviewIntensity::Light),
            "medium" => Ok(ReviewIntensity::Medium),
            "intensive" => Ok(ReviewIntensity::Intensive),
            other => Err(PathError::Config {
                message: format!("unknown review intensity '{}'", other),
            }),
        }
    }
}

/// One item coming back for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub learned_on: NaiveDate,
    /// The interval that produced this review.
    pub interval: u32,
    pub due: NaiveDate,
}

/// The item a path reaches next and the day it unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledItem {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub unlock_date: Option<NaiveDate>,
}

/// Date on which a path started on `path_start` reaches `position`.
///
/// `None` when the calendar stops admitting days first.
pub fn unlock_date<H: HolidayCalendar>(
    catalog: &Catalog,
    policy: &PacePolicy,
    gate: &CalendarGate<H>,
    path_start: NaiveDate,
    position: GlobalPosition,
) -> Option<NaiveDate> {
    gate.add_study_days(path_start, policy.day_index(catalog, position))
}

/// `learned_on + interval` calendar days, moved to the next study day.
pub fn review_date<H: HolidayCalendar>(
    gate: &CalendarGate<H>,
    learned_on: NaiveDate,
    interval: u32,
) -> Option<NaiveDate> {
    gate.next_study_day(add_days(learned_on, interval as i64))
}

/// Review schedule for one study track.
#[derive(Debug, Clone)]
pub struct ReviewSchedule<'a, H = NoHolidays> {
    pub catalog: &'a Catalog,
    pub policy: PacePolicy,
    pub gate: &'a CalendarGate<H>,
    pub path_start: NaiveDate,
    pub intensity: ReviewIntensity,
}

impl<'a, H: HolidayCalendar> ReviewSchedule<'a, H> {
    pub fn new(
        catalog: &'a Catalog,
        policy: PacePolicy,
        gate: &'a CalendarGate<H>,
        path_start: NaiveDate,
        intensity: ReviewIntensity,
    ) -> Self {
        ReviewSchedule {
            catalog,
            policy,
            gate,
            path_start,
            intensity,
        }
    }

    /// Learn date of every position below `completed`, in order.
    pub fn learned(&self, completed: GlobalPosition) -> Vec<(GlobalPosition, NaiveDate)> {
        let completed = completed.min(self.catalog.total_items());
        if completed == 0 {
            return Vec::new();
        }
        let horizon = self.policy.day_index(self.catalog, completed - 1) + 1;
        plan_days(self.catalog, 0, self.path_start, horizon, &self.policy, self.gate)
            .into_iter()
            .flat_map(|day| {
                let date = day.date;
                day.positions.into_iter().map(move |p| (p, date))
            })
            .take_while(|(p, _)| *p < completed)
            .collect()
    }

    /// Reviews falling in `from..until`, keyed by due date.
    ///
    /// An item appears at most once per date; when two intervals land on
    /// the same day the shorter one is kept.
    pub fn reviews_between(
        &self,
        completed: GlobalPosition,
        from: NaiveDate,
        until: NaiveDate,
    ) -> BTreeMap<NaiveDate, Vec<ReviewItem>> {
        let mut by_date: BTreeMap<NaiveDate, Vec<ReviewItem>> = BTreeMap::new();
        let intervals = self.intensity.intervals();
        if intervals.is_empty() || from >= until {
            return by_date;
        }

        for (position, learned_on) in self.learned(completed) {
            for &interval in intervals {
                let due = match review_date(self.gate, learned_on, interval) {
                    Some(due) if due >= from && due < until => due,
                    _ => continue,
                };
                let entries = by_date.entry(due).or_default();
                if entries.iter().any(|r| r.item.position == position) {
                    continue;
                }
                let Ok(item) = resolve(self.catalog, position) else {
                    continue;
                };
                entries.push(ReviewItem {
                    item: item.summary(),
                    learned_on,
                    interval,
                    due,
                });
            }
        }

        tracing::debug!(
            intensity = self.intensity.as_str(),
            completed,
            dates = by_date.len(),
            "Computed review window"
        );
        by_date
    }

    /// Reviews over `days` calendar days starting at `from`.
    pub fn reviews_by_date(
        &self,
        completed: GlobalPosition,
        from: NaiveDate,
        days: u32,
    ) -> BTreeMap<NaiveDate, Vec<ReviewItem>> {
        self.reviews_between(completed, from, add_days(from, days as i64))
    }

    /// Reviews due on `date`, one per item.
    pub fn reviews_due(&self, completed: GlobalPosition, date: NaiveDate) -> Vec<ReviewItem> {
        self.reviews_between(completed, date, add_days(date, 1))
            .remove(&date)
            .unwrap_or_default()
    }

    /// The item at `current` with its unlock date; `None` once the corpus is done.
    pub fn todays_content(&self, current: GlobalPosition) -> Option<ScheduledItem> {
        let item = resolve(self.catalog, current).ok()?;
        Some(ScheduledItem {
            item: item.summary(),
            unlock_date: unlock_date(
                self.catalog,
                &self.policy,
                self.gate,
                self.path_start,
                current,
            ),
        })
    }
}
