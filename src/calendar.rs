use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::schedule::ScheduleConfig;
use crate::error::{PathError, Result};

/// Longest run of rejected days any scan will walk before giving up.
pub const MAX_IDLE_DAYS: u32 = 366;

/// Which days a track is scheduled on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleKind {
    /// Every day except the weekly rest day.
    #[default]
    #[serde(rename = "DAILY_WEEKDAYS_ONLY", alias = "weekdays_only")]
    WeekdaysOnly,
    /// Every day.
    #[serde(rename = "DAILY", alias = "daily")]
    Daily,
}

/// Hook for excluding holidays from the study calendar.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Holiday exclusion is not implemented: no date is ever a holiday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Caller-supplied dates to skip. Nothing here computes which dates those are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedDates(BTreeSet<NaiveDate>);

impl ExcludedDates {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        ExcludedDates(dates.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl HolidayCalendar for ExcludedDates {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }
}

/// Decides whether a date counts toward scheduling at all.
#[derive(Debug, Clone)]
pub struct CalendarGate<H = NoHolidays> {
    pub schedule: ScheduleKind,
    pub rest_day: Weekday,
    pub skip_friday: bool,
    holidays: H,
}

impl Default for CalendarGate<NoHolidays> {
    fn default() -> Self {
        CalendarGate::new(ScheduleKind::default())
    }
}

impl CalendarGate<NoHolidays> {
    pub fn new(schedule: ScheduleKind) -> Self {
        CalendarGate {
            schedule,
            rest_day: Weekday::Sat,
            skip_friday: false,
            holidays: NoHolidays,
        }
    }

    pub fn from_config(config: &ScheduleConfig) -> Self {
        CalendarGate {
            schedule: config.schedule,
            rest_day: config.rest_day,
            skip_friday: config.skip_friday,
            holidays: NoHolidays,
        }
    }
}

impl<H: HolidayCalendar> CalendarGate<H> {
    pub fn with_holidays<H2: HolidayCalendar>(self, holidays: H2) -> CalendarGate<H2> {
        CalendarGate {
            schedule: self.schedule,
            rest_day: self.rest_day,
            skip_friday: self.skip_friday,
            holidays,
        }
    }

    pub fn is_study_day(&self, date: NaiveDate) -> bool {
        if self.schedule == ScheduleKind::WeekdaysOnly {
            let weekday = date.weekday();
            if weekday == self.rest_day {
                return false;
            }
            if self.skip_friday && weekday == Weekday::Fri {
                return false;
            }
        }
        !self.holidays.is_holiday(date)
    }

    /// `date` itself when it is a study day, otherwise the next one.
    pub fn next_study_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        (0..=MAX_IDLE_DAYS as i64)
            .map(|offset| add_days(date, offset))
            .find(|d| self.is_study_day(*d))
    }

    /// Study days in `start..=end`.
    pub fn count_study_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_study_day(*d))
            .count() as u32
    }

    /// Move to the first study day on or after `start`, then forward by
    /// `study_days` further study days.
    pub fn add_study_days(&self, start: NaiveDate, study_days: u32) -> Option<NaiveDate> {
        let mut current = self.next_study_day(start)?;
        for _ in 0..study_days {
            current = self.next_study_day(add_days(current, 1))?;
        }
        Some(current)
    }
}

/// Scheduled-day check with the default rest day and no holiday exclusion.
pub fn is_study_day(date: NaiveDate, schedule: ScheduleKind) -> bool {
    CalendarGate::new(schedule).is_study_day(date)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse `YYYY-MM-DD` as a calendar date (UTC midnight, no time zone).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| PathError::InvalidDate(value.to_string()))
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
