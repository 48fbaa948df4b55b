use chrono::NaiveDate;

use mishnah_path_lib::calendar::{parse_date, CalendarGate, HolidayCalendar, ScheduleKind};
use mishnah_path_lib::catalog::mishnah;
use mishnah_path_lib::config::ScheduleConfig;
use mishnah_path_lib::pace::PacePolicy;
use mishnah_path_lib::planner::estimate::completion_estimate;
use mishnah_path_lib::planner::{cursor_on, plan_days, plan_horizon, PlanReport};

fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn weekdays() -> CalendarGate {
    CalendarGate::new(ScheduleKind::WeekdaysOnly)
}

#[test]
fn test_two_per_day_over_three_days() {
    // 2024-01-01 is a Monday.
    let refs = plan_horizon(
        mishnah(),
        0,
        date("2024-01-01"),
        3,
        &PacePolicy::FixedCount(2),
        &weekdays(),
    );
    assert_eq!(
        refs,
        vec![
            "Mishnah_Berakhot.1.1",
            "Mishnah_Berakhot.1.2",
            "Mishnah_Berakhot.1.3",
            "Mishnah_Berakhot.1.4",
            "Mishnah_Berakhot.1.5",
            "Mishnah_Berakhot.2.1",
        ]
    );
}

#[test]
fn test_rest_day_is_skipped() {
    let days = plan_days(
        mishnah(),
        0,
        date("2024-01-05"),
        2,
        &PacePolicy::FixedCount(1),
        &weekdays(),
    );
    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date("2024-01-05"), date("2024-01-07")]);
    assert_eq!(days[1].positions, vec![1]);
    assert_eq!(days[1].references, vec!["Mishnah_Berakhot.1.2"]);
}

#[test]
fn test_skip_friday_option() {
    let config = ScheduleConfig {
        skip_friday: true,
        ..ScheduleConfig::default()
    };
    let gate = CalendarGate::from_config(&config);
    let days = plan_days(mishnah(), 0, date("2024-01-05"), 2, &PacePolicy::FixedCount(1), &gate);
    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date("2024-01-07"), date("2024-01-08")]);
}

#[test]
fn test_finished_user_gets_empty_plan() {
    let catalog = mishnah();
    let refs = plan_horizon(
        catalog,
        catalog.total_items(),
        date("2024-01-01"),
        14,
        &PacePolicy::FixedCount(2),
        &weekdays(),
    );
    assert!(refs.is_empty());

    let chapters = plan_horizon(
        catalog,
        catalog.total_chapters(),
        date("2024-01-01"),
        14,
        &PacePolicy::ChapterPerDay,
        &weekdays(),
    );
    assert!(chapters.is_empty());
}

#[test]
fn test_plan_stops_at_corpus_end() {
    let days = plan_days(
        mishnah(),
        4504,
        date("2024-01-01"),
        5,
        &PacePolicy::FixedCount(2),
        &weekdays(),
    );
    assert_eq!(days.len(), 1);
    assert_eq!(
        days[0].references,
        vec!["Mishnah_Uktzin.3.3", "Mishnah_Uktzin.3.4"]
    );
}

#[test]
fn test_chapter_per_day_plan() {
    let refs = plan_horizon(
        mishnah(),
        0,
        date("2024-01-01"),
        2,
        &PacePolicy::ChapterPerDay,
        &weekdays(),
    );
    assert_eq!(refs.len(), 13);
    assert_eq!(refs.first().map(String::as_str), Some("Mishnah_Berakhot.1.1"));
    assert_eq!(refs.last().map(String::as_str), Some("Mishnah_Berakhot.2.8"));
}

#[test]
fn test_plan_is_idempotent() {
    let policy = PacePolicy::AverageRate { items_per_day: 4 };
    let first = plan_horizon(mishnah(), 450, date("2024-03-01"), 10, &policy, &weekdays());
    let second = plan_horizon(mishnah(), 450, date("2024-03-01"), 10, &policy, &weekdays());
    assert_eq!(first, second);
    assert_eq!(first.len(), 40);
}

#[test]
fn test_zero_horizon() {
    let days = plan_days(
        mishnah(),
        0,
        date("2024-01-01"),
        0,
        &PacePolicy::FixedCount(2),
        &weekdays(),
    );
    assert!(days.is_empty());
}

struct Closed;

impl HolidayCalendar for Closed {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        true
    }
}

#[test]
fn test_calendar_that_admits_nothing_terminates() {
    let gate = CalendarGate::new(ScheduleKind::Daily).with_holidays(Closed);
    let days = plan_days(mishnah(), 0, date("2024-01-01"), 3, &PacePolicy::FixedCount(1), &gate);
    assert!(days.is_empty());
}

#[test]
fn test_plan_report() {
    let catalog = mishnah();
    let policy = PacePolicy::FixedCount(2);
    let report = PlanReport::build(catalog, 0, date("2024-01-01"), 3, &policy, &weekdays());
    assert_eq!(report.next_cursor, 6);
    assert!(!report.completed);
    assert_eq!(report.days.len(), 3);
    assert_eq!(report.references.len(), 6);
    assert_eq!(report.catalog_fingerprint, catalog.fingerprint());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["start_date"], "2024-01-01");
    assert_eq!(json["days"][2]["date"], "2024-01-03");

    let tail = PlanReport::build(catalog, 4504, date("2024-01-01"), 3, &policy, &weekdays());
    assert!(tail.completed);
    assert_eq!(tail.next_cursor, 4506);
}

#[test]
fn test_cursor_on() {
    let catalog = mishnah();
    let gate = weekdays();
    let start = date("2024-01-01");

    // Jan 1..=7 holds six study days.
    assert_eq!(cursor_on(catalog, &PacePolicy::FixedCount(2), &gate, start, date("2024-01-08")), 12);
    assert_eq!(cursor_on(catalog, &PacePolicy::ChapterPerDay, &gate, start, date("2024-01-08")), 6);
    assert_eq!(cursor_on(catalog, &PacePolicy::FixedCount(2), &gate, start, start), 0);
    assert_eq!(cursor_on(catalog, &PacePolicy::FixedCount(2), &gate, start, date("2023-12-01")), 0);

    let consumed: usize = plan_days(catalog, 0, start, 6, &PacePolicy::FixedCount(2), &gate)
        .iter()
        .map(|d| d.positions.len())
        .sum();
    assert_eq!(consumed, 12);
}

#[test]
fn test_completion_estimate() {
    let catalog = mishnah();
    let gate = weekdays();

    let full = completion_estimate(catalog, &PacePolicy::FixedCount(2), &gate, 0, date("2024-01-01"));
    assert_eq!(full.study_days, 2253);
    assert_eq!(full.remaining, 4506);
    assert_eq!(full.finish_date, Some(date("2031-03-12")));

    let seder = completion_estimate(
        catalog,
        &PacePolicy::AverageRate { items_per_day: 4 },
        &gate,
        0,
        date("2024-01-01"),
    );
    assert_eq!(seder.study_days, 1127);

    let chapters = completion_estimate(catalog, &PacePolicy::ChapterPerDay, &gate, 520, date("2024-01-01"));
    assert_eq!(chapters.study_days, 5);
    assert_eq!(chapters.remaining, 5);

    let done = completion_estimate(catalog, &PacePolicy::FixedCount(2), &gate, 4506, date("2024-01-01"));
    assert_eq!(done.study_days, 0);
    assert_eq!(done.finish_date, None);
}

#[test]
fn test_logging_init_is_repeatable() {
    mishnah_path_lib::logging::init_logging();
    mishnah_path_lib::logging::init_logging();
    let refs = plan_horizon(mishnah(), 0, date("2024-01-01"), 1, &PacePolicy::FixedCount(1), &weekdays());
    assert_eq!(refs, vec!["Mishnah_Berakhot.1.1"]);
}
