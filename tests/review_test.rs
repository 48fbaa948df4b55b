use chrono::NaiveDate;

use mishnah_path_lib::calendar::{parse_date, CalendarGate, ScheduleKind};
use mishnah_path_lib::catalog::mishnah;
use mishnah_path_lib::config::ScheduleConfig;
use mishnah_path_lib::pace::PacePolicy;
use mishnah_path_lib::review::{review_date, unlock_date, ReviewIntensity, ReviewSchedule};
use mishnah_path_lib::state::UserPositionState;

fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn weekdays() -> CalendarGate {
    CalendarGate::new(ScheduleKind::WeekdaysOnly)
}

fn positions(reviews: &[mishnah_path_lib::review::ReviewItem]) -> Vec<u32> {
    reviews.iter().map(|r| r.item.position).collect()
}

#[test]
fn test_intervals_by_intensity() {
    assert!(ReviewIntensity::None.intervals().is_empty());
    assert_eq!(ReviewIntensity::Light.intervals(), &[7, 30]);
    assert_eq!(ReviewIntensity::Medium.intervals(), &[3, 7, 30]);
    assert_eq!(ReviewIntensity::Intensive.intervals(), &[1, 3, 7, 14, 30]);
    assert_eq!(ReviewIntensity::default(), ReviewIntensity::None);
}

#[test]
fn test_intensity_names() {
    assert_eq!("intensive".parse::<ReviewIntensity>().unwrap(), ReviewIntensity::Intensive);
    assert_eq!(ReviewIntensity::Medium.as_str(), "medium");
    assert_eq!(serde_json::to_string(&ReviewIntensity::Light).unwrap(), "\"light\"");

    let err = "weekly".parse::<ReviewIntensity>().unwrap_err();
    assert_eq!(err.stage(), "config");
}

#[test]
fn test_review_date_moves_past_rest_day() {
    let gate = weekdays();
    // Friday + 1 is Saturday, so the review lands on Sunday.
    assert_eq!(review_date(&gate, date("2024-01-05"), 1), Some(date("2024-01-07")));
    assert_eq!(review_date(&gate, date("2024-01-01"), 7), Some(date("2024-01-08")));
}

#[test]
fn test_learned_dates_follow_pace_and_calendar() {
    let catalog = mishnah();
    let gate = weekdays();
    let schedule = ReviewSchedule::new(
        catalog,
        PacePolicy::FixedCount(2),
        &gate,
        date("2024-01-01"),
        ReviewIntensity::Light,
    );

    let learned = schedule.learned(12);
    assert_eq!(learned.len(), 12);
    assert_eq!(learned[0], (0, date("2024-01-01")));
    assert_eq!(learned[9], (9, date("2024-01-05")));
    // Saturday is skipped.
    assert_eq!(learned[10], (10, date("2024-01-07")));
    assert!(schedule.learned(0).is_empty());

    let chapters = ReviewSchedule::new(
        catalog,
        PacePolicy::ChapterPerDay,
        &gate,
        date("2024-01-01"),
        ReviewIntensity::Light,
    );
    let learned = chapters.learned(7);
    assert_eq!(learned.len(), 7);
    assert_eq!(learned[4], (4, date("2024-01-01")));
    assert_eq!(learned[6], (6, date("2024-01-02")));
}

#[test]
fn test_unlock_date_agrees_with_plan() {
    let catalog = mishnah();
    let gate = weekdays();
    let start = date("2024-01-01");

    for policy in [
        PacePolicy::AverageRate { items_per_day: 4 },
        PacePolicy::ChapterPerDay,
    ] {
        let schedule = ReviewSchedule::new(catalog, policy, &gate, start, ReviewIntensity::Light);
        for (position, learned_on) in schedule.learned(400) {
            assert_eq!(
                unlock_date(catalog, &policy, &gate, start, position),
                Some(learned_on),
                "position {} under {:?}",
                position,
                policy
            );
        }
    }

    // Berakhot chapter 3 opens at position 13, the third study day.
    assert_eq!(
        unlock_date(catalog, &PacePolicy::ChapterPerDay, &gate, start, 13),
        Some(date("2024-01-03"))
    );
}

#[test]
fn test_reviews_due_light() {
    let catalog = mishnah();
    let gate = weekdays();
    let schedule = ReviewSchedule::new(
        catalog,
        PacePolicy::FixedCount(2),
        &gate,
        date("2024-01-01"),
        ReviewIntensity::Light,
    );

    let due = schedule.reviews_due(12, date("2024-01-08"));
    assert_eq!(positions(&due), vec![0, 1]);
    assert_eq!(due[0].interval, 7);
    assert_eq!(due[0].learned_on, date("2024-01-01"));
    assert_eq!(due[0].item.reference, "Mishnah_Berakhot.1.1");

    // Items not yet learned never come back.
    assert!(schedule.reviews_due(0, date("2024-01-08")).is_empty());
    assert_eq!(positions(&schedule.reviews_due(1, date("2024-01-08"))), vec![0]);
}

#[test]
fn test_snapped_reviews_share_a_day() {
    let catalog = mishnah();
    let gate = weekdays();
    let schedule = ReviewSchedule::new(
        catalog,
        PacePolicy::FixedCount(2),
        &gate,
        date("2024-01-01"),
        ReviewIntensity::Intensive,
    );

    // Wednesday + 3 and Friday + 1 both fall on Saturday and move to Sunday;
    // Thursday + 3 is Sunday already.
    let due = schedule.reviews_due(12, date("2024-01-07"));
    assert_eq!(positions(&due), vec![4, 5, 6, 7, 8, 9]);
    let intervals: Vec<u32> = due.iter().map(|r| r.interval).collect();
    assert_eq!(intervals, vec![3, 3, 3, 3, 1, 1]);
    assert!(due.iter().all(|r| r.due == date("2024-01-07")));
}

#[test]
fn test_one_review_per_item_per_day() {
    let catalog = mishnah();
    let config = ScheduleConfig {
        skip_friday: true,
        ..ScheduleConfig::default()
    };
    let gate = CalendarGate::from_config(&config);
    let schedule = ReviewSchedule::new(
        catalog,
        PacePolicy::FixedCount(1),
        &gate,
        date("2024-01-01"),
        ReviewIntensity::Intensive,
    );

    // Thursday + 1 and Thursday + 3 both resolve to Sunday.
    let due = schedule.reviews_due(4, date("2024-01-07"));
    assert_eq!(positions(&due), vec![1, 2, 3]);
    let thursday = due.iter().find(|r| r.item.position == 3).unwrap();
    assert_eq!(thursday.learned_on, date("2024-01-04"));
    assert_eq!(thursday.interval, 1);
}

#[test]
fn test_reviews_by_date_window() {
    let catalog = mishnah();
    let gate = weekdays();
    let schedule = ReviewSchedule::new(
        catalog,
        PacePolicy::FixedCount(2),
        &gate,
        date("2024-01-01"),
        ReviewIntensity::Light,
    );

    let window = schedule.reviews_by_date(12, date("2024-01-01"), 14);
    let dates: Vec<NaiveDate> = window.keys().copied().collect();
    assert_eq!(
        dates,
        vec![
            date("2024-01-08"),
            date("2024-01-09"),
            date("2024-01-10"),
            date("2024-01-11"),
            date("2024-01-12"),
            date("2024-01-14"),
        ]
    );
    assert_eq!(window.values().map(Vec::len).sum::<usize>(), 12);
    assert_eq!(positions(&window[&date("2024-01-14")]), vec![10, 11]);

    assert!(schedule.reviews_by_date(12, date("2024-01-01"), 0).is_empty());

    let json = serde_json::to_value(&window).unwrap();
    assert_eq!(json["2024-01-08"][1]["reference"], "Mishnah_Berakhot.1.2");
    assert_eq!(json["2024-01-08"][1]["due"], "2024-01-08");
}

#[test]
fn test_no_reviews_without_intensity() {
    let catalog = mishnah();
    let gate = weekdays();
    let schedule = ReviewSchedule::new(
        catalog,
        PacePolicy::FixedCount(2),
        &gate,
        date("2024-01-01"),
        ReviewIntensity::None,
    );
    assert!(schedule.reviews_due(12, date("2024-01-08")).is_empty());
    assert!(schedule.reviews_by_date(4506, date("2024-01-01"), 365).is_empty());
}

#[test]
fn test_todays_content() {
    let catalog = mishnah();
    let gate = weekdays();
    let schedule = ReviewSchedule::new(
        catalog,
        PacePolicy::FixedCount(2),
        &gate,
        date("2024-01-01"),
        ReviewIntensity::Light,
    );

    let today = schedule.todays_content(12).unwrap();
    assert_eq!(today.item.reference, "Mishnah_Berakhot.2.8");
    assert_eq!(today.unlock_date, Some(date("2024-01-08")));
    assert!(schedule.todays_content(4506).is_none());
}

#[test]
fn test_schedule_from_user_record() {
    let catalog = mishnah();
    let config = ScheduleConfig::default();
    let gate = CalendarGate::from_config(&config);
    let state = UserPositionState::from_json(
        r#"{"current_position": 12, "path_start_date": "2024-01-01", "pace": "two_mishna", "review_intensity": "light"}"#,
    )
    .unwrap();

    let policy = state.policy(catalog, &config).unwrap();
    let schedule = state.review_schedule(catalog, policy, &gate);
    let learned = state.learned_count(catalog).unwrap();
    assert_eq!(positions(&schedule.reviews_due(learned, date("2024-01-09"))), vec![2, 3]);
}
