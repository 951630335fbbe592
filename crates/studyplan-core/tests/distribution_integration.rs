//! Integration tests for goal distribution and rescheduling.
//!
//! These tests run the full caller workflow: build a capacity profile from
//! weekly preferences, distribute a study plan, then relocate an item using
//! the committed schedule.

use chrono::{Duration, NaiveDate, Weekday};
use studyplan_core::{
    intensity, CapacityProfile, Commitment, CoreError, EngineConfig, GoalDistributor, PlanError,
    RescheduleFinder, StudyItem,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2024-01-01 is a Monday
fn monday() -> NaiveDate {
    date(2024, 1, 1)
}

fn item(id: &str, minutes: u32) -> StudyItem {
    StudyItem::new(id)
        .with_subject("math")
        .with_duration(intensity::FAST, minutes / 2)
        .with_duration(intensity::NORMAL, minutes)
        .with_duration(intensity::THOROUGH, minutes * 2)
}

#[test]
fn test_five_days_four_hours_scenario() {
    let capacity = CapacityProfile::from_weekly_preferences(5, 240).unwrap();
    let items = vec![item("A", 90), item("B", 90), item("C", 90), item("D", 90)];

    let plan = GoalDistributor::new()
        .distribute(&items, &capacity, monday(), intensity::NORMAL)
        .unwrap();

    let layout: Vec<(NaiveDate, Vec<&str>)> = plan
        .days
        .iter()
        .map(|d| (d.date, d.items.iter().map(|p| p.item.id.as_str()).collect()))
        .collect();
    assert_eq!(
        layout,
        vec![
            (monday(), vec!["A", "B"]),
            (date(2024, 1, 2), vec!["C", "D"]),
        ]
    );
    assert_eq!(plan.days[0].weekday_label, "Monday");
    assert_eq!(plan.stats.total_minutes, 360);
}

#[test]
fn test_intensity_changes_layout() {
    let capacity = CapacityProfile::from_weekly_preferences(5, 240).unwrap();
    let items = vec![item("A", 90), item("B", 90), item("C", 90), item("D", 90)];
    let distributor = GoalDistributor::new();

    let fast = distributor
        .distribute(&items, &capacity, monday(), intensity::FAST)
        .unwrap();
    let thorough = distributor
        .distribute(&items, &capacity, monday(), intensity::THOROUGH)
        .unwrap();

    assert_eq!(fast.stats.day_count, 1);
    assert_eq!(fast.stats.total_minutes, 180);
    assert_eq!(thorough.stats.day_count, 4);
    assert_eq!(thorough.stats.last_date, Some(date(2024, 1, 4)));
}

#[test]
fn test_distribution_feeds_reschedule() {
    let capacity = CapacityProfile::from_weekly_preferences(5, 240).unwrap();
    let items: Vec<StudyItem> = (0..10).map(|i| item(&format!("goal-{i}"), 120)).collect();

    let plan = GoalDistributor::new()
        .distribute(&items, &capacity, monday(), intensity::NORMAL)
        .unwrap();
    assert_eq!(plan.stats.day_count, 5);
    assert_eq!(plan.stats.last_date, Some(date(2024, 1, 5)));

    // Every weekday of the first week is full, so the next slot is Monday week two
    let target = RescheduleFinder::new()
        .find_next_free_day(&plan.commitments(), &capacity, monday())
        .unwrap();
    assert_eq!(target.date, date(2024, 1, 8));
    assert_eq!(target.minutes_free, 240);
    assert!(!target.fallback);
}

#[test]
fn test_reschedule_falls_back_to_next_monday() {
    let capacity = CapacityProfile::empty().with_minutes(Weekday::Mon, 120);
    let commitments: Vec<Commitment> = (0..12)
        .map(|week| Commitment::new(monday() + Duration::weeks(week), 120))
        .collect();

    let result = RescheduleFinder::new()
        .find_next_free_day(&commitments, &capacity, date(2024, 1, 4))
        .unwrap();

    assert!(result.fallback);
    assert_eq!(result.date, date(2024, 1, 8));
    assert_eq!(result.minutes_free, 0);
}

#[test]
fn test_config_drives_both_searches() {
    let config = EngineConfig::from_toml_str(
        r#"
        [distribution]
        default_item_minutes = 30
        max_calendar_days = 2

        [reschedule]
        horizon_days = 3
        min_free_minutes = 10
        "#,
    )
    .unwrap();

    let capacity = CapacityProfile::from_weekly_preferences(7, 60).unwrap();
    let items: Vec<StudyItem> = ["a", "b", "c", "d", "e"].iter().map(|id| StudyItem::new(*id)).collect();

    let err = GoalDistributor::with_config(config.distribution)
        .distribute(&items, &capacity, monday(), intensity::NORMAL)
        .unwrap_err();
    assert_eq!(
        err,
        PlanError::CeilingReached {
            days_walked: 2,
            unplaced: vec!["e".to_string()],
        }
    );

    let commitments = vec![
        Commitment::new(date(2024, 1, 2), 55),
        Commitment::new(date(2024, 1, 3), 50),
    ];
    let result = RescheduleFinder::with_config(config.reschedule)
        .find_next_free_day(&commitments, &capacity, monday())
        .unwrap();
    assert_eq!(result.date, date(2024, 1, 3));
    assert_eq!(result.minutes_free, 10);
}

#[test]
fn test_errors_surface_as_core_error() {
    fn plan(items: &[StudyItem]) -> studyplan_core::Result<usize> {
        let capacity = CapacityProfile::from_weekly_preferences(3, 60)?;
        let plan = GoalDistributor::new().distribute(items, &capacity, monday(), intensity::NORMAL)?;
        Ok(plan.stats.day_count)
    }

    assert_eq!(plan(&[item("ok", 60)]).unwrap(), 1);
    let err = plan(&[item("too-long", 61)]).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Plan(PlanError::ItemsExceedCapacity { ref items, .. }) if items == &["too-long".to_string()]
    ));
}
