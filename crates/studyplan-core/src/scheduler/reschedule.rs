//! Look-ahead search for a day that can absorb one more study item.
//!
//! Unlike distribution, the search starts the day *after* the reference date
//! and walks a shorter horizon. When no day within the horizon has enough
//! free time, the finder still answers: it returns the next occurrence of the
//! first active weekday, however full that day already is.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::capacity::CapacityProfile;
use crate::config::RescheduleConfig;
use crate::error::PlanError;

/// Minutes already committed on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    pub date: NaiveDate,
    pub minutes_used: u32,
}

impl Commitment {
    pub fn new(date: NaiveDate, minutes_used: u32) -> Self {
        Self { date, minutes_used }
    }
}

/// Where to move an item, and how much room is left there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleResult {
    pub date: NaiveDate,
    /// Capacity minus committed minutes. Negative only on the fallback path.
    pub minutes_free: i64,
    /// True when the horizon was exhausted and the next active weekday was
    /// returned without checking the threshold.
    pub fallback: bool,
}

/// Finder for the next day with spare study time.
#[derive(Debug, Clone, Default)]
pub struct RescheduleFinder {
    config: RescheduleConfig,
}

impl RescheduleFinder {
    /// Create a finder with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: RescheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RescheduleConfig {
        &self.config
    }

    /// Find the earliest day after `from_date` with at least the configured
    /// free-minute threshold.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoActiveWeekday`] when the profile has no study
    /// day at all, since not even the fallback can produce a date, and
    /// [`PlanError::CalendarExhausted`] when the fallback date would lie past
    /// the last representable date.
    pub fn find_next_free_day(
        &self,
        commitments: &[Commitment],
        capacity: &CapacityProfile,
        from_date: NaiveDate,
    ) -> Result<RescheduleResult, PlanError> {
        self.find_with_threshold(
            commitments,
            capacity,
            from_date,
            self.config.min_free_minutes,
        )
    }

    /// Same as [`RescheduleFinder::find_next_free_day`] with an explicit threshold.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoActiveWeekday`] for an all-zero profile and
    /// [`PlanError::CalendarExhausted`] at the end of the calendar.
    pub fn find_with_threshold(
        &self,
        commitments: &[Commitment],
        capacity: &CapacityProfile,
        from_date: NaiveDate,
        min_free_minutes: u32,
    ) -> Result<RescheduleResult, PlanError> {
        let fallback_weekday = capacity
            .first_active_weekday()
            .ok_or(PlanError::NoActiveWeekday)?;

        let committed = committed_by_date(commitments);
        let free_on = |date: NaiveDate| -> i64 {
            let used = committed.get(&date).copied().unwrap_or(0);
            i64::from(capacity.minutes_for(date.weekday())) - used as i64
        };

        tracing::debug!(
            "Searching {} day(s) after {} for {} free min",
            self.config.horizon_days,
            from_date,
            min_free_minutes
        );

        let found = from_date
            .iter_days()
            .skip(1)
            .take(self.config.horizon_days as usize)
            .filter(|date| capacity.is_active(date.weekday()))
            .map(|date| (date, free_on(date)))
            .find(|&(_, free)| free >= i64::from(min_free_minutes));

        if let Some((date, minutes_free)) = found {
            return Ok(RescheduleResult {
                date,
                minutes_free,
                fallback: false,
            });
        }

        let date = next_weekday_after(from_date, fallback_weekday)
            .ok_or(PlanError::CalendarExhausted { from: from_date })?;
        let minutes_free = free_on(date);
        tracing::warn!(
            "No day within {} day(s) of {} has {} free min; falling back to {} ({} min free)",
            self.config.horizon_days,
            from_date,
            min_free_minutes,
            date,
            minutes_free
        );
        Ok(RescheduleResult {
            date,
            minutes_free,
            fallback: true,
        })
    }
}

/// Total committed minutes per calendar date.
fn committed_by_date(commitments: &[Commitment]) -> BTreeMap<NaiveDate, u64> {
    commitments
        .iter()
        .fold(BTreeMap::new(), |mut totals, c| {
            *totals.entry(c.date).or_insert(0) += u64::from(c.minutes_used);
            totals
        })
}

/// Next date strictly after `from` that falls on `weekday`, if the calendar has one.
fn next_weekday_after(from: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let ahead = (weekday.num_days_from_monday() + 7 - from.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    from.checked_add_signed(Duration::days(i64::from(ahead)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-01-01 is a Monday
    fn monday() -> NaiveDate {
        date(2024, 1, 1)
    }

    fn weekdays_only(minutes: u32) -> CapacityProfile {
        CapacityProfile::from_weekly_preferences(5, minutes).unwrap()
    }

    #[test]
    fn test_starts_strictly_after_reference_date() {
        let result = RescheduleFinder::new()
            .find_next_free_day(&[], &weekdays_only(120), monday())
            .unwrap();
        assert_eq!(result.date, date(2024, 1, 2));
        assert_eq!(result.minutes_free, 120);
        assert!(!result.fallback);
    }

    #[test]
    fn test_skips_full_days() {
        let commitments = vec![
            Commitment::new(date(2024, 1, 2), 100),
            Commitment::new(date(2024, 1, 3), 60),
            Commitment::new(date(2024, 1, 3), 40),
            Commitment::new(date(2024, 1, 4), 95),
        ];
        let result = RescheduleFinder::new()
            .find_next_free_day(&commitments, &weekdays_only(120), monday())
            .unwrap();

        // Tue has 20, Wed has 20 after aggregation, Thu has 25
        assert_eq!(result.date, date(2024, 1, 5));
        assert_eq!(result.minutes_free, 120);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let commitments = vec![Commitment::new(date(2024, 1, 2), 90)];
        let result = RescheduleFinder::new()
            .find_next_free_day(&commitments, &weekdays_only(120), monday())
            .unwrap();
        assert_eq!(result.date, date(2024, 1, 2));
        assert_eq!(result.minutes_free, 30);
    }

    #[test]
    fn test_skips_zero_capacity_weekdays() {
        // Friday 2024-01-05 -> Saturday and Sunday are off
        let result = RescheduleFinder::new()
            .find_next_free_day(&[], &weekdays_only(60), date(2024, 1, 5))
            .unwrap();
        assert_eq!(result.date, date(2024, 1, 8));
    }

    #[test]
    fn test_explicit_threshold() {
        let commitments = vec![Commitment::new(date(2024, 1, 2), 60)];
        let result = RescheduleFinder::new()
            .find_with_threshold(&commitments, &weekdays_only(120), monday(), 61)
            .unwrap();
        assert_eq!(result.date, date(2024, 1, 3));
    }

    #[test]
    fn test_fallback_to_next_monday_when_booked() {
        let capacity = CapacityProfile::empty().with_minutes(Weekday::Mon, 60);
        let commitments: Vec<Commitment> = (0..20)
            .map(|week| Commitment::new(monday() + Duration::weeks(week), 50))
            .collect();

        // Wednesday reference date
        let result = RescheduleFinder::new()
            .find_next_free_day(&commitments, &capacity, date(2024, 1, 3))
            .unwrap();

        assert!(result.fallback);
        assert_eq!(result.date, date(2024, 1, 8));
        assert_eq!(result.minutes_free, 10);
    }

    #[test]
    fn test_fallback_ignores_free_days_beyond_horizon() {
        let capacity = CapacityProfile::empty().with_minutes(Weekday::Mon, 60);
        let finder = RescheduleFinder::with_config(RescheduleConfig {
            horizon_days: 7,
            ..RescheduleConfig::default()
        });
        let commitments = vec![Commitment::new(date(2024, 1, 8), 90)];

        let result = finder
            .find_next_free_day(&commitments, &capacity, monday())
            .unwrap();

        assert!(result.fallback);
        assert_eq!(result.date, date(2024, 1, 8));
        assert_eq!(result.minutes_free, -30);
    }

    #[test]
    fn test_all_zero_profile_is_error() {
        let err = RescheduleFinder::new()
            .find_next_free_day(&[], &CapacityProfile::empty(), monday())
            .unwrap_err();
        assert_eq!(err, PlanError::NoActiveWeekday);
    }

    #[test]
    fn test_next_weekday_after_is_strict() {
        assert_eq!(next_weekday_after(monday(), Weekday::Mon), Some(date(2024, 1, 8)));
        assert_eq!(next_weekday_after(monday(), Weekday::Tue), Some(date(2024, 1, 2)));
        assert_eq!(next_weekday_after(date(2024, 1, 7), Weekday::Mon), Some(date(2024, 1, 8)));
        assert_eq!(next_weekday_after(NaiveDate::MAX, Weekday::Mon), None);
    }

    #[test]
    fn test_last_calendar_date_is_error() {
        let capacity = CapacityProfile::empty().with_minutes(Weekday::Mon, 60);
        let err = RescheduleFinder::new()
            .find_next_free_day(&[], &capacity, NaiveDate::MAX)
            .unwrap_err();
        assert_eq!(err, PlanError::CalendarExhausted { from: NaiveDate::MAX });
    }

    #[test]
    fn test_near_calendar_end_still_answers() {
        let capacity = CapacityProfile::from_weekly_preferences(7, 60).unwrap();
        let from = NaiveDate::MAX - Duration::days(2);
        let result = RescheduleFinder::new()
            .find_next_free_day(&[], &capacity, from)
            .unwrap();
        assert_eq!(result.date, from + Duration::days(1));
        assert!(!result.fallback);
    }
}
