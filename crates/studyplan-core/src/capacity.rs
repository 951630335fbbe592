//! Weekly study-time budget.
//!
//! A [`CapacityProfile`] holds one minute budget per weekday. Slots are
//! indexed by [`Weekday::num_days_from_sunday`], so lookups can never miss
//! or typo a day name.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Weekdays in the order study days are activated by
/// [`CapacityProfile::from_weekly_preferences`].
pub const PRIORITY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Per-weekday study-minutes budget, Sunday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapacityProfile {
    minutes: [u32; 7],
}

impl CapacityProfile {
    /// Profile with every weekday at zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a Sunday-first array of minute budgets.
    pub fn from_minutes(minutes: [u32; 7]) -> Self {
        Self { minutes }
    }

    /// Derive a profile from "N days per week, M minutes per day".
    ///
    /// The first `days_per_week` entries of [`PRIORITY_ORDER`] are active,
    /// every other weekday gets zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `days_per_week` exceeds 7.
    pub fn from_weekly_preferences(
        days_per_week: u8,
        minutes_per_day: u32,
    ) -> Result<Self, ConfigError> {
        if days_per_week > 7 {
            return Err(ConfigError::InvalidValue {
                key: "days_per_week".to_string(),
                message: format!("{days_per_week} is more than the 7 days in a week"),
            });
        }

        Ok(PRIORITY_ORDER
            .iter()
            .take(days_per_week as usize)
            .fold(Self::empty(), |profile, &day| {
                profile.with_minutes(day, minutes_per_day)
            }))
    }

    /// Return a copy with one weekday's budget replaced.
    pub fn with_minutes(mut self, weekday: Weekday, minutes: u32) -> Self {
        self.minutes[weekday.num_days_from_sunday() as usize] = minutes;
        self
    }

    /// Minute budget for a weekday.
    pub fn minutes_for(&self, weekday: Weekday) -> u32 {
        self.minutes[weekday.num_days_from_sunday() as usize]
    }

    /// Whether the weekday has any study time at all.
    pub fn is_active(&self, weekday: Weekday) -> bool {
        self.minutes_for(weekday) > 0
    }

    /// Weekdays with a non-zero budget, Monday first.
    pub fn active_weekdays(&self) -> Vec<Weekday> {
        PRIORITY_ORDER
            .iter()
            .copied()
            .filter(|&day| self.is_active(day))
            .collect()
    }

    /// First active weekday in Monday-first order.
    pub fn first_active_weekday(&self) -> Option<Weekday> {
        PRIORITY_ORDER.iter().copied().find(|&day| self.is_active(day))
    }

    /// Largest single-day budget.
    pub fn max_daily_minutes(&self) -> u32 {
        self.minutes.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all seven budgets.
    pub fn weekly_minutes(&self) -> u64 {
        self.minutes.iter().map(|&m| u64::from(m)).sum()
    }

    /// True when no weekday has any study time.
    pub fn is_empty(&self) -> bool {
        self.minutes.iter().all(|&m| m == 0)
    }
}
