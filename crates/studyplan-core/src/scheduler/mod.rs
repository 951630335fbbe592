//! Goal distribution onto the study calendar.
//!
//! This module places an ordered list of study items onto calendar days:
//! - Walks days forward starting on the start date itself
//! - Skips weekdays whose budget is zero
//! - Packs each day strictly first-in-first-out until the next item overflows
//! - Never splits an item and never reorders the queue
//!
//! The [`reschedule`] submodule answers the follow-up question of where a
//! single item can be moved once a schedule is committed.

pub mod reschedule;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::capacity::{weekday_label, CapacityProfile};
use crate::config::DistributionConfig;
use crate::error::PlanError;
use crate::item::StudyItem;
use reschedule::Commitment;

/// A study item together with the minutes it was scheduled for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item: StudyItem,
    pub minutes: u32,
}

/// One calendar day of a computed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub weekday_label: String,
    pub items: Vec<PlacedItem>,
    pub minutes_used: u32,
    pub minutes_free: u32,
}

impl ScheduledDay {
    fn new(date: NaiveDate, budget: u32, items: Vec<PlacedItem>) -> Self {
        let minutes_used: u32 = items.iter().map(|p| p.minutes).sum();
        let weekday = date.weekday();
        Self {
            date,
            weekday,
            weekday_label: weekday_label(weekday).to_string(),
            items,
            minutes_used,
            minutes_free: budget - minutes_used,
        }
    }

    /// Budget of the weekday this day was packed against.
    pub fn capacity(&self) -> u32 {
        self.minutes_used.saturating_add(self.minutes_free)
    }
}

/// Summary of a distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub item_count: usize,
    pub day_count: usize,
    pub total_minutes: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// A complete schedule: every input item placed, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub days: Vec<ScheduledDay>,
    pub stats: DistributionStats,
}

impl Distribution {
    fn from_days(days: Vec<ScheduledDay>) -> Self {
        let stats = DistributionStats {
            item_count: days.iter().map(|d| d.items.len()).sum(),
            day_count: days.len(),
            total_minutes: days.iter().map(|d| u64::from(d.minutes_used)).sum(),
            first_date: days.first().map(|d| d.date),
            last_date: days.last().map(|d| d.date),
        };
        Self { days, stats }
    }

    /// True when nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Placed items across all days, in date order.
    pub fn placed_items(&self) -> impl Iterator<Item = &PlacedItem> {
        self.days.iter().flat_map(|d| d.items.iter())
    }

    /// Day on which the given item was placed.
    pub fn day_of(&self, item_id: &str) -> Option<&ScheduledDay> {
        self.days
            .iter()
            .find(|d| d.items.iter().any(|p| p.item.id == item_id))
    }

    /// Per-day committed minutes, the input shape of the reschedule finder.
    pub fn commitments(&self) -> Vec<Commitment> {
        self.days
            .iter()
            .map(|d| Commitment::new(d.date, d.minutes_used))
            .collect()
    }
}

/// Greedy FIFO distributor of study items.
#[derive(Debug, Clone, Default)]
pub struct GoalDistributor {
    config: DistributionConfig,
}

impl GoalDistributor {
    /// Create a distributor with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: DistributionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    /// Place `items` onto days starting on `start_date`.
    ///
    /// # Arguments
    /// * `items` - Ordered study items; the order is preserved in the output
    /// * `capacity` - Weekly minute budget
    /// * `start_date` - First day that may receive items
    /// * `intensity` - Duration profile key, see [`crate::item::intensity`]
    ///
    /// # Errors
    ///
    /// An empty item list is not an error and yields an empty schedule.
    /// Returns [`PlanError::NoActiveWeekday`] for an all-zero profile,
    /// [`PlanError::ItemsExceedCapacity`] when some item is longer than every
    /// daily budget, and [`PlanError::CeilingReached`] when the calendar
    /// ceiling or the last representable date passes with items still queued.
    pub fn distribute(
        &self,
        items: &[StudyItem],
        capacity: &CapacityProfile,
        start_date: NaiveDate,
        intensity: &str,
    ) -> Result<Distribution, PlanError> {
        tracing::debug!(
            "Distributing {} item(s) from {} with intensity '{}'",
            items.len(),
            start_date,
            intensity
        );

        if items.is_empty() {
            return Ok(Distribution::default());
        }
        if capacity.is_empty() {
            tracing::warn!("Cannot distribute: capacity profile has no active weekday");
            return Err(PlanError::NoActiveWeekday);
        }

        let queue: Vec<PlacedItem> = items
            .iter()
            .map(|item| PlacedItem {
                minutes: item.duration_for(intensity, self.config.default_item_minutes),
                item: item.clone(),
            })
            .collect();

        let max_daily_minutes = capacity.max_daily_minutes();
        let oversized: Vec<String> = queue
            .iter()
            .filter(|p| p.minutes > max_daily_minutes)
            .map(|p| p.item.id.clone())
            .collect();
        if !oversized.is_empty() {
            tracing::warn!(
                "Cannot distribute: {} item(s) exceed {} min",
                oversized.len(),
                max_daily_minutes
            );
            return Err(PlanError::ItemsExceedCapacity {
                max_daily_minutes,
                items: oversized,
            });
        }

        let (days, unplaced) = start_date
            .iter_days()
            .take(self.config.max_calendar_days as usize)
            .fold((Vec::new(), queue.as_slice()), |(mut days, remaining), date| {
                match pack_day(date, remaining, capacity) {
                    Some((day, rest)) => {
                        days.push(day);
                        (days, rest)
                    }
                    None => (days, remaining),
                }
            });

        if !unplaced.is_empty() {
            // Shorter than the ceiling when the walk ran into the end of the calendar
            let days_walked = start_date
                .iter_days()
                .take(self.config.max_calendar_days as usize)
                .count() as u32;
            tracing::warn!(
                "Stopped after {} calendar day(s) with {} item(s) unplaced",
                days_walked,
                unplaced.len()
            );
            return Err(PlanError::CeilingReached {
                days_walked,
                unplaced: unplaced.iter().map(|p| p.item.id.clone()).collect(),
            });
        }

        let distribution = Distribution::from_days(days);
        tracing::info!(
            "Distributed {} item(s) ({} min) over {} day(s)",
            distribution.stats.item_count,
            distribution.stats.total_minutes,
            distribution.stats.day_count
        );
        Ok(distribution)
    }
}

/// Pack the head of `queue` into `date`. `None` when nothing is placed.
fn pack_day<'a>(
    date: NaiveDate,
    queue: &'a [PlacedItem],
    capacity: &CapacityProfile,
) -> Option<(ScheduledDay, &'a [PlacedItem])> {
    let budget = capacity.minutes_for(date.weekday());
    if budget == 0 || queue.is_empty() {
        return None;
    }

    let fitting = fitting_prefix(queue, budget);
    if fitting == 0 {
        return None;
    }

    let (placed, rest) = queue.split_at(fitting);
    tracing::debug!("Packed {} item(s) into {} ({} min budget)", fitting, date, budget);
    Some((ScheduledDay::new(date, budget, placed.to_vec()), rest))
}

/// Length of the longest queue prefix whose total fits in `budget`.
fn fitting_prefix(queue: &[PlacedItem], budget: u32) -> usize {
    queue
        .iter()
        .scan(0u64, |used, p| {
            *used += u64::from(p.minutes);
            (*used <= u64::from(budget)).then_some(())
        })
        .count()
}
