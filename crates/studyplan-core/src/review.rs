//! SM-2 spaced-repetition review scheduling.
//!
//! Each flashcard carries an easiness factor, an interval and a repetition
//! count. A review grade updates all three and yields the next due date:
//! - Hard (quality 1) sends the card back to daily review
//! - Medium (quality 3) and Easy (quality 5) advance it: 1 day, then 6 days,
//!   then the previous interval times the new easiness
//! - Easiness is floored at 1.3 and has no ceiling
//!
//! Cards with fewer than two successful reviews in a row are in the
//! *learning* regime; the rest are *mature*.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Lowest easiness a card can reach.
pub const MIN_EASINESS: f64 = 1.3;

/// Easiness of a freshly created card.
pub const INITIAL_EASINESS: f64 = 2.5;

/// Interval after the first successful review.
const FIRST_INTERVAL_DAYS: i64 = 1;

/// Interval after the second successful review.
const SECOND_INTERVAL_DAYS: i64 = 6;

/// Recall grade given by the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Hard,
    Medium,
    Easy,
}

impl Grade {
    /// SM-2 quality on the 1..=5 scale.
    pub fn quality(self) -> u8 {
        match self {
            Grade::Hard => 1,
            Grade::Medium => 3,
            Grade::Easy => 5,
        }
    }

    /// Whether this grade resets the card.
    pub fn is_lapse(self) -> bool {
        self.quality() < 3
    }
}

impl TryFrom<u8> for Grade {
    type Error = ReviewError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Grade::Hard),
            1 => Ok(Grade::Medium),
            2 => Ok(Grade::Easy),
            other => Err(ReviewError::InvalidGrade(other)),
        }
    }
}

/// Learning stage of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Zero or one successful review in a row, short fixed intervals
    Learning,
    /// Two or more, intervals grow by the easiness factor
    Mature,
}

/// Review state of one flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewCardState {
    pub easiness: f64,
    pub interval_days: i64,
    pub repetitions: i64,
    pub next_due: NaiveDate,
}

impl ReviewCardState {
    /// State of a card created on `created_on`, due the next day.
    pub fn new_card(created_on: NaiveDate) -> Self {
        Self {
            easiness: INITIAL_EASINESS,
            interval_days: FIRST_INTERVAL_DAYS,
            repetitions: 0,
            next_due: created_on + Duration::days(FIRST_INTERVAL_DAYS),
        }
    }

    /// Check the state before it is fed to the scheduler.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: interval below one day, negative
    /// repetitions, or easiness below [`MIN_EASINESS`] (or not finite).
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.interval_days < 1 {
            return Err(ReviewError::InvalidInterval(self.interval_days));
        }
        if self.repetitions < 0 {
            return Err(ReviewError::InvalidRepetitions(self.repetitions));
        }
        if !self.easiness.is_finite() || self.easiness < MIN_EASINESS {
            return Err(ReviewError::InvalidEasiness {
                value: self.easiness,
                floor: MIN_EASINESS,
            });
        }
        Ok(())
    }

    pub fn is_due(&self, on: NaiveDate) -> bool {
        self.next_due <= on
    }

    pub fn regime(&self) -> Regime {
        if self.repetitions >= 2 {
            Regime::Mature
        } else {
            Regime::Learning
        }
    }
}

/// Audit record of one review, for callers that keep a history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub reviewed_on: NaiveDate,
    pub grade: Grade,
    /// Repetition count after the review.
    pub repetitions: i64,
    pub previous_interval_days: i64,
    pub new_interval_days: i64,
    pub previous_easiness: f64,
    pub new_easiness: f64,
}

/// Updated state plus the audit record describing the change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub state: ReviewCardState,
    pub event: ReviewEvent,
}

/// SM-2 review calculator. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewScheduler;

impl ReviewScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Apply one review to `state`, graded on `reviewed_on`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReviewError`] when `state` fails [`ReviewCardState::validate`],
    /// or [`ReviewError::IntervalOverflow`] when the next due date would fall
    /// outside the representable calendar.
    pub fn review(
        &self,
        state: &ReviewCardState,
        grade: Grade,
        reviewed_on: NaiveDate,
    ) -> Result<ReviewOutcome, ReviewError> {
        state.validate()?;

        let easiness = next_easiness(state.easiness, grade.quality());
        let (interval_days, repetitions) = if grade.is_lapse() {
            (FIRST_INTERVAL_DAYS, 0)
        } else {
            let repetitions = state.repetitions + 1;
            let interval = match repetitions {
                1 => FIRST_INTERVAL_DAYS,
                2 => SECOND_INTERVAL_DAYS,
                _ => (state.interval_days as f64 * easiness).round() as i64,
            };
            (interval, repetitions)
        };

        tracing::debug!(
            "Reviewed card as {:?}: interval {} -> {} day(s), easiness {:.2} -> {:.2}",
            grade,
            state.interval_days,
            interval_days,
            state.easiness,
            easiness
        );

        let next = ReviewCardState {
            easiness,
            interval_days,
            repetitions,
            next_due: due_after(reviewed_on, interval_days)?,
        };
        Ok(ReviewOutcome {
            state: next,
            event: ReviewEvent {
                reviewed_on,
                grade,
                repetitions,
                previous_interval_days: state.interval_days,
                new_interval_days: interval_days,
                previous_easiness: state.easiness,
                new_easiness: easiness,
            },
        })
    }

    /// Review with a raw 0/1/2 grade.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::InvalidGrade`] for values above 2, otherwise as
    /// [`ReviewScheduler::review`].
    pub fn review_raw(
        &self,
        state: &ReviewCardState,
        grade: u8,
        reviewed_on: NaiveDate,
    ) -> Result<ReviewOutcome, ReviewError> {
        self.review(state, Grade::try_from(grade)?, reviewed_on)
    }

    /// Cards due on `on`, earliest due date first. Ties keep input order.
    pub fn due_cards<'a, T>(
        &self,
        cards: &'a [T],
        on: NaiveDate,
        state_of: impl Fn(&T) -> &ReviewCardState,
    ) -> Vec<&'a T> {
        let mut due: Vec<&T> = cards.iter().filter(|c| state_of(*c).is_due(on)).collect();
        due.sort_by_key(|c| state_of(*c).next_due);
        due
    }
}

/// `on` plus `days`, or an error past the end of the calendar.
fn due_after(on: NaiveDate, days: i64) -> Result<NaiveDate, ReviewError> {
    Duration::try_days(days)
        .and_then(|delta| on.checked_add_signed(delta))
        .ok_or(ReviewError::IntervalOverflow(days))
}

/// SM-2 easiness update, floored at [`MIN_EASINESS`].
fn next_easiness(easiness: f64, quality: u8) -> f64 {
    let miss = 5.0 - f64::from(quality);
    (easiness + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASINESS)
}
