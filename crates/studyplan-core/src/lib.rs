//! # Studyplan Core Library
//!
//! This library provides the scheduling engine behind a study planner. It is
//! a pure, deterministic function of its inputs: it performs no I/O and owns
//! no durable state, so the caller persists whatever it returns.
//!
//! ## Architecture
//!
//! - **Capacity**: the weekly template of study minutes per weekday
//! - **Distribution**: greedy first-in-first-out packing of study items onto
//!   days, starting on the given start date
//! - **Reschedule**: look-ahead search for the next day with spare time after
//!   a reference date, with a never-fail fallback
//! - **Review**: SM-2 spaced-repetition updates for flashcards
//!
//! ## Key Components
//!
//! - [`CapacityProfile`]: Per-weekday minute budget
//! - [`GoalDistributor`]: Places ordered [`StudyItem`]s onto [`ScheduledDay`]s
//! - [`RescheduleFinder`]: Finds where one item can move
//! - [`ReviewScheduler`]: Computes the next review of a flashcard
//! - [`EngineConfig`]: TOML-backed tunables for the above

pub mod capacity;
pub mod config;
pub mod error;
pub mod item;
pub mod review;
pub mod scheduler;

pub use capacity::{weekday_label, CapacityProfile, PRIORITY_ORDER};
pub use config::{DistributionConfig, EngineConfig, RescheduleConfig};
pub use error::{ConfigError, CoreError, PlanError, Result, ReviewError};
pub use item::{intensity, StudyItem};
pub use review::{
    Grade, Regime, ReviewCardState, ReviewEvent, ReviewOutcome, ReviewScheduler, INITIAL_EASINESS,
    MIN_EASINESS,
};
pub use scheduler::reschedule::{Commitment, RescheduleFinder, RescheduleResult};
pub use scheduler::{Distribution, DistributionStats, GoalDistributor, PlacedItem, ScheduledDay};
