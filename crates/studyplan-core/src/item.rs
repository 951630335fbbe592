//! Study items handed to the distributor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known intensity profile keys. Callers may use any other key.
pub mod intensity {
    pub const FAST: &str = "fast";
    pub const NORMAL: &str = "normal";
    pub const THOROUGH: &str = "thorough";
}

/// A unit of study work.
///
/// Durations are keyed by intensity profile; the engine never mutates an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyItem {
    pub id: String,
    /// Owning subjects, kept only for traceability.
    #[serde(default)]
    pub subject_ids: Vec<String>,
    /// Estimated minutes per intensity profile.
    #[serde(default)]
    pub durations: BTreeMap<String, u32>,
}

impl StudyItem {
    /// Create an item with no subjects and no duration estimates.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject_ids: Vec::new(),
            durations: BTreeMap::new(),
        }
    }

    /// Attach an owning subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_ids.push(subject_id.into());
        self
    }

    /// Set the duration estimate for an intensity profile.
    pub fn with_duration(mut self, intensity: impl Into<String>, minutes: u32) -> Self {
        self.durations.insert(intensity.into(), minutes);
        self
    }

    /// Minutes for the given profile, or `default_minutes` when it has no estimate.
    pub fn duration_for(&self, intensity: &str, default_minutes: u32) -> u32 {
        self.durations
            .get(intensity)
            .copied()
            .unwrap_or(default_minutes)
    }
}
