//! The user's progress snapshot and its pure transition functions.
//!
//! A [`ProgressSnapshot`] is the complete serializable record of what the
//! user has done. Transitions never mutate their input: each one returns a
//! new snapshot with `last_visited` stamped to the supplied time, so every
//! write the orchestrator performs is an atomic replace of the whole value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete record of user progress at a point in time.
///
/// Field names serialize in camelCase to match the persisted JSON layout.
/// Fields added after the first schema revision carry `#[serde(default)]`
/// so blobs written by older builds load with those fields empty instead of
/// failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Era ids in completion order. No duplicates, never shrinks.
    pub completed_eras: Vec<String>,

    /// The era the user was last viewing, if any.
    pub current_era: Option<String>,

    /// Ethical-question answer per era. At most one, last write wins.
    pub era_choices: HashMap<String, String>,

    /// Epoch milliseconds of the most recent mutation.
    pub last_visited: u64,

    /// Achievement ids earned so far. Grows monotonically.
    #[serde(default)]
    pub unlocked_achievements: Vec<String>,

    /// Mission-check attempts per era, counting failures as well as the
    /// eventual success.
    #[serde(default)]
    pub mission_attempts: HashMap<String, u32>,

    /// Epoch milliseconds when the user first entered each era.
    #[serde(default)]
    pub era_start_times: HashMap<String, u64>,

    /// Elapsed milliseconds from first entry to completion, recorded once
    /// at the moment an era completes and only if a start time exists.
    #[serde(default)]
    pub era_completion_durations: HashMap<String, u64>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            completed_eras: Vec::new(),
            current_era: None,
            era_choices: HashMap::new(),
            last_visited: 0,
            unlocked_achievements: Vec::new(),
            mission_attempts: HashMap::new(),
            era_start_times: HashMap::new(),
            era_completion_durations: HashMap::new(),
        }
    }
}

impl ProgressSnapshot {
    /// Mark an era completed, recording its completion duration if a start
    /// time was observed. Already-completed eras are a no-op: the returned
    /// snapshot is identical to the input, nothing is restamped.
    pub fn complete_era(&self, era_id: &str, now_ms: u64) -> Self {
        if self.is_completed(era_id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.completed_eras.push(era_id.to_string());
        if let Some(&start) = self.era_start_times.get(era_id) {
            next.era_completion_durations
                .insert(era_id.to_string(), now_ms.saturating_sub(start));
        }
        next.last_visited = now_ms;
        next
    }

    /// Record the ethical-question answer for an era, replacing any
    /// previous answer.
    pub fn save_choice(&self, era_id: &str, choice_id: &str, now_ms: u64) -> Self {
        let mut next = self.clone();
        next.era_choices
            .insert(era_id.to_string(), choice_id.to_string());
        next.last_visited = now_ms;
        next
    }

    /// Set the era the user is currently viewing.
    pub fn set_current_era(&self, era_id: &str, now_ms: u64) -> Self {
        let mut next = self.clone();
        next.current_era = Some(era_id.to_string());
        next.last_visited = now_ms;
        next
    }

    /// Count one mission-check attempt, successful or not.
    pub fn record_mission_attempt(&self, era_id: &str, now_ms: u64) -> Self {
        let mut next = self.clone();
        *next.mission_attempts.entry(era_id.to_string()).or_insert(0) += 1;
        next.last_visited = now_ms;
        next
    }

    /// Record when the user first entered an era. First write wins; a
    /// second call returns the input unchanged.
    pub fn record_era_start(&self, era_id: &str, now_ms: u64) -> Self {
        if self.era_start_times.contains_key(era_id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.era_start_times.insert(era_id.to_string(), now_ms);
        next.last_visited = now_ms;
        next
    }

    /// Merge newly earned achievement ids. Ids already present are
    /// filtered out, so the unlocked set only grows and never duplicates.
    pub fn unlock_achievements(&self, ids: &[String], now_ms: u64) -> Self {
        let fresh: Vec<String> = ids
            .iter()
            .filter(|id| !self.unlocked_achievements.contains(id))
            .cloned()
            .collect();
        if fresh.is_empty() {
            return self.clone();
        }
        let mut next = self.clone();
        next.unlocked_achievements.extend(fresh);
        next.last_visited = now_ms;
        next
    }

    /// Whether an era is in the completed set.
    pub fn is_completed(&self, era_id: &str) -> bool {
        self.completed_eras.iter().any(|e| e == era_id)
    }

    /// Whether an ethical choice has been recorded for an era.
    pub fn has_choice(&self, era_id: &str) -> bool {
        self.era_choices.contains_key(era_id)
    }

    /// Mission-check attempts recorded for an era (0 if never attempted).
    pub fn attempts(&self, era_id: &str) -> u32 {
        self.mission_attempts.get(era_id).copied().unwrap_or(0)
    }
}
