//! Achievement descriptors and the predicate evaluator.
//!
//! Every achievement carries an [`AchievementCondition`], a closed set of
//! predicate shapes over a progress snapshot. Conditions never read
//! `unlocked_achievements`, so evaluation reaches its fixed point in a
//! single pass: applying the returned ids and evaluating again yields
//! nothing new.

use crate::catalog::{EraDescriptor, Icon, MissionKind};
use crate::progress::ProgressSnapshot;
use crate::unlock;
use std::collections::HashSet;

/// Broad grouping used by the achievements page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    Completion,
    Speed,
    Ethics,
    Special,
}

impl AchievementCategory {
    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Completion => "completion",
            AchievementCategory::Speed => "speed",
            AchievementCategory::Ethics => "ethics",
            AchievementCategory::Special => "special",
        }
    }
}

/// Named groups of ethical-choice ids sharing an outlook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceBucket {
    Safety,
    Innovation,
    Balanced,
}

impl ChoiceBucket {
    /// The choice ids across all eras that fall into this bucket.
    pub fn choice_ids(&self) -> &'static [&'static str] {
        match self {
            ChoiceBucket::Safety => &["safety", "pause", "wait", "protocol", "refuse", "local"],
            ChoiceBucket::Innovation => &[
                "proceed",
                "invest",
                "wireless-charging",
                "scan",
                "share",
                "cloud",
                "accurate",
            ],
            ChoiceBucket::Balanced => {
                &["restrict", "hybrid", "aggregate", "federated", "explainable"]
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChoiceBucket::Safety => "safety",
            ChoiceBucket::Innovation => "innovation",
            ChoiceBucket::Balanced => "balanced",
        }
    }
}

/// The unlock predicate for one achievement.
#[derive(Debug, Clone)]
pub enum AchievementCondition {
    /// At least this many eras completed.
    ErasCompleted { at_least: usize },

    /// Some era with the given mission kind was solved with exactly one
    /// recorded attempt.
    FirstAttemptMission { mission: MissionKind },

    /// Some recorded era-completion duration is within the bound.
    CompletionWithin { max_ms: u64 },

    /// At least this many recorded choices fall into the bucket.
    ChoicesInBucket { bucket: ChoiceBucket, at_least: usize },

    /// The user has visited (completed or currently viewing) at least as
    /// many eras as are unlocked, with a floor on how many must be
    /// unlocked for the coverage to count.
    VisitedCoverage { min_unlocked: usize },
}

impl AchievementCondition {
    /// Evaluate this predicate against a snapshot. Pure: no side effects,
    /// same snapshot in, same answer out.
    pub fn is_satisfied(&self, eras: &[EraDescriptor], snapshot: &ProgressSnapshot) -> bool {
        match self {
            AchievementCondition::ErasCompleted { at_least } => {
                snapshot.completed_eras.len() >= *at_least
            }
            AchievementCondition::FirstAttemptMission { mission } => snapshot
                .mission_attempts
                .iter()
                .any(|(era_id, &attempts)| {
                    attempts == 1
                        && eras
                            .iter()
                            .any(|e| e.id == *era_id && e.mission.kind == *mission)
                }),
            AchievementCondition::CompletionWithin { max_ms } => snapshot
                .era_completion_durations
                .values()
                .any(|&duration| duration <= *max_ms),
            AchievementCondition::ChoicesInBucket { bucket, at_least } => {
                let ids = bucket.choice_ids();
                let count = snapshot
                    .era_choices
                    .values()
                    .filter(|choice| ids.contains(&choice.as_str()))
                    .count();
                count >= *at_least
            }
            AchievementCondition::VisitedCoverage { min_unlocked } => {
                let mut visited: HashSet<&str> =
                    snapshot.completed_eras.iter().map(String::as_str).collect();
                if let Some(current) = snapshot.current_era.as_deref() {
                    visited.insert(current);
                }
                let unlocked = eras
                    .iter()
                    .filter(|e| unlock::is_unlocked(eras, &snapshot.completed_eras, &e.id))
                    .count();
                visited.len() >= unlocked && unlocked >= *min_unlocked
            }
        }
    }
}

/// A named, one-way-unlockable badge.
#[derive(Debug, Clone)]
pub struct AchievementDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Icon,
    pub category: AchievementCategory,
    pub condition: AchievementCondition,
}

impl AchievementDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: Icon,
        category: AchievementCategory,
        condition: AchievementCondition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon,
            category,
            condition,
        }
    }
}

/// Collect the ids of achievements newly satisfied by `snapshot`.
///
/// Already-unlocked ids are skipped, so merging the result into the
/// snapshot and evaluating again returns an empty set.
pub fn evaluate(
    eras: &[EraDescriptor],
    achievements: &[AchievementDescriptor],
    snapshot: &ProgressSnapshot,
) -> Vec<String> {
    achievements
        .iter()
        .filter(|a| !snapshot.unlocked_achievements.contains(&a.id))
        .filter(|a| a.condition.is_satisfied(eras, snapshot))
        .map(|a| a.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn eras() -> &'static [EraDescriptor] {
        catalog::eras()
    }

    fn achievements() -> &'static [AchievementDescriptor] {
        catalog::achievements()
    }

    #[test]
    fn test_completion_thresholds() {
        let one = ProgressSnapshot::default().complete_era("foundations", 1);
        let unlocked = evaluate(eras(), achievements(), &one);
        assert!(unlocked.contains(&"first-steps".to_string()));
        assert!(!unlocked.contains(&"halfway-there".to_string()));
    }

    #[test]
    fn test_evaluate_skips_already_unlocked() {
        let snapshot = ProgressSnapshot::default()
            .complete_era("foundations", 1)
            .unlock_achievements(&["first-steps".to_string()], 2);
        let unlocked = evaluate(eras(), achievements(), &snapshot);
        assert!(!unlocked.contains(&"first-steps".to_string()));
    }

    #[test]
    fn test_evaluate_reaches_fixed_point_in_one_pass() {
        let snapshot = ProgressSnapshot::default()
            .record_era_start("foundations", 0)
            .record_mission_attempt("foundations", 1)
            .save_choice("foundations", "safety", 2)
            .complete_era("foundations", 3);

        let first = evaluate(eras(), achievements(), &snapshot);
        let merged = snapshot.unlock_achievements(&first, 4);
        assert!(evaluate(eras(), achievements(), &merged).is_empty());
    }

    #[test]
    fn test_first_attempt_requires_sequence_mission() {
        // "implantables" has a slider mission; one attempt there should
        // not satisfy the sequence predicate.
        let slider_only = ProgressSnapshot::default().record_mission_attempt("implantables", 1);
        assert!(!evaluate(eras(), achievements(), &slider_only)
            .contains(&"perfect-sequence".to_string()));

        let sequence = ProgressSnapshot::default().record_mission_attempt("foundations", 1);
        assert!(evaluate(eras(), achievements(), &sequence)
            .contains(&"perfect-sequence".to_string()));
    }

    #[test]
    fn test_first_attempt_not_satisfied_after_retry() {
        let retried = ProgressSnapshot::default()
            .record_mission_attempt("foundations", 1)
            .record_mission_attempt("foundations", 2);
        assert!(!evaluate(eras(), achievements(), &retried)
            .contains(&"perfect-sequence".to_string()));
    }

    #[test]
    fn test_duration_bound_boundary() {
        let at_bound = ProgressSnapshot::default()
            .record_era_start("foundations", 0)
            .complete_era("foundations", 300_000);
        assert!(evaluate(eras(), achievements(), &at_bound)
            .contains(&"quick-learner".to_string()));

        let over = ProgressSnapshot::default()
            .record_era_start("implantables", 0)
            .complete_era("implantables", 300_001);
        assert!(!evaluate(eras(), achievements(), &over)
            .contains(&"quick-learner".to_string()));
    }

    #[test]
    fn test_choice_bucket_counting() {
        let two = ProgressSnapshot::default()
            .save_choice("foundations", "safety", 1)
            .save_choice("implantables", "longer-battery", 2)
            .save_choice("imaging-robotics", "wait", 3);
        // "longer-battery" is in no bucket; only two safety choices so far.
        assert!(!evaluate(eras(), achievements(), &two).contains(&"safety-first".to_string()));

        let three = two.save_choice("wearables", "refuse", 4);
        assert!(evaluate(eras(), achievements(), &three).contains(&"safety-first".to_string()));
    }

    #[test]
    fn test_buckets_are_disjoint() {
        let safety: HashSet<_> = ChoiceBucket::Safety.choice_ids().iter().collect();
        let innovation: HashSet<_> = ChoiceBucket::Innovation.choice_ids().iter().collect();
        let balanced: HashSet<_> = ChoiceBucket::Balanced.choice_ids().iter().collect();

        assert!(safety.is_disjoint(&innovation));
        assert!(safety.is_disjoint(&balanced));
        assert!(innovation.is_disjoint(&balanced));
    }

    #[test]
    fn test_visited_coverage_needs_three_unlocked() {
        // Two eras completed unlocks three; visiting the third satisfies
        // coverage.
        let behind = ProgressSnapshot::default()
            .complete_era("foundations", 1)
            .complete_era("implantables", 2);
        assert!(!evaluate(eras(), achievements(), &behind).contains(&"explorer".to_string()));

        let caught_up = behind.set_current_era("imaging-robotics", 3);
        assert!(evaluate(eras(), achievements(), &caught_up).contains(&"explorer".to_string()));
    }
}
