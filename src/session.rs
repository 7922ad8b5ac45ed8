//! ProgressSession - the primary public API for progress tracking.
//!
//! The session is the single owner of the authoritative in-memory
//! snapshot. UI components request mutations through the named operations
//! here and observe changes through [`ProgressSession::subscribe`]; nothing
//! else touches the snapshot's internals. Every mutation re-persists the
//! whole snapshot, so the stored blob always reflects the latest state.

use crate::achievements::{self, AchievementDescriptor};
use crate::catalog::{self, EraDescriptor};
use crate::progress::ProgressSnapshot;
use crate::store::{ProgressStore, StoreError};
use crate::unlock;
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::sync::watch;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Source of the current time in epoch milliseconds.
///
/// The engine never reads the wall clock directly; the session asks its
/// clock, which lets tests drive scenario timing deterministically.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// What a mutation changed, for driving notification UI.
#[derive(Debug, Clone, Default)]
pub struct ProgressUpdate {
    /// Era that transitioned to completed during this call, if any.
    pub era_completed: Option<String>,

    /// Achievement ids newly unlocked during this call.
    pub newly_unlocked: Vec<String>,
}

/// The stateful controller wiring store, model, unlock policy, and
/// achievement evaluator together.
///
/// Mission completion is deliberately session-local: solving a mission
/// sets an in-memory flag that is never persisted, so reloading before the
/// ethical choice is made means re-solving the mission. Only the fields of
/// [`ProgressSnapshot`] survive a restart.
pub struct ProgressSession {
    eras: Vec<EraDescriptor>,
    achievements: Vec<AchievementDescriptor>,
    progress: ProgressSnapshot,
    missions_complete: HashSet<String>,
    store: ProgressStore,
    clock: Box<dyn Clock>,
    watch_tx: watch::Sender<ProgressSnapshot>,
}

impl ProgressSession {
    /// Create a session over the built-in catalog, loading any stored
    /// progress. A missing or unusable blob starts from defaults.
    pub async fn new(store: ProgressStore) -> Self {
        Self::with_parts(
            store,
            catalog::eras().to_vec(),
            catalog::achievements().to_vec(),
            Box::new(SystemClock),
        )
        .await
    }

    /// Create a session with explicit catalogs and clock.
    pub async fn with_parts(
        store: ProgressStore,
        eras: Vec<EraDescriptor>,
        achievements: Vec<AchievementDescriptor>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let progress = store.load().await.unwrap_or_default();
        let (watch_tx, _) = watch::channel(progress.clone());
        Self {
            eras,
            achievements,
            progress,
            missions_complete: HashSet::new(),
            store,
            clock,
            watch_tx,
        }
    }

    /// The user opened an era view: record its start time (first visit
    /// only) and mark it current.
    pub async fn enter_era(&mut self, era_id: &str) -> Result<ProgressUpdate, SessionError> {
        let now = self.clock.now_ms();
        let next = self
            .progress
            .record_era_start(era_id, now)
            .set_current_era(era_id, now);
        self.commit(next, None, true).await
    }

    /// The user ran a mission check, successful or not. The counter always
    /// moves; the first-attempt achievement depends on it being exact.
    pub async fn record_mission_attempt(
        &mut self,
        era_id: &str,
    ) -> Result<ProgressUpdate, SessionError> {
        let now = self.clock.now_ms();
        let next = self.progress.record_mission_attempt(era_id, now);
        self.commit(next, None, false).await
    }

    /// The era's mission was solved. If the ethical choice is already
    /// recorded, the era completes immediately.
    pub async fn complete_mission(&mut self, era_id: &str) -> Result<ProgressUpdate, SessionError> {
        self.missions_complete.insert(era_id.to_string());
        if self.progress.has_choice(era_id) {
            self.finish_era(era_id).await
        } else {
            Ok(ProgressUpdate::default())
        }
    }

    /// The user answered the era's ethical question. If the mission was
    /// already solved this session, the era completes immediately.
    pub async fn make_choice(
        &mut self,
        era_id: &str,
        choice_id: &str,
    ) -> Result<ProgressUpdate, SessionError> {
        let now = self.clock.now_ms();
        let mut next = self.progress.save_choice(era_id, choice_id, now);
        let mut era_completed = None;
        if self.missions_complete.contains(era_id)
            && !next.is_completed(era_id)
            && self.era_known(era_id)
        {
            next = next.complete_era(era_id, now);
            era_completed = Some(era_id.to_string());
        }
        self.commit(next, era_completed, true).await
    }

    /// Discard all progress: clear the store and reinstall defaults.
    pub async fn reset(&mut self) -> Result<(), SessionError> {
        self.store.clear().await?;
        self.progress = ProgressSnapshot::default();
        self.missions_complete.clear();
        self.watch_tx.send_replace(self.progress.clone());
        Ok(())
    }

    /// Read-only view of the current snapshot.
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.progress
    }

    /// Subscribe to snapshot changes. The receiver always holds the most
    /// recently committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.watch_tx.subscribe()
    }

    /// Whether the era is reachable under strict linear progression.
    pub fn is_unlocked(&self, era_id: &str) -> bool {
        unlock::is_unlocked(&self.eras, &self.progress.completed_eras, era_id)
    }

    /// Whether this era's mission has been solved in this session.
    pub fn is_mission_complete(&self, era_id: &str) -> bool {
        self.missions_complete.contains(era_id)
    }

    /// Percentage of eras completed, rounded.
    pub fn completion_percentage(&self) -> u32 {
        unlock::completion_percentage(&self.eras, &self.progress.completed_eras)
    }

    /// Achievements the user has earned, in catalog order.
    pub fn unlocked_achievements(&self) -> Vec<&AchievementDescriptor> {
        self.achievements
            .iter()
            .filter(|a| self.progress.unlocked_achievements.contains(&a.id))
            .collect()
    }

    /// Achievements still locked, in catalog order.
    pub fn locked_achievements(&self) -> Vec<&AchievementDescriptor> {
        self.achievements
            .iter()
            .filter(|a| !self.progress.unlocked_achievements.contains(&a.id))
            .collect()
    }

    fn era_known(&self, era_id: &str) -> bool {
        self.eras.iter().any(|e| e.id == era_id)
    }

    /// Complete an era after both signals have fired. Unknown eras and
    /// already-completed eras are no-ops, not errors.
    async fn finish_era(&mut self, era_id: &str) -> Result<ProgressUpdate, SessionError> {
        if !self.era_known(era_id) || self.progress.is_completed(era_id) {
            return Ok(ProgressUpdate::default());
        }
        let now = self.clock.now_ms();
        let next = self.progress.complete_era(era_id, now);
        self.commit(next, Some(era_id.to_string()), true).await
    }

    /// Persist a successor snapshot and publish it to subscribers.
    ///
    /// Achievements are re-evaluated for mutations that can satisfy a
    /// predicate outright: era completion, choice changes, and era entry
    /// (visited coverage reads the current era). Attempt counters must not
    /// trigger evaluation: a single failed attempt would otherwise satisfy
    /// the first-attempt predicate before the mission is ever solved.
    async fn commit(
        &mut self,
        mut next: ProgressSnapshot,
        era_completed: Option<String>,
        evaluate: bool,
    ) -> Result<ProgressUpdate, SessionError> {
        let mut newly_unlocked = Vec::new();
        if evaluate {
            newly_unlocked = achievements::evaluate(&self.eras, &self.achievements, &next);
            if !newly_unlocked.is_empty() {
                next = next.unlock_achievements(&newly_unlocked, self.clock.now_ms());
            }
        }
        self.store.save(&next).await?;
        self.progress = next;
        self.watch_tx.send_replace(self.progress.clone());
        Ok(ProgressUpdate {
            era_completed,
            newly_unlocked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, ScenarioHarness};
    use tempfile::TempDir;

    async fn session(dir: &TempDir, clock: ManualClock) -> ProgressSession {
        ScenarioHarness::with_clock(ProgressStore::in_dir(dir.path()), clock)
            .await
            .session
    }

    #[tokio::test]
    async fn test_completion_requires_both_signals() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(0);
        let mut s = session(&dir, clock.clone()).await;

        s.enter_era("foundations").await.expect("enter");
        let after_mission = s.complete_mission("foundations").await.expect("mission");
        assert!(after_mission.era_completed.is_none());
        assert!(!s.snapshot().is_completed("foundations"));

        let after_choice = s.make_choice("foundations", "safety").await.expect("choice");
        assert_eq!(after_choice.era_completed.as_deref(), Some("foundations"));
        assert!(s.snapshot().is_completed("foundations"));
    }

    #[tokio::test]
    async fn test_completion_signals_in_either_order() {
        let dir = TempDir::new().expect("temp dir");
        let mut s = session(&dir, ManualClock::new(0)).await;

        s.enter_era("foundations").await.expect("enter");
        let after_choice = s.make_choice("foundations", "proceed").await.expect("choice");
        assert!(after_choice.era_completed.is_none());

        let after_mission = s.complete_mission("foundations").await.expect("mission");
        assert_eq!(after_mission.era_completed.as_deref(), Some("foundations"));
    }

    #[tokio::test]
    async fn test_completing_twice_is_a_noop() {
        let dir = TempDir::new().expect("temp dir");
        let mut s = session(&dir, ManualClock::new(0)).await;

        s.enter_era("foundations").await.expect("enter");
        s.make_choice("foundations", "safety").await.expect("choice");
        s.complete_mission("foundations").await.expect("mission");

        let before = s.snapshot().clone();
        let again = s.complete_mission("foundations").await.expect("mission");
        assert!(again.era_completed.is_none());
        assert_eq!(s.snapshot(), &before);
    }

    #[tokio::test]
    async fn test_unknown_era_never_completes() {
        let dir = TempDir::new().expect("temp dir");
        let mut s = session(&dir, ManualClock::new(0)).await;

        s.complete_mission("atlantis").await.expect("mission");
        let update = s.make_choice("atlantis", "safety").await.expect("choice");
        assert!(update.era_completed.is_none());
        assert!(s.snapshot().completed_eras.is_empty());
        assert!(!s.is_unlocked("atlantis"));
    }

    #[tokio::test]
    async fn test_attempts_do_not_unlock_achievements() {
        let dir = TempDir::new().expect("temp dir");
        let mut s = session(&dir, ManualClock::new(0)).await;

        // One failed attempt at the sequence mission must not award the
        // first-attempt badge.
        let update = s
            .record_mission_attempt("foundations")
            .await
            .expect("attempt");
        assert!(update.newly_unlocked.is_empty());
        assert!(s.snapshot().unlocked_achievements.is_empty());
    }

    #[tokio::test]
    async fn test_mission_flag_is_not_persisted() {
        let dir = TempDir::new().expect("temp dir");
        let mut s = session(&dir, ManualClock::new(0)).await;

        s.enter_era("foundations").await.expect("enter");
        s.complete_mission("foundations").await.expect("mission");
        assert!(s.is_mission_complete("foundations"));

        // A fresh session over the same store simulates a reload.
        let mut reloaded = session(&dir, ManualClock::new(1_000)).await;
        assert!(!reloaded.is_mission_complete("foundations"));

        // The choice alone does not complete the era after the reload.
        let update = reloaded
            .make_choice("foundations", "safety")
            .await
            .expect("choice");
        assert!(update.era_completed.is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_state_and_store() {
        let dir = TempDir::new().expect("temp dir");
        let mut s = session(&dir, ManualClock::new(0)).await;

        s.enter_era("foundations").await.expect("enter");
        s.complete_mission("foundations").await.expect("mission");
        s.make_choice("foundations", "safety").await.expect("choice");
        assert!(!s.snapshot().completed_eras.is_empty());

        s.reset().await.expect("reset");
        assert_eq!(s.snapshot(), &ProgressSnapshot::default());
        assert!(!s.is_mission_complete("foundations"));

        let reloaded = session(&dir, ManualClock::new(0)).await;
        assert!(reloaded.snapshot().completed_eras.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_committed_snapshots() {
        let dir = TempDir::new().expect("temp dir");
        let mut s = session(&dir, ManualClock::new(0)).await;
        let rx = s.subscribe();

        s.enter_era("foundations").await.expect("enter");
        assert_eq!(
            rx.borrow().current_era.as_deref(),
            Some("foundations")
        );
    }

    #[tokio::test]
    async fn test_entering_an_era_can_unlock_explorer() {
        let dir = TempDir::new().expect("temp dir");
        let mut h =
            ScenarioHarness::with_clock(ProgressStore::in_dir(dir.path()), ManualClock::new(0))
                .await;

        h.complete_era("foundations", "safety").await.expect("era 1");
        h.complete_era("implantables", "longer-battery")
            .await
            .expect("era 2");
        assert!(!h
            .session
            .snapshot()
            .unlocked_achievements
            .contains(&"explorer".to_string()));

        // Visiting the third unlocked era satisfies the coverage predicate
        // at the moment of entry, with no further choice needed.
        let update = h.session.enter_era("imaging-robotics").await.expect("enter");
        assert!(update.newly_unlocked.contains(&"explorer".to_string()));
        assert!(h
            .session
            .snapshot()
            .unlocked_achievements
            .contains(&"explorer".to_string()));
    }

    #[tokio::test]
    async fn test_enter_era_start_time_first_write_wins() {
        let dir = TempDir::new().expect("temp dir");
        let clock = ManualClock::new(100);
        let mut s = session(&dir, clock.clone()).await;

        s.enter_era("foundations").await.expect("enter");
        clock.advance(5_000);
        s.enter_era("foundations").await.expect("re-enter");

        assert_eq!(s.snapshot().era_start_times["foundations"], 100);
        assert_eq!(s.snapshot().current_era.as_deref(), Some("foundations"));
    }
}
