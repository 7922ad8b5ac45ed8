//! Testing utilities.
//!
//! This module provides tools for deterministic scenario tests:
//! - [`ManualClock`], a hand-advanced [`Clock`], so timing-sensitive
//!   behavior (completion durations, the quick-completion achievement)
//!   can be exercised without sleeping
//! - [`ScenarioHarness`], a session over the built-in catalog with a
//!   manual clock and a scripted happy-path driver

use crate::catalog;
use crate::session::{Clock, ProgressSession, ProgressUpdate, SessionError};
use crate::store::ProgressStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A clock that only moves when told to.
///
/// Cloning shares the underlying time, so a test can keep a handle while
/// the session owns its boxed copy.
#[derive(Clone)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at the given epoch milliseconds.
    pub fn new(start_ms: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Move time forward.
    pub fn advance(&self, delta_ms: u64) {
        self.millis.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time.
    pub fn set(&self, now_ms: u64) {
        self.millis.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// A [`ProgressSession`] wired for scripted tests.
///
/// The harness keeps a [`ManualClock`] handle alongside the session it
/// drives, and offers the full happy path for one era as a single call.
pub struct ScenarioHarness {
    pub session: ProgressSession,
    pub clock: ManualClock,
}

impl ScenarioHarness {
    /// Harness over the built-in catalog with the clock frozen at zero.
    pub async fn new(store: ProgressStore) -> Self {
        Self::with_clock(store, ManualClock::new(0)).await
    }

    /// Harness over the built-in catalog with the given clock.
    pub async fn with_clock(store: ProgressStore, clock: ManualClock) -> Self {
        let session = ProgressSession::with_parts(
            store,
            catalog::eras().to_vec(),
            catalog::achievements().to_vec(),
            Box::new(clock.clone()),
        )
        .await;
        Self { session, clock }
    }

    /// Drive one era through the full happy path: enter, one mission
    /// attempt, mission success, ethical choice. Returns the update from
    /// the final (completing) call.
    pub async fn complete_era(
        &mut self,
        era_id: &str,
        choice_id: &str,
    ) -> Result<ProgressUpdate, SessionError> {
        self.session.enter_era(era_id).await?;
        self.session.record_mission_attempt(era_id).await?;
        self.session.complete_mission(era_id).await?;
        self.session.make_choice(era_id, choice_id).await
    }
}
