//! Progress and achievement engine for the Medical Device Chronicle.
//!
//! This crate provides:
//! - The user's progress snapshot with pure, idempotent transitions
//! - Strict linear era unlocking
//! - An achievement evaluator over a closed set of predicate shapes
//! - Durable single-blob persistence with forward-compatible loading
//! - A session orchestrator exposing the UI callback contract
//!
//! # Quick Start
//!
//! ```ignore
//! use chronicle_core::{ProgressSession, ProgressStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ProgressStore::in_dir("./data");
//!     let mut session = ProgressSession::new(store).await;
//!
//!     session.enter_era("foundations").await?;
//!     session.record_mission_attempt("foundations").await?;
//!     session.complete_mission("foundations").await?;
//!     let update = session.make_choice("foundations", "safety").await?;
//!
//!     println!("completed: {:?}", update.era_completed);
//!     println!("unlocked: {:?}", update.newly_unlocked);
//!     Ok(())
//! }
//! ```

pub mod achievements;
pub mod catalog;
pub mod progress;
pub mod session;
pub mod store;
pub mod testing;
pub mod unlock;

// Primary public API
pub use achievements::{AchievementCategory, AchievementCondition, AchievementDescriptor};
pub use catalog::{EraDescriptor, MissionKind};
pub use progress::ProgressSnapshot;
pub use session::{Clock, ProgressSession, ProgressUpdate, SessionError, SystemClock};
pub use store::{ProgressStore, StoreError};
