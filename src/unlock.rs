//! Strict linear unlock policy.
//!
//! Era N is reachable only once era N-1 is completed; there is no skipping
//! and no branching. Unknown era ids are simply locked, never an error.

use crate::catalog::EraDescriptor;

/// Whether an era is reachable given the completed set.
///
/// The order-1 era is always unlocked. If the catalog is inconsistent and
/// an era's predecessor is missing, the era is treated as unlocked rather
/// than permanently stranding the user.
pub fn is_unlocked(eras: &[EraDescriptor], completed_eras: &[String], era_id: &str) -> bool {
    let Some(era) = eras.iter().find(|e| e.id == era_id) else {
        return false;
    };
    if era.order == 1 {
        return true;
    }
    let Some(previous) = eras.iter().find(|e| e.order == era.order - 1) else {
        return true;
    };
    completed_eras.iter().any(|c| *c == previous.id)
}

/// Percentage of the catalog completed, rounded to the nearest integer.
pub fn completion_percentage(eras: &[EraDescriptor], completed_eras: &[String]) -> u32 {
    if eras.is_empty() {
        return 0;
    }
    let total = eras.len() as u32;
    let completed = completed_eras.len().min(eras.len()) as u32;
    (100 * completed + total / 2) / total
}
