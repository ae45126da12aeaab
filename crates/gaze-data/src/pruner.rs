//! Group-level pruning of sparse `(image_name, viewer_id)` groups.

use std::collections::HashMap;

use gaze_core::models::{FixationKey, FixationRecord};

/// Drop every group with fewer than `minimum_fixations` rows.
///
/// Surviving groups keep all of their rows, in input order. A threshold of
/// 0 or 1 keeps everything.
pub fn prune_sparse_groups(
    records: Vec<FixationRecord>,
    minimum_fixations: usize,
) -> Vec<FixationRecord> {
    let mut counts: HashMap<FixationKey, usize> = HashMap::new();
    for record in &records {
        *counts.entry(record.key.clone()).or_default() += 1;
    }

    records
        .into_iter()
        .filter(|r| counts.get(&r.key).copied().unwrap_or(0) >= minimum_fixations)
        .collect()
}
