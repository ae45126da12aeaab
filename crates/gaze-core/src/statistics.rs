//! Descriptive statistics over per-group fixation counts.

use serde::{Deserialize, Serialize};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation with an `n - 1` denominator.
///
/// Returns `None` when fewer than two values are given.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() as f64 - 1.0)).sqrt())
}

// ── CorpusSummary ─────────────────────────────────────────────────────────────

/// Shape of a corpus: how many groups it holds and how many fixations each
/// group carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Session files merged into the corpus.
    pub sessions: usize,
    /// Distinct `(image_name, viewer_id)` groups.
    pub groups: usize,
    /// Total fixation rows.
    pub fixations: usize,
    /// Mean fixations per group.
    pub mean_fixations_per_group: Option<f64>,
    /// Sample standard deviation of fixations per group.
    pub std_fixations_per_group: Option<f64>,
    pub min_fixations_per_group: Option<usize>,
    pub max_fixations_per_group: Option<usize>,
}

impl CorpusSummary {
    /// Build a summary from the row count of each group.
    pub fn from_group_counts(sessions: usize, counts: &[usize]) -> Self {
        let as_f64: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        Self {
            sessions,
            groups: counts.len(),
            fixations: counts.iter().sum(),
            mean_fixations_per_group: mean(&as_f64),
            std_fixations_per_group: sample_std(&as_f64),
            min_fixations_per_group: counts.iter().copied().min(),
            max_fixations_per_group: counts.iter().copied().max(),
        }
    }
}
