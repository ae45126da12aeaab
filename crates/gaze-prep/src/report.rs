use chrono::{DateTime, Utc};
use gaze_core::models::{Corpus, DataLayout};
use gaze_core::statistics::CorpusSummary;
use serde::Serialize;
use std::path::PathBuf;

// ── RunReport ──────────────────────────────────────────────────────────────────

/// Summary of one corpus run, printed to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// UTC time the report was generated.
    pub generated_at: DateTime<Utc>,
    pub root: PathBuf,
    pub layout: DataLayout,
    pub minimum_fixations: usize,
    #[serde(flatten)]
    pub summary: CorpusSummary,
}

impl RunReport {
    pub fn new(
        root: PathBuf,
        layout: DataLayout,
        minimum_fixations: usize,
        corpus: &Corpus,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            root,
            layout,
            minimum_fixations,
            summary: corpus.summary(),
        }
    }

    /// Plain-text rendering, one `label: value` pair per line.
    pub fn render_text(&self) -> String {
        let s = &self.summary;
        let opt = |v: Option<f64>| {
            v.map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "n/a".to_string())
        };
        let lines = [
            format!("root: {}", self.root.display()),
            format!("layout: {}", self.layout),
            format!("minimum fixations: {}", self.minimum_fixations),
            format!("sessions: {}", s.sessions),
            format!("groups: {}", s.groups),
            format!("fixations: {}", s.fixations),
            format!(
                "average number of fixation points: {}",
                opt(s.mean_fixations_per_group)
            ),
            format!(
                "standard deviation of fixation points: {}",
                opt(s.std_fixations_per_group)
            ),
        ];
        lines.join("\n")
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
