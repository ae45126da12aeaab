use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::GazeError;
use crate::statistics::CorpusSummary;

/// Default minimum number of fixations an (image, viewer) group must keep.
pub const DEFAULT_MINIMUM_FIXATIONS: usize = 3;

/// Directory convention used to locate session files under a corpus root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataLayout {
    /// Session files sit directly inside the root folder.
    New,
    /// Session files sit one folder below the root (one folder per viewer).
    Legacy,
}

impl DataLayout {
    /// Lowercase name used on the command line and in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataLayout::New => "new",
            DataLayout::Legacy => "legacy",
        }
    }

    /// Depth of session files below the corpus root.
    pub fn file_depth(&self) -> usize {
        match self {
            DataLayout::New => 1,
            DataLayout::Legacy => 2,
        }
    }
}

impl fmt::Display for DataLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataLayout {
    type Err = GazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Ok(DataLayout::New),
            "legacy" => Ok(DataLayout::Legacy),
            other => Err(GazeError::Config(format!("unknown layout: {}", other))),
        }
    }
}

/// One row of a session file, restricted to the four columns the
/// pipeline reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    /// `MEDIA_NAME`: the stimulus image the sample belongs to.
    pub media_name: String,
    /// `BPOGX`: normalised horizontal gaze position. NaN when the cell is empty.
    pub x: f64,
    /// `BPOGY`: normalised vertical gaze position. NaN when the cell is empty.
    pub y: f64,
    /// `BPOGV`: validity code; `None` when the cell is empty.
    pub validity: Option<i64>,
}

/// Block number and viewer id recovered from a session file name.
///
/// Both parts keep their leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionKey {
    pub block_number: String,
    pub viewer_id: String,
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {} / viewer {}", self.block_number, self.viewer_id)
    }
}

/// Composite `(image_name, viewer_id)` index of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixationKey {
    pub image_name: String,
    pub viewer_id: String,
}

impl FixationKey {
    pub fn new(image_name: impl Into<String>, viewer_id: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
            viewer_id: viewer_id.into(),
        }
    }
}

/// A cleaned fixation point, keyed by image and viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixationRecord {
    #[serde(flatten)]
    pub key: FixationKey,
    /// Horizontal position, strictly inside `(0, 1)`.
    pub x: f64,
    /// Vertical position, strictly inside `(0, 1)`.
    pub y: f64,
}

// ── Corpus ────────────────────────────────────────────────────────────────────

/// Concatenation of every cleaned session table under a corpus root.
///
/// Rows keep the order in which their sessions were merged; rows sharing a
/// key are never deduplicated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    records: Vec<FixationRecord>,
    session_count: usize,
}

impl Corpus {
    /// Concatenate cleaned session tables in the given order.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = Vec<FixationRecord>>,
    {
        let mut corpus = Corpus::default();
        for table in tables {
            corpus.records.extend(table);
            corpus.session_count += 1;
        }
        corpus
    }

    /// All rows, in concatenation order.
    pub fn records(&self) -> &[FixationRecord] {
        &self.records
    }

    /// Number of session tables merged into this corpus.
    pub fn session_count(&self) -> usize {
        self.session_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows grouped by `(image_name, viewer_id)`, keys in sorted order.
    pub fn groups(&self) -> BTreeMap<&FixationKey, Vec<&FixationRecord>> {
        let mut groups: BTreeMap<&FixationKey, Vec<&FixationRecord>> = BTreeMap::new();
        for record in &self.records {
            groups.entry(&record.key).or_default().push(record);
        }
        groups
    }

    /// Rows belonging to one `(image_name, viewer_id)` pair.
    pub fn group(&self, image_name: &str, viewer_id: &str) -> Vec<&FixationRecord> {
        self.records
            .iter()
            .filter(|r| r.key.image_name == image_name && r.key.viewer_id == viewer_id)
            .collect()
    }

    /// Number of rows per `(image_name, viewer_id)` pair.
    pub fn group_sizes(&self) -> BTreeMap<&FixationKey, usize> {
        self.groups()
            .into_iter()
            .map(|(key, rows)| (key, rows.len()))
            .collect()
    }

    /// Per-group fixation count statistics.
    pub fn summary(&self) -> CorpusSummary {
        let counts: Vec<usize> = self.group_sizes().into_values().collect();
        CorpusSummary::from_group_counts(self.session_count, &counts)
    }
}
