//! Core types for the gaze fixation pipeline.
//!
//! Holds the domain model (samples, session keys, fixation records and the
//! corpus), the shared error type, command-line settings and the summary
//! statistics reported after a run.

pub mod error;
pub mod models;
pub mod settings;
pub mod statistics;

pub use error::{GazeError, Result};
pub use models::{
    Corpus, DataLayout, FixationKey, FixationRecord, RawSample, SessionKey,
    DEFAULT_MINIMUM_FIXATIONS,
};
pub use settings::{CorpusOptions, Settings};
pub use statistics::CorpusSummary;
