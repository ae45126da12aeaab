use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::{DataLayout, DEFAULT_MINIMUM_FIXATIONS};

// ── CorpusOptions ──────────────────────────────────────────────────────────────

/// Options for one corpus run.
///
/// The layout has no default: callers must state which directory convention
/// their corpus follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusOptions {
    pub layout: DataLayout,
    /// Groups with fewer rows than this are dropped.
    pub minimum_fixations: usize,
    /// Reserved for fixation-duration output. Requesting it fails with
    /// `NotImplemented`.
    pub calculate_fixation_duration: bool,
}

impl CorpusOptions {
    pub fn new(layout: DataLayout) -> Self {
        Self {
            layout,
            minimum_fixations: DEFAULT_MINIMUM_FIXATIONS,
            calculate_fixation_duration: false,
        }
    }

    pub fn with_minimum_fixations(mut self, minimum_fixations: usize) -> Self {
        self.minimum_fixations = minimum_fixations;
        self
    }

    pub fn with_fixation_duration(mut self, enabled: bool) -> Self {
        self.calculate_fixation_duration = enabled;
        self
    }
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Clean eye-tracker fixation logs into one indexed fixation table
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gaze-prep",
    about = "Clean eye-tracker fixation logs into one indexed fixation table",
    version
)]
pub struct Settings {
    /// Corpus root folder
    pub root: PathBuf,

    /// Directory layout of the corpus
    #[arg(long, value_parser = ["new", "legacy"])]
    pub layout: String,

    /// Minimum fixations an (image, viewer) group must keep
    #[arg(long, default_value_t = DEFAULT_MINIMUM_FIXATIONS)]
    pub min_fixations: usize,

    /// Add per-fixation durations (not implemented)
    #[arg(long)]
    pub calculate_fixation_duration: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Settings {
    /// Parse CLI arguments from the process environment and apply `--debug`.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Library options described by these settings.
    pub fn corpus_options(&self) -> Result<CorpusOptions> {
        let layout: DataLayout = self.layout.parse()?;
        Ok(CorpusOptions::new(layout)
            .with_minimum_fixations(self.min_fixations)
            .with_fixation_duration(self.calculate_fixation_duration))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
