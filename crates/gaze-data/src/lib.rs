//! Data pipeline for eye-tracker fixation logs.
//!
//! Responsible for discovering session files, recovering session metadata
//! from their names, loading and filtering raw gaze samples, keying them by
//! image and viewer, pruning sparse groups and merging everything into one
//! corpus.

pub mod corpus;
pub mod filename;
pub mod filter;
pub mod loader;
pub mod normalizer;
pub mod pruner;

pub use corpus::{find_session_files, process_corpus, process_session_file};
pub use gaze_core as core;
