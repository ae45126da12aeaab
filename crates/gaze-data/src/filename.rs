//! Session metadata recovered from a session file name.
//!
//! File names follow `DD_KHNNN_fixations.csv` (case-insensitive), where `DD`
//! is the block number and `NNN` the viewer id.

use std::path::Path;
use std::sync::OnceLock;

use gaze_core::error::{GazeError, Result};
use gaze_core::models::SessionKey;
use regex::Regex;

fn session_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d\d)_KH(\d\d\d)_fixations\.csv").expect("regex is valid")
    })
}

/// Parse the block number and viewer id out of `file_name`.
///
/// The pattern must occur exactly once; no match and repeated matches both
/// fail with [`GazeError::InvalidFileName`].
pub fn parse_session_key(file_name: &str) -> Result<SessionKey> {
    let mut matches = session_name_regex().captures_iter(file_name);

    let Some(caps) = matches.next() else {
        return Err(GazeError::InvalidFileName {
            name: file_name.to_string(),
            reason: "expected DD_KHNNN_fixations.csv".to_string(),
        });
    };
    if matches.next().is_some() {
        return Err(GazeError::InvalidFileName {
            name: file_name.to_string(),
            reason: "session pattern occurs more than once".to_string(),
        });
    }

    Ok(SessionKey {
        block_number: caps[1].to_string(),
        viewer_id: caps[2].to_string(),
    })
}

/// [`parse_session_key`] applied to the final component of `path`.
///
/// Parent directory names are not inspected.
pub fn session_key_for_path(path: &Path) -> Result<SessionKey> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| GazeError::InvalidFileName {
            name: path.display().to_string(),
            reason: "path has no UTF-8 file name".to_string(),
        })?;
    parse_session_key(name)
}
