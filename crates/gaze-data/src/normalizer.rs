//! Reshaping filtered samples into keyed fixation records.

use gaze_core::models::{DataLayout, FixationKey, FixationRecord, RawSample, SessionKey};

/// Image identifier for `media_name` recorded in the given session.
///
/// The new layout uses the media reference verbatim; the legacy layout
/// prefixes it with `block {block_number}/`.
pub fn image_name(media_name: &str, session: &SessionKey, layout: DataLayout) -> String {
    match layout {
        DataLayout::New => media_name.to_string(),
        DataLayout::Legacy => format!("block {}/{}", session.block_number, media_name),
    }
}

/// Turn filtered samples into records keyed by `(image_name, viewer_id)`.
///
/// Media reference and validity code are dropped; coordinates pass through
/// unchanged. Row order is preserved.
pub fn normalize_session(
    samples: &[RawSample],
    session: &SessionKey,
    layout: DataLayout,
) -> Vec<FixationRecord> {
    samples
        .iter()
        .map(|s| FixationRecord {
            key: FixationKey::new(
                image_name(&s.media_name, session, layout),
                session.viewer_id.clone(),
            ),
            x: s.x,
            y: s.y,
        })
        .collect()
}
