//! Validity and range filtering of raw gaze samples.

use gaze_core::models::RawSample;

/// Coordinate the tracker reports when no fixation was registered.
pub const PLACEHOLDER_COORDINATE: f64 = 0.5;

/// Validity code of a usable sample.
pub const VALID_CODE: i64 = 1;

/// Returns `true` when `sample` is a usable fixation.
///
/// A sample is kept when all of these hold:
/// * its validity code is exactly 1;
/// * it is not the `(0.5, 0.5)` placeholder;
/// * both coordinates lie strictly inside `(0, 1)`.
///
/// NaN coordinates fail the range test.
pub fn is_valid_fixation(sample: &RawSample) -> bool {
    has_valid_code(sample) && !is_placeholder(sample) && in_open_unit_square(sample)
}

fn has_valid_code(sample: &RawSample) -> bool {
    sample.validity == Some(VALID_CODE)
}

fn is_placeholder(sample: &RawSample) -> bool {
    sample.x == PLACEHOLDER_COORDINATE && sample.y == PLACEHOLDER_COORDINATE
}

fn in_open_unit_square(sample: &RawSample) -> bool {
    sample.x > 0.0 && sample.x < 1.0 && sample.y > 0.0 && sample.y < 1.0
}

/// Copy of `samples` holding only usable fixations, in input order.
pub fn filter_fixations(samples: &[RawSample]) -> Vec<RawSample> {
    samples
        .iter()
        .filter(|s| is_valid_fixation(s))
        .cloned()
        .collect()
}
