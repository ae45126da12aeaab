//! Session file loading.
//!
//! Reads one eye-tracker CSV export and projects it onto the four columns
//! the pipeline uses. Any other column is ignored.

use std::path::Path;

use csv::StringRecord;
use gaze_core::error::{GazeError, Result};
use gaze_core::models::RawSample;
use tracing::debug;

/// Media reference column.
pub const MEDIA_NAME_COLUMN: &str = "MEDIA_NAME";
/// Horizontal point-of-gaze column.
pub const X_COLUMN: &str = "BPOGX";
/// Vertical point-of-gaze column.
pub const Y_COLUMN: &str = "BPOGY";
/// Point-of-gaze validity column.
pub const VALIDITY_COLUMN: &str = "BPOGV";

/// Header positions of the required columns.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    media_name: usize,
    x: usize,
    y: usize,
    validity: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| GazeError::Schema {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        };
        Ok(Self {
            media_name: find(MEDIA_NAME_COLUMN)?,
            x: find(X_COLUMN)?,
            y: find(Y_COLUMN)?,
            validity: find(VALIDITY_COLUMN)?,
        })
    }
}

/// Load every row of the session file at `path`.
///
/// Fails with [`GazeError::Schema`] before reading any row when a required
/// column is missing, and with [`GazeError::MalformedRow`] when a numeric
/// cell holds text that is not a number. Empty numeric cells are kept as
/// NaN / `None` so the fixation filter drops them.
pub fn load_session_table(path: &Path) -> Result<Vec<RawSample>> {
    let file = std::fs::File::open(path).map_err(|source| GazeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(std::io::BufReader::new(file));

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers, path)?;

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        samples.push(parse_sample(&record, columns, path, line)?);
    }

    debug!("File {}: {} rows loaded", path.display(), samples.len());
    Ok(samples)
}

fn parse_sample(
    record: &StringRecord,
    columns: ColumnIndex,
    path: &Path,
    line: u64,
) -> Result<RawSample> {
    let malformed = |reason: String| GazeError::MalformedRow {
        path: path.to_path_buf(),
        line,
        reason,
    };
    let raw_cell = |idx: usize| record.get(idx).unwrap_or_default();
    let cell = |idx: usize| raw_cell(idx).trim();

    let x = parse_coordinate(cell(columns.x)).ok_or_else(|| {
        malformed(format!("{} is not a number: {:?}", X_COLUMN, cell(columns.x)))
    })?;
    let y = parse_coordinate(cell(columns.y)).ok_or_else(|| {
        malformed(format!("{} is not a number: {:?}", Y_COLUMN, cell(columns.y)))
    })?;
    let validity = parse_validity(cell(columns.validity)).ok_or_else(|| {
        malformed(format!(
            "{} is not an integer: {:?}",
            VALIDITY_COLUMN,
            cell(columns.validity)
        ))
    })?;

    Ok(RawSample {
        media_name: raw_cell(columns.media_name).to_string(),
        x,
        y,
        validity,
    })
}

/// Empty → NaN; unparseable → `None`.
fn parse_coordinate(text: &str) -> Option<f64> {
    if text.is_empty() {
        return Some(f64::NAN);
    }
    text.parse::<f64>().ok()
}

/// Empty → `Some(None)`; integral numbers (`1`, `1.0`) → `Some(Some(n))`;
/// anything else → `None`.
fn parse_validity(text: &str) -> Option<Option<i64>> {
    if text.is_empty() {
        return Some(None);
    }
    if let Ok(code) = text.parse::<i64>() {
        return Some(Some(code));
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Some(Some(v as i64)),
        _ => None,
    }
}
