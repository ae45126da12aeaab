//! Corpus discovery and aggregation.
//!
//! Finds every session file under a corpus root, runs each through the
//! cleaning pipeline and concatenates the results into one [`Corpus`].

use std::path::{Path, PathBuf};

use gaze_core::error::{GazeError, Result};
use gaze_core::models::{Corpus, DataLayout, FixationRecord};
use gaze_core::settings::CorpusOptions;
use tracing::{debug, info, warn};
use walkdir::DirEntry;

use crate::filename::session_key_for_path;
use crate::filter::filter_fixations;
use crate::loader::load_session_table;
use crate::normalizer::normalize_session;
use crate::pruner::prune_sparse_groups;

// ── Public API ────────────────────────────────────────────────────────────────

/// Find candidate session files under `root`, sorted by path.
///
/// The new layout looks at files directly inside `root`; the legacy layout
/// looks one folder down. Candidates are regular `.csv` files (extension
/// compared case-insensitively); hidden entries are skipped. Folder names are
/// not validated.
///
/// A missing root yields no candidates. Any entry below the root that cannot
/// be read (dangling link, unreadable folder, link loop) is an error.
pub fn find_session_files(root: &Path, layout: DataLayout) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        warn!("Corpus root does not exist: {}", root.display());
        return Ok(Vec::new());
    }

    let depth = layout.file_depth();
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = walkdir::WalkDir::new(root)
        .follow_links(true)
        .max_depth(depth)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.path().map(is_hidden_path).unwrap_or(false) => continue,
            Err(err) => return Err(walk_error(err)),
        };
        if entry.depth() == depth
            && entry.file_type().is_file()
            && has_csv_extension(entry.path())
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Run one session file through the full cleaning pipeline.
///
/// The file name is checked before the file is opened.
pub fn process_session_file(path: &Path, options: &CorpusOptions) -> Result<Vec<FixationRecord>> {
    let session = session_key_for_path(path)?;
    let raw = load_session_table(path)?;
    let filtered = filter_fixations(&raw);
    let normalized = normalize_session(&filtered, &session, options.layout);
    let pruned = prune_sparse_groups(normalized, options.minimum_fixations);

    debug!(
        "File {} ({}): {} read, {} valid, {} kept",
        path.display(),
        session,
        raw.len(),
        filtered.len(),
        pruned.len(),
    );

    Ok(pruned)
}

/// Build the cleaned fixation corpus for every session file under `root`.
///
/// Fails with [`GazeError::NotImplemented`] before touching the file system
/// when fixation durations are requested, and with
/// [`GazeError::NoDataFound`] when no candidate file exists. Any discovery
/// or per-file error aborts the whole run.
///
/// `NoDataFound` is tied to discovery only. When session files exist but
/// pruning leaves no fixation at all, the corpus is returned empty with a
/// warning rather than failing: the files were found and read without error,
/// and callers can tell the two cases apart through
/// [`Corpus::session_count`].
pub fn process_corpus(root: &Path, options: &CorpusOptions) -> Result<Corpus> {
    if options.calculate_fixation_duration {
        return Err(GazeError::NotImplemented(
            "fixation duration calculation".to_string(),
        ));
    }

    let files = find_session_files(root, options.layout)?;
    if files.is_empty() {
        return Err(GazeError::NoDataFound {
            root: root.to_path_buf(),
            layout: options.layout,
        });
    }

    let tables = files
        .iter()
        .map(|path| process_session_file(path, options))
        .collect::<Result<Vec<_>>>()?;
    let corpus = Corpus::concat(tables);

    if corpus.is_empty() {
        warn!(
            "No fixations survived cleaning in {} session files",
            corpus.session_count()
        );
    }
    info!(
        "Processed {} fixations from {} session files",
        corpus.len(),
        corpus.session_count()
    );

    Ok(corpus)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn is_hidden(entry: &DirEntry) -> bool {
    is_hidden_path(entry.path())
}

fn is_hidden_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Keep the failing path when walkdir reports one.
fn walk_error(err: walkdir::Error) -> GazeError {
    let path = err.path().map(Path::to_path_buf);
    let source = std::io::Error::from(err);
    match path {
        Some(path) => GazeError::FileRead { path, source },
        None => GazeError::Io(source),
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "MEDIA_NAME,BPOGX,BPOGY,BPOGV";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn three_good_rows() -> Vec<&'static str> {
        vec![HEADER, "img1,0.2,0.3,1", "img1,0.4,0.6,1", "img1,0.9,0.9,1"]
    }

    fn coordinates(corpus: &Corpus) -> Vec<(f64, f64)> {
        corpus.records().iter().map(|r| (r.x, r.y)).collect()
    }

    // ── find_session_files ────────────────────────────────────────────────────

    #[test]
    fn test_find_new_layout_top_level_only() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "02_kh001_fixations.csv", &[HEADER]);
        write_csv(dir.path(), "01_kh001_fixations.CSV", &[HEADER]);
        write_csv(dir.path(), "notes.txt", &["x"]);
        write_csv(&dir.path().join("kh002"), "01_kh002_fixations.csv", &[HEADER]);

        let files = find_session_files(dir.path(), DataLayout::New).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["01_kh001_fixations.CSV", "02_kh001_fixations.csv"]);
    }

    #[test]
    fn test_find_legacy_layout_one_level_down() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh009_fixations.csv", &[HEADER]);
        write_csv(&dir.path().join("kh001"), "01_kh001_fixations.csv", &[HEADER]);
        write_csv(&dir.path().join("anything"), "02_kh002_fixations.csv", &[HEADER]);
        write_csv(
            &dir.path().join("kh003").join("deeper"),
            "01_kh003_fixations.csv",
            &[HEADER],
        );

        let files = find_session_files(dir.path(), DataLayout::Legacy).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("anything/02_kh002_fixations.csv"));
        assert!(files[1].ends_with("kh001/01_kh001_fixations.csv"));
    }

    #[test]
    fn test_find_skips_hidden_entries() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), ".01_kh001_fixations.csv", &[HEADER]);
        write_csv(&dir.path().join(".cache"), "01_kh002_fixations.csv", &[HEADER]);

        assert!(find_session_files(dir.path(), DataLayout::New).unwrap().is_empty());
        assert!(find_session_files(dir.path(), DataLayout::Legacy).unwrap().is_empty());
    }

    #[test]
    fn test_find_nonexistent_root() {
        let files =
            find_session_files(Path::new("/tmp/does-not-exist-gaze-root"), DataLayout::New)
                .unwrap();
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_dangling_link_is_error() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh001_fixations.csv", &[HEADER]);
        std::os::unix::fs::symlink(
            dir.path().join("missing.csv"),
            dir.path().join("02_kh002_fixations.csv"),
        )
        .unwrap();

        match find_session_files(dir.path(), DataLayout::New) {
            Err(GazeError::FileRead { path, .. }) => {
                assert!(path.ends_with("02_kh002_fixations.csv"))
            }
            other => panic!("expected FileRead error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_find_hidden_dangling_link_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh001_fixations.csv", &[HEADER]);
        std::os::unix::fs::symlink(
            dir.path().join("missing.csv"),
            dir.path().join(".02_kh002_fixations.csv"),
        )
        .unwrap();

        let files = find_session_files(dir.path(), DataLayout::New).unwrap();
        assert_eq!(files.len(), 1);
    }

    // ── process_corpus ────────────────────────────────────────────────────────

    #[test]
    fn test_new_layout_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "05_kh042_fixations.csv", &three_good_rows());

        let corpus = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap();

        assert_eq!(corpus.session_count(), 1);
        assert_eq!(corpus.group_sizes().len(), 1);
        let group = corpus.group("img1", "042");
        assert_eq!(group.len(), 3);
        assert_eq!(coordinates(&corpus), vec![(0.2, 0.3), (0.4, 0.6), (0.9, 0.9)]);
    }

    #[test]
    fn test_legacy_layout_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir.path().join("kh042"),
            "05_kh042_fixations.csv",
            &three_good_rows(),
        );

        let corpus =
            process_corpus(dir.path(), &CorpusOptions::new(DataLayout::Legacy)).unwrap();

        assert_eq!(corpus.len(), 3);
        assert!(corpus.group("img1", "042").is_empty());
        assert_eq!(corpus.group("block 05/img1", "042").len(), 3);
        assert_eq!(coordinates(&corpus), vec![(0.2, 0.3), (0.4, 0.6), (0.9, 0.9)]);
    }

    #[test]
    fn test_filter_then_prune_per_session() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "01_kh001_fixations.csv",
            &[
                HEADER,
                "a,0.1,0.1,1",
                "a,0.2,0.2,1",
                "a,0.5,0.5,1",
                "a,0.3,0.4,0",
                "b,0.1,0.1,1",
                "b,0.2,0.2,1",
                "b,0.3,0.3,1",
            ],
        );

        let corpus = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap();

        // Group "a" keeps only 2 valid rows and is pruned.
        assert!(corpus.group("a", "001").is_empty());
        assert_eq!(corpus.group("b", "001").len(), 3);
    }

    #[test]
    fn test_custom_minimum_fixations() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "01_kh001_fixations.csv",
            &[HEADER, "a,0.1,0.1,1", "a,0.2,0.2,1"],
        );

        let options = CorpusOptions::new(DataLayout::New).with_minimum_fixations(2);
        let corpus = process_corpus(dir.path(), &options).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_padded_media_name_kept_in_key() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "05_kh042_fixations.csv",
            &[
                HEADER,
                " img1 ,0.2,0.3,1",
                " img1 ,0.4,0.6,1",
                " img1 ,0.9,0.9,1",
            ],
        );

        let corpus = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap();
        assert_eq!(corpus.group(" img1 ", "042").len(), 3);
        assert!(corpus.group("img1", "042").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_session_entry_aborts_run() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh001_fixations.csv", &three_good_rows());
        std::os::unix::fs::symlink(
            dir.path().join("missing.csv"),
            dir.path().join("02_kh002_fixations.csv"),
        )
        .unwrap();

        let err = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap_err();
        assert!(matches!(err, GazeError::FileRead { .. }));
    }

    #[test]
    fn test_sessions_accumulate_same_key() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh001_fixations.csv", &three_good_rows());
        write_csv(dir.path(), "02_kh001_fixations.csv", &three_good_rows());

        let corpus = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap();

        assert_eq!(corpus.session_count(), 2);
        assert_eq!(corpus.group("img1", "001").len(), 6);
    }

    #[test]
    fn test_all_rows_pruned_still_returns_corpus() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh001_fixations.csv", &[HEADER, "a,0.1,0.1,1"]);

        let corpus = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap();
        assert_eq!(corpus.session_count(), 1);
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_no_files_is_no_data_found() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "readme.txt", &["nothing"]);

        let err = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap_err();
        assert!(matches!(err, GazeError::NoDataFound { .. }));
    }

    #[test]
    fn test_legacy_layout_ignores_top_level_files() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "05_kh042_fixations.csv", &three_good_rows());

        let err =
            process_corpus(dir.path(), &CorpusOptions::new(DataLayout::Legacy)).unwrap_err();
        assert!(matches!(err, GazeError::NoDataFound { .. }));
    }

    #[test]
    fn test_missing_root_is_no_data_found() {
        let err = process_corpus(
            Path::new("/tmp/does-not-exist-gaze-root"),
            &CorpusOptions::new(DataLayout::New),
        )
        .unwrap_err();
        assert!(matches!(err, GazeError::NoDataFound { .. }));
    }

    #[test]
    fn test_duration_request_fails_before_io() {
        let options = CorpusOptions::new(DataLayout::New).with_fixation_duration(true);
        let err = process_corpus(Path::new("/tmp/does-not-exist-gaze-root"), &options).unwrap_err();
        assert!(matches!(err, GazeError::NotImplemented(_)));
    }

    #[test]
    fn test_invalid_file_name_aborts_run() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh001_fixations.csv", &three_good_rows());
        write_csv(dir.path(), "summary.csv", &three_good_rows());

        let err = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap_err();
        assert!(matches!(err, GazeError::InvalidFileName { .. }));
    }

    #[test]
    fn test_schema_error_aborts_run() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "01_kh001_fixations.csv", &three_good_rows());
        write_csv(
            dir.path(),
            "02_kh001_fixations.csv",
            &["MEDIA_NAME,BPOGX,BPOGY", "a,0.1,0.1"],
        );

        let err = process_corpus(dir.path(), &CorpusOptions::new(DataLayout::New)).unwrap_err();
        assert!(matches!(err, GazeError::Schema { .. }));
    }

    #[test]
    fn test_invalid_name_checked_before_content() {
        let dir = TempDir::new().unwrap();
        // Unreadable content: the name check must fail first.
        write_csv(dir.path(), "broken.csv", &["not,a,valid", "\"unterminated"]);

        let err = process_session_file(
            &dir.path().join("broken.csv"),
            &CorpusOptions::new(DataLayout::New),
        )
        .unwrap_err();
        assert!(matches!(err, GazeError::InvalidFileName { .. }));
    }
}
