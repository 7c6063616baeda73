//! Ranking aggregator: one row per resume in a directory, sorted by the rank
//! of the best institution each candidate attended.
//!
//! Documents are independent, so the batch fans out over the rayon pool. The only
//! shared mutable state is the progress counter, which feeds the log line and
//! nothing else; ordering is decided by the single sort in `RankingReport::from_rows`.

pub mod export;

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::ranking::{RankingReport, RankingRow};
use crate::parsing::extractors::best_institution;
use crate::parsing::ResumeParser;

pub use export::save_report;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("cannot read resume directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write ranking report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Ranks every regular file in `dir`. `multiproc` only changes throughput:
/// both modes run the same per-document function and produce the same report.
pub fn rank_directory(
    dir: &Path,
    parser: &ResumeParser,
    multiproc: bool,
) -> Result<RankingReport, RankingError> {
    let files = list_files(dir)?;
    let total = files.len();
    let processed = AtomicUsize::new(0);

    info!(
        "Start calculating ranks for {total} files in {} (multiproc: {multiproc})",
        dir.display()
    );
    let started = Instant::now();

    let rank = |path: &PathBuf| {
        let (row, elapsed) = rank_document(path, parser);
        let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
        info!("file processed: {done}/{total} --- {elapsed:.2} seconds ---");
        row
    };

    let rows: Vec<RankingRow> = if multiproc {
        files.par_iter().map(rank).collect()
    } else {
        files.iter().map(rank).collect()
    };

    let report = RankingReport::from_rows(rows);
    info!(
        "Ranked {} files in {:.2} seconds",
        report.rows.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(report)
}

/// Sorted list of the regular files directly inside `dir`, symlinks resolved.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, RankingError> {
    let read_dir_error = |source| RankingError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name up to its first dot.
fn file_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

/// The document's row and the seconds spent on it. A document that cannot be
/// read, or whose parse panics, gets a sentinel row.
fn rank_document(path: &Path, parser: &ResumeParser) -> (RankingRow, f64) {
    let started = Instant::now();
    let file_id = file_id(path);

    let record = match panic::catch_unwind(AssertUnwindSafe(|| parser.parse_path(path))) {
        Ok(Ok(record)) => record,
        Ok(Err(e)) => {
            warn!("Skipping {}: {e}", path.display());
            return (RankingRow::sentinel(file_id), started.elapsed().as_secs_f64());
        }
        Err(_) => {
            warn!("Parser panicked on {}, recording an empty row", path.display());
            return (RankingRow::sentinel(file_id), started.elapsed().as_secs_f64());
        }
    };

    let (best_institution, rank) = match best_institution(&record.institutions) {
        Some((name, rank)) => (Some(name.to_string()), rank.map_or(f64::NAN, f64::from)),
        None => (None, f64::NAN),
    };

    let row = RankingRow {
        file_id,
        highest_degree: record.highest_degree(),
        best_institution,
        rank,
    };
    (row, started.elapsed().as_secs_f64())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::document::docx_bytes;
    use crate::nlp::{HeuristicPipeline, NoEntityModel};
    use crate::parsing::extractors::PhonePattern;
    use crate::reference::ReferenceTables;

    fn parser() -> ResumeParser {
        let reference = Arc::new(ReferenceTables::sample());
        let pipeline = Arc::new(HeuristicPipeline::new(reference.stop_words().clone()));
        ResumeParser::new(reference, pipeline, Arc::new(NoEntityModel), PhonePattern::Default)
    }

    fn resume_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, lines: &[&str]| {
            std::fs::write(dir.path().join(name), docx_bytes(lines)).unwrap();
        };
        // Alphabetically first, but has no institution.
        write("aaron.docx", &["Aaron Black", "Experience", "Acme Inc"]);
        write(
            "bob.docx",
            &["Bob Jones", "Education", "BS Physics", "Ohio State University"],
        );
        write(
            "alice.resume.docx",
            &["Alice Smith", "Education", "MS Computer Science", "Stanford University 2018"],
        );
        dir
    }

    #[test]
    fn test_rows_sorted_by_rank_with_nan_last() {
        let dir = resume_dir();
        let report = rank_directory(dir.path(), &parser(), true).unwrap();

        let ids: Vec<&str> = report.rows.iter().map(|r| r.file_id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob", "aaron"]);

        let alice = &report.rows[0];
        assert_eq!(alice.highest_degree.as_deref(), Some("MS COMPUTER SCIENCE 2018"));
        assert_eq!(alice.best_institution.as_deref(), Some("Stanford University"));
        assert_eq!(alice.rank, 3.0);

        let aaron = &report.rows[2];
        assert!(aaron.rank.is_nan());
        assert!(aaron.best_institution.is_none());
        assert!(aaron.highest_degree.is_none());
    }

    #[test]
    fn test_sequential_and_parallel_reports_match() {
        let dir = resume_dir();
        let parser = parser();
        let parallel = rank_directory(dir.path(), &parser, true).unwrap();
        let sequential = rank_directory(dir.path(), &parser, false).unwrap();

        // NaN != NaN, so compare the rendered tables.
        assert_eq!(parallel.to_string(), sequential.to_string());
        assert_eq!(parallel.rows.len(), 3);
    }

    #[test]
    fn test_unsupported_files_still_get_a_row() {
        let dir = resume_dir();
        std::fs::write(dir.path().join("notes.txt"), "MS Stanford University").unwrap();
        std::fs::create_dir(dir.path().join("archive")).unwrap();

        let report = rank_directory(dir.path(), &parser(), false).unwrap();
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows.last().unwrap().file_id, "notes");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_resume_is_ranked() {
        let source = resume_dir();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(
            source.path().join("bob.docx"),
            dir.path().join("carol.docx"),
        )
        .unwrap();

        let report = rank_directory(dir.path(), &parser(), false).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].file_id, "carol");
        assert_eq!(report.rows[0].rank, 5.0);
    }

    #[test]
    fn test_unreadable_document_gets_sentinel_row() {
        let dir = tempfile::tempdir().unwrap();
        let (row, elapsed) = rank_document(&dir.path().join("gone.pdf"), &parser());
        assert_eq!(row.file_id, "gone");
        assert!(row.rank.is_nan());
        assert!(elapsed >= 0.0);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = rank_directory(&dir.path().join("nope"), &parser(), true);
        assert!(matches!(result, Err(RankingError::ReadDir { .. })));
    }

    #[test]
    fn test_file_id_stops_at_first_dot() {
        assert_eq!(file_id(Path::new("/tmp/jane.doe.pdf")), "jane");
        assert_eq!(file_id(Path::new("bob")), "bob");
    }
}
