//! CSV loading for the reference tables. Any missing or unreadable file is fatal.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{ReferenceError, ReferenceTables};

const UNIVERSITIES_FILE: &str = "world-universities.csv";
const RANKINGS_FILE: &str = "university-rankings.csv";
const SKILLS_FILE: &str = "skills.csv";
const JOB_TITLES_FILE: &str = "jobtitles.csv";
const MAJORS_FILE: &str = "majorslist.csv";

/// Locations of the reference tables on disk.
#[derive(Debug, Clone)]
pub struct ReferencePaths {
    pub universities: PathBuf,
    pub rankings: PathBuf,
    pub skills: PathBuf,
    pub job_titles: PathBuf,
    pub majors: PathBuf,
}

impl ReferencePaths {
    /// Standard file names under `data_dir`, with an optional alternative skills table.
    pub fn in_dir(data_dir: &Path, skills_override: Option<&Path>) -> Self {
        Self {
            universities: data_dir.join(UNIVERSITIES_FILE),
            rankings: data_dir.join(RANKINGS_FILE),
            skills: skills_override
                .map(Path::to_path_buf)
                .unwrap_or_else(|| data_dir.join(SKILLS_FILE)),
            job_titles: data_dir.join(JOB_TITLES_FILE),
            majors: data_dir.join(MAJORS_FILE),
        }
    }
}

pub fn load_reference_tables(paths: &ReferencePaths) -> Result<ReferenceTables, ReferenceError> {
    let universities = read_column(&paths.universities, "name")?;
    let rankings = read_rankings(&paths.rankings)?;
    let skills = read_header_row(&paths.skills)?;
    let job_titles = read_column(&paths.job_titles, "Title")?;
    let majors = read_column(&paths.majors, "Major")?;

    let tables = ReferenceTables::new(universities, rankings, skills, job_titles, majors);
    info!(
        "Reference tables loaded: {} institutions, {} skills, {} job titles, {} majors",
        tables.institution_count(),
        tables.skill_count(),
        tables.job_title_count(),
        tables.majors().len()
    );
    Ok(tables)
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, ReferenceError> {
    let file = File::open(path).map_err(|source| ReferenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new().flexible(true).from_reader(file))
}

fn csv_error(path: &Path) -> impl Fn(csv::Error) -> ReferenceError + '_ {
    move |source| ReferenceError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn column_index(
    reader: &mut csv::Reader<File>,
    path: &Path,
    column: &str,
) -> Result<usize, ReferenceError> {
    reader
        .headers()
        .map_err(csv_error(path))?
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| ReferenceError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Non-empty values of one named column.
fn read_column(path: &Path, column: &str) -> Result<Vec<String>, ReferenceError> {
    let mut reader = open_reader(path)?;
    let idx = column_index(&mut reader, path, column)?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error(path))?;
        if let Some(value) = record.get(idx).map(str::trim).filter(|v| !v.is_empty()) {
            values.push(value.to_string());
        }
    }
    Ok(values)
}

/// The skills table keeps its vocabulary in the header row.
fn read_header_row(path: &Path) -> Result<Vec<String>, ReferenceError> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers().map_err(csv_error(path))?;
    Ok(headers
        .iter()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from)
        .collect())
}

fn read_rankings(path: &Path) -> Result<Vec<(String, Option<u32>)>, ReferenceError> {
    let mut reader = open_reader(path)?;
    let name_idx = column_index(&mut reader, path, "name")?;
    let rank_idx = column_index(&mut reader, path, "rank")?;

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error(path))?;
        let Some(name) = record.get(name_idx).map(str::trim).filter(|n| !n.is_empty()) else {
            continue;
        };
        let rank = match record.get(rank_idx).map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<u32>().map_err(|_| {
                ReferenceError::InvalidRank {
                    path: path.to_path_buf(),
                    row: row + 2,
                    value: value.to_string(),
                }
            })?),
        };
        rows.push((name.to_string(), rank));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_tables(dir: &Path) {
        fs::write(
            dir.join(UNIVERSITIES_FILE),
            "country,name,url\nUS,Stanford University,stanford.edu\nUS,Reed College,reed.edu\n",
        )
        .unwrap();
        fs::write(
            dir.join(RANKINGS_FILE),
            "name,rank\nStanford University,3\nReed College,\n",
        )
        .unwrap();
        fs::write(dir.join(SKILLS_FILE), "Rust,Python,Machine Learning\n").unwrap();
        fs::write(dir.join(JOB_TITLES_FILE), "Title\nSoftware Engineer\nManager\n").unwrap();
        fs::write(dir.join(MAJORS_FILE), "Major\nCOMPUTER SCIENCE\n").unwrap();
    }

    #[test]
    fn test_loads_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());

        let tables = load_reference_tables(&ReferencePaths::in_dir(dir.path(), None)).unwrap();
        assert_eq!(tables.institution_count(), 2);
        assert_eq!(tables.institution_rank("Stanford University"), Some(3));
        assert_eq!(tables.institution_rank("Reed College"), None);
        assert!(tables.is_skill("machine learning"));
        assert!(tables.is_job_title("software engineer"));
        assert_eq!(tables.majors(), &["COMPUTER SCIENCE".to_string()]);
    }

    #[test]
    fn test_skills_override_path() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        let custom = dir.path().join("my-skills.csv");
        fs::write(&custom, "Haskell,OCaml\n").unwrap();

        let tables =
            load_reference_tables(&ReferencePaths::in_dir(dir.path(), Some(&custom))).unwrap();
        assert!(tables.is_skill("haskell"));
        assert!(!tables.is_skill("rust"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_reference_tables(&ReferencePaths::in_dir(dir.path(), None)).unwrap_err();
        assert!(matches!(err, ReferenceError::Io { .. }));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        fs::write(dir.path().join(JOB_TITLES_FILE), "Role\nManager\n").unwrap();

        let err = load_reference_tables(&ReferencePaths::in_dir(dir.path(), None)).unwrap_err();
        assert!(matches!(err, ReferenceError::MissingColumn { .. }));
    }

    #[test]
    fn test_invalid_rank_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        fs::write(dir.path().join(RANKINGS_FILE), "name,rank\nMIT,first\n").unwrap();

        let err = load_reference_tables(&ReferencePaths::in_dir(dir.path(), None)).unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidRank { row: 2, .. }));
    }
}
