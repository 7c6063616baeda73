use std::path::{Path, PathBuf};

use tracing::info;

use super::RankingError;
use crate::models::ranking::{format_rank, or_nan, RankingReport};

pub const REPORT_FILE_NAME: &str = "ranking.csv";

/// Writes `ranking.csv` into `dir`: a leading unnamed row-index column, then
/// `file name, highest degree, best school, rank`. Missing values are `NaN`.
pub fn save_report(report: &RankingReport, dir: &Path) -> Result<PathBuf, RankingError> {
    let path = dir.join(REPORT_FILE_NAME);
    let write_error = |source| RankingError::Write {
        path: path.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(&path).map_err(write_error)?;
    writer
        .write_record(["", "file name", "highest degree", "best school", "rank"])
        .map_err(write_error)?;
    for (index, row) in report.rows.iter().enumerate() {
        writer
            .write_record([
                index.to_string().as_str(),
                row.file_id.as_str(),
                or_nan(row.highest_degree.as_deref()),
                or_nan(row.best_institution.as_deref()),
                format_rank(row.rank).as_str(),
            ])
            .map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|e| write_error(csv::Error::from(e)))?;

    info!("Ranking saved to {}", path.display());
    Ok(path)
}
