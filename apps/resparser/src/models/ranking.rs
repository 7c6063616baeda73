use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the ranking report. `rank` is NaN when no ranked institution was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub file_id: String,
    pub highest_degree: Option<String>,
    pub best_institution: Option<String>,
    #[serde(with = "nan_as_null")]
    pub rank: f64,
}

/// NaN travels as `null` so an unranked row reads back as NaN.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rank: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if rank.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(rank)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl RankingRow {
    /// Row recorded for a document that could not be processed at all.
    pub fn sentinel(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            highest_degree: None,
            best_institution: None,
            rank: f64::NAN,
        }
    }
}

/// Ascending rank, NaN last; file id breaks ties.
pub fn compare_rows(a: &RankingRow, b: &RankingRow) -> Ordering {
    match (a.rank.is_nan(), b.rank.is_nan()) {
        (false, false) => a.rank.partial_cmp(&b.rank).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
    .then_with(|| a.file_id.cmp(&b.file_id))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub rows: Vec<RankingRow>,
}

impl RankingReport {
    /// Sorts once; the only place ordering is decided.
    pub fn from_rows(mut rows: Vec<RankingRow>) -> Self {
        rows.sort_by(compare_rows);
        Self { rows }
    }
}

pub(crate) fn or_nan(value: Option<&str>) -> &str {
    value.unwrap_or("NaN")
}

pub(crate) fn format_rank(rank: f64) -> String {
    if rank.is_nan() {
        "NaN".to_string()
    } else {
        format!("{rank:.1}")
    }
}

impl fmt::Display for RankingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = ["", "file name", "highest degree", "best school", "rank"];
        let cells: Vec<[String; 5]> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                [
                    i.to_string(),
                    row.file_id.clone(),
                    or_nan(row.highest_degree.as_deref()).to_string(),
                    or_nan(row.best_institution.as_deref()).to_string(),
                    format_rank(row.rank),
                ]
            })
            .collect();

        let mut widths = headers.map(str::len);
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let header_line: Vec<String> = headers
            .iter()
            .zip(widths)
            .map(|(h, w)| format!("{h:>w$}"))
            .collect();
        writeln!(f, "{}", header_line.join("  "))?;
        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(c, w)| format!("{c:>w$}"))
                .collect();
            writeln!(f, "{}", line.join("  "))?;
        }
        Ok(())
    }
}
