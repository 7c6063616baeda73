use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A degree mention with the major and year found next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeInfo {
    pub token: String,
    pub major: Option<String>,
    pub year: Option<String>,
}

impl DegreeInfo {
    /// `token [major] [year]`, space-joined.
    pub fn display(&self) -> String {
        std::iter::once(self.token.as_str())
            .chain(self.major.as_deref())
            .chain(self.year.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Structured fields extracted from one resume. Built in a single pass by
/// `ResumeParser` and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub degrees: Vec<DegreeInfo>,
    /// Institution -> global rank (`None` = unranked).
    pub institutions: BTreeMap<String, Option<u32>>,
    pub skills: BTreeSet<String>,
    pub job_titles: BTreeSet<String>,
    pub companies: BTreeSet<String>,
    pub experience_months: u32,
    pub total_experience_years: f64,
    /// Matched date range -> context lines.
    pub experience_evidence: BTreeMap<String, Vec<String>>,
    pub page_count: Option<u32>,
}

impl ExtractedRecord {
    /// First degree found, rendered for display.
    pub fn highest_degree(&self) -> Option<String> {
        self.degrees.first().map(DegreeInfo::display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_display_skips_missing_parts() {
        let degree = DegreeInfo {
            token: "MS".to_string(),
            major: None,
            year: Some("2019".to_string()),
        };
        assert_eq!(degree.display(), "MS 2019");
    }

    #[test]
    fn test_highest_degree_is_first() {
        let record = ExtractedRecord {
            degrees: vec![
                DegreeInfo {
                    token: "PhD".to_string(),
                    major: Some("PHYSICS".to_string()),
                    year: None,
                },
                DegreeInfo {
                    token: "BS".to_string(),
                    major: None,
                    year: None,
                },
            ],
            ..Default::default()
        };
        assert_eq!(record.highest_degree().as_deref(), Some("PhD PHYSICS"));
        assert_eq!(ExtractedRecord::default().highest_degree(), None);
    }

    #[test]
    fn test_record_json_round_trip_keeps_fields() {
        let mut record = ExtractedRecord {
            name: Some("Jane Doe".to_string()),
            experience_months: 18,
            total_experience_years: 1.5,
            page_count: Some(2),
            ..Default::default()
        };
        record
            .institutions
            .insert("Reed College".to_string(), None);
        record
            .experience_evidence
            .insert("Jan 2018 - Jul 2019".to_string(), vec!["Acme".to_string()]);

        let json = serde_json::to_string(&record).unwrap();
        let back: ExtractedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
