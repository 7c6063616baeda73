//! Reference Data Store: immutable lookup tables shared by every extractor.
//!
//! Loaded once at startup (`loader::load_reference_tables`) and carried as
//! `Arc<ReferenceTables>`; nothing mutates it afterwards.

pub mod constants;
pub mod loader;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use thiserror::Error;

use crate::parsing::segmenter::SectionKind;

pub use loader::{load_reference_tables, ReferencePaths};

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("cannot read reference table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed reference table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("reference table {path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("reference table {path}, row {row}: invalid rank '{value}'")]
    InvalidRank {
        path: PathBuf,
        row: usize,
        value: String,
    },
}

/// A known institution: display name plus its global rank, if ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct Institution {
    pub name: String,
    pub rank: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    /// Every known institution, keyed by upper-cased name.
    institutions: HashMap<String, Institution>,
    /// Upper-cased institution names in load order, for deterministic scans.
    institution_scan: Vec<String>,
    skills: HashSet<String>,
    skills_upper: HashSet<String>,
    job_titles: HashSet<String>,
    majors: Vec<String>,
    headings: HashMap<String, SectionKind>,
    degree_abbreviations: HashSet<String>,
    stop_words: HashSet<String>,
}

impl ReferenceTables {
    /// Builds the store from already-loaded table contents plus the built-in vocabularies.
    ///
    /// Ranked names are institutions too; a ranking entry wins over a plain listing.
    pub fn new(
        universities: Vec<String>,
        rankings: Vec<(String, Option<u32>)>,
        skills: Vec<String>,
        job_titles: Vec<String>,
        majors: Vec<String>,
    ) -> Self {
        let mut institutions: HashMap<String, Institution> = HashMap::new();
        let mut institution_scan = Vec::new();

        let listed = universities.into_iter().map(|name| (name, None));
        for (name, rank) in listed.chain(rankings) {
            let name = name.trim().to_string();
            if name.is_empty() {
                continue;
            }
            let key = name.to_uppercase();
            match institutions.get_mut(&key) {
                Some(existing) => {
                    if rank.is_some() {
                        existing.rank = rank;
                    }
                }
                None => {
                    institution_scan.push(key.clone());
                    institutions.insert(key, Institution { name, rank });
                }
            }
        }

        let skills: HashSet<String> = skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let skills_upper = skills.iter().map(|s| s.to_uppercase()).collect();

        Self {
            institutions,
            institution_scan,
            skills,
            skills_upper,
            job_titles: job_titles
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            majors: majors
                .into_iter()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            headings: constants::SECTION_HEADINGS
                .iter()
                .map(|(word, kind)| (word.to_string(), kind.clone()))
                .collect(),
            degree_abbreviations: constants::DEGREE_ABBREVIATIONS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            stop_words: constants::STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Section opened by a heading word (already lower-cased), if any.
    pub fn heading_kind(&self, word: &str) -> Option<&SectionKind> {
        self.headings.get(word)
    }

    /// Institutions in load order.
    pub fn institutions(&self) -> impl Iterator<Item = (&str, &Institution)> {
        self.institution_scan
            .iter()
            .filter_map(|key| self.institutions.get(key).map(|i| (key.as_str(), i)))
    }

    pub fn is_institution_upper(&self, upper: &str) -> bool {
        self.institutions.contains_key(upper)
    }

    pub fn is_skill(&self, lower: &str) -> bool {
        self.skills.contains(lower)
    }

    pub fn is_skill_upper(&self, upper: &str) -> bool {
        self.skills_upper.contains(upper)
    }

    pub fn is_job_title(&self, lower: &str) -> bool {
        self.job_titles.contains(lower)
    }

    pub fn majors(&self) -> &[String] {
        &self.majors
    }

    /// Exact, case-sensitive membership.
    pub fn is_degree_abbreviation(&self, upper: &str) -> bool {
        self.degree_abbreviations.contains(upper)
    }

    /// Exact, case-sensitive membership; the list is lower-case.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    pub fn institution_count(&self) -> usize {
        self.institutions.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn job_title_count(&self) -> usize {
        self.job_titles.len()
    }
}

#[cfg(test)]
impl ReferenceTables {
    pub fn institution_rank(&self, name: &str) -> Option<u32> {
        self.institutions
            .get(&name.to_uppercase())
            .and_then(|i| i.rank)
    }

    /// Small in-memory store shared by unit tests across the crate.
    pub fn sample() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self::new(
            owned(&[
                "Stanford University",
                "Ohio State University",
                "Springfield Community College",
            ]),
            vec![
                ("Massachusetts Institute of Technology".to_string(), Some(1)),
                ("Stanford University".to_string(), Some(3)),
                ("Ohio State University".to_string(), Some(5)),
            ],
            owned(&["rust", "python", "machine learning", "sql", "docker"]),
            owned(&["software engineer", "engineer", "data scientist", "manager"]),
            owned(&["COMPUTER SCIENCE", "SCIENCE", "PHYSICS", "MATHEMATICS"]),
        )
    }
}
