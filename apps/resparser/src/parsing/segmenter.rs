//! Section Segmenter: partitions raw resume text into labelled sections.
//!
//! Headings are detected line by line against the configured heading vocabulary.
//! Lines before the first heading land in `Beginning`; a repeated heading of the
//! same kind keeps appending to the bucket it opened the first time.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::reference::ReferenceTables;

/// A labelled region of a resume.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Beginning,
    Profile,
    Education,
    Experience,
    Skills,
    Other(Cow<'static, str>),
}

impl SectionKind {
    pub const fn other(name: &'static str) -> Self {
        SectionKind::Other(Cow::Borrowed(name))
    }

    pub fn label(&self) -> &str {
        match self {
            SectionKind::Beginning => "beginning",
            SectionKind::Profile => "profile",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Other(name) => name,
        }
    }
}

/// A logical field whose extractor reads a fixed, ordered chain of sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Profile,
    Education,
    Skills,
    Experience,
}

const PROFILE_CHAIN: &[SectionKind] = &[SectionKind::Beginning, SectionKind::Profile];
const EDUCATION_CHAIN: &[SectionKind] = &[
    SectionKind::Education,
    SectionKind::other("publications"),
    SectionKind::other("certifications"),
];
const SKILLS_CHAIN: &[SectionKind] = &[
    SectionKind::Skills,
    SectionKind::other("projects"),
    SectionKind::Experience,
];
const EXPERIENCE_CHAIN: &[SectionKind] =
    &[SectionKind::Experience, SectionKind::other("projects")];

impl FieldKind {
    /// Sections consulted for this field, in priority order.
    pub fn section_chain(self) -> &'static [SectionKind] {
        match self {
            FieldKind::Profile => PROFILE_CHAIN,
            FieldKind::Education => EDUCATION_CHAIN,
            FieldKind::Skills => SKILLS_CHAIN,
            FieldKind::Experience => EXPERIENCE_CHAIN,
        }
    }
}

/// Ordered section buckets, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sections {
    buckets: Vec<(SectionKind, Vec<String>)>,
}

impl Sections {
    pub fn get(&self, kind: &SectionKind) -> Option<&[String]> {
        self.buckets
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionKind, &[String])> {
        self.buckets.iter().map(|(k, l)| (k, l.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Lines of every section in the field's chain, chain order, joined by newlines.
    pub fn field_text(&self, field: FieldKind) -> String {
        field
            .section_chain()
            .iter()
            .filter_map(|kind| self.get(kind))
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn bucket_mut(&mut self, kind: &SectionKind) -> &mut Vec<String> {
        let idx = match self.buckets.iter().position(|(k, _)| k == kind) {
            Some(idx) => idx,
            None => {
                self.buckets.push((kind.clone(), Vec::new()));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[idx].1
    }
}

/// Splits raw text into sections.
///
/// Every non-blank line (trimmed) ends up in exactly one bucket; a heading line
/// opens its section and is kept as that section's first line.
pub fn segment(raw_text: &str, reference: &ReferenceTables) -> Sections {
    let mut sections = Sections::default();
    let mut current = SectionKind::Beginning;

    for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(kind) = detect_heading(line, reference) {
            current = kind;
        }
        sections.bucket_mut(&current).push(line.to_string());
    }

    sections
}

/// Returns the section a heading line opens, if the line is a heading.
fn detect_heading(line: &str, reference: &ReferenceTables) -> Option<SectionKind> {
    // Single-character lines are tested literally, never tokenised.
    if line.chars().count() == 1 {
        return reference.heading_kind(line).cloned();
    }

    line.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| c.is_ascii_punctuation())
                .to_lowercase()
        })
        .find_map(|word| reference.heading_kind(&word).cloned())
}
