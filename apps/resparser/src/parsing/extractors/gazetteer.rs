//! Gazetteer matching for skills and job titles, and ORG filtering for employers.

use std::collections::BTreeSet;

use super::dedup_capitalized;
use crate::nlp::{Annotation, EntityLabel};
use crate::reference::ReferenceTables;

/// One-grams (non-stop tokens) and multi-word noun chunks found in a vocabulary.
fn match_vocabulary(annotation: &Annotation, contains: impl Fn(&str) -> bool) -> BTreeSet<String> {
    let unigrams = annotation
        .tokens
        .iter()
        .filter(|t| !t.is_stop && !t.is_punct)
        .map(|t| t.text.as_str())
        .filter(|text| contains(&text.to_lowercase()));

    let chunks = annotation
        .noun_chunks
        .iter()
        .map(|c| c.as_str())
        .filter(|chunk| contains(&chunk.trim().to_lowercase()));

    dedup_capitalized(unigrams.chain(chunks))
}

pub fn extract_skills(annotation: &Annotation, reference: &ReferenceTables) -> BTreeSet<String> {
    match_vocabulary(annotation, |s| reference.is_skill(s))
}

pub fn extract_designations(
    annotation: &Annotation,
    reference: &ReferenceTables,
) -> BTreeSet<String> {
    match_vocabulary(annotation, |s| reference.is_job_title(s))
}

/// ORG entities that are neither known institutions nor skill names.
pub fn extract_companies(annotation: &Annotation, reference: &ReferenceTables) -> BTreeSet<String> {
    let companies = annotation
        .entities_with(&EntityLabel::Org)
        .map(|e| e.text.trim())
        .filter(|text| {
            let upper = text.to_uppercase();
            !reference.is_institution_upper(&upper) && !reference.is_skill_upper(&upper)
        });
    dedup_capitalized(companies)
}
