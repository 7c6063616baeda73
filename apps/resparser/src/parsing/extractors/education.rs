use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::record::DegreeInfo;
use crate::reference::ReferenceTables;

// Letters may touch the year (`May2018`); other digits may not.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)((?:19|20)\d{2})(?:\D|$)").unwrap());

/// Degrees mentioned in a sentence stream, in order of appearance.
///
/// A word matches when its upper-cased form (trailing punctuation removed) is a
/// known abbreviation and the word as written is not a stop word, so `me` is
/// skipped while `ME` counts. The matched sentence plus the next one form the
/// context searched for a major and a graduation year. Repeated abbreviations
/// produce repeated entries.
pub fn extract_degrees(sentences: &[String], reference: &ReferenceTables) -> Vec<DegreeInfo> {
    let mut degrees = Vec::new();

    for (index, sentence) in sentences.iter().enumerate() {
        for word in sentence.split_whitespace() {
            let word = word
                .trim_start_matches('(')
                .trim_end_matches(|c: char| c.is_ascii_punctuation());
            if word.is_empty()
                || !reference.is_degree_abbreviation(&word.to_uppercase())
                || reference.is_stop_word(word)
            {
                continue;
            }

            let context = match sentences.get(index + 1) {
                Some(next) => format!("{sentence} {next}"),
                None => sentence.clone(),
            };
            degrees.push(DegreeInfo {
                token: word.to_string(),
                major: find_major(&context, reference),
                year: find_year(&context),
            });
        }
    }

    degrees
}

fn find_year(context: &str) -> Option<String> {
    YEAR_RE
        .captures(context)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Longest known major contained in the context, case-insensitively.
fn find_major(context: &str, reference: &ReferenceTables) -> Option<String> {
    let upper = context.to_uppercase();
    reference
        .majors()
        .iter()
        .filter(|major| upper.contains(&major.to_uppercase()))
        .fold(None, |best: Option<&String>, major| match best {
            Some(b) if b.len() >= major.len() => Some(b),
            _ => Some(major),
        })
        .cloned()
}

/// Institutions named anywhere in the sentences, with their rank when ranked.
pub fn extract_institutions(
    sentences: &[String],
    reference: &ReferenceTables,
) -> BTreeMap<String, Option<u32>> {
    let mut found = BTreeMap::new();
    for sentence in sentences {
        let upper = sentence.to_uppercase();
        for (key, institution) in reference.institutions() {
            if upper.contains(key) {
                found.insert(institution.name.clone(), institution.rank);
            }
        }
    }
    found
}

/// The most prestigious institution: lowest rank among ranked ones, otherwise
/// the first unranked one. Ties resolve to the alphabetically first name.
pub fn best_institution(
    institutions: &BTreeMap<String, Option<u32>>,
) -> Option<(&str, Option<u32>)> {
    let ranked = institutions
        .iter()
        .filter_map(|(name, rank)| rank.map(|r| (name.as_str(), r)))
        .min_by_key(|(_, rank)| *rank)
        .map(|(name, rank)| (name, Some(rank)));

    ranked.or_else(|| {
        institutions
            .keys()
            .next()
            .map(|name| (name.as_str(), None))
    })
}
