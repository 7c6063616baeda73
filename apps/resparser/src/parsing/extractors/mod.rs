//! Field extractors. Each one is a pure function of annotated text plus the
//! reference tables; "nothing found" is an empty value, never an error.

pub mod contact;
pub mod education;
pub mod experience;
pub mod gazetteer;
pub mod name;

use std::collections::BTreeSet;

pub use contact::{extract_email, extract_phone, PhonePattern};
pub use education::{best_institution, extract_degrees, extract_institutions};
pub use experience::extract_experience;
pub use gazetteer::{extract_companies, extract_designations, extract_skills};
pub use name::extract_name;

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Case-insensitive de-duplication followed by display capitalisation.
pub fn dedup_capitalized<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .iter()
        .map(|s| capitalize(s))
        .collect()
}
