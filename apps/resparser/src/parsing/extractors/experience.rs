//! Experience duration from `Month Year - Month Year` ranges.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::debug;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let date = format!(r"{MONTH}\.?,?\s*(?:19|20)\d{{2}}");
    Regex::new(&format!(
        r"(?i)\b(?P<start>{date})\s*(?:to|[^\w\s]+)\s*(?P<end>{date}|present|current)\b"
    ))
    .unwrap()
});

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceSummary {
    pub months: u32,
    /// Matched range text -> surrounding lines.
    pub evidence: BTreeMap<String, Vec<String>>,
}

impl ExperienceSummary {
    /// Whole months as years, rounded to two decimals.
    pub fn years(&self) -> f64 {
        (f64::from(self.months) / 12.0 * 100.0).round() / 100.0
    }

    /// Every evidence line, in key order.
    pub fn evidence_text(&self) -> String {
        self.evidence
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Sums every date range in the text. `present`/`current` resolve to `today`;
/// a range that cannot be parsed, or runs backwards, contributes nothing.
pub fn extract_experience(text: &str, today: NaiveDate) -> ExperienceSummary {
    let lines: Vec<&str> = text.lines().collect();
    let mut summary = ExperienceSummary::default();

    for (index, line) in lines.iter().enumerate() {
        for caps in DATE_RANGE_RE.captures_iter(line) {
            let matched = &caps[0];
            summary.months += months_between(&caps["start"], &caps["end"], today);

            let mut context = Vec::new();
            let remainder = line.replace(matched, "");
            if !remainder.trim().is_empty() {
                context.push(remainder.trim().to_string());
            }
            if let Some(prev) = index.checked_sub(1).and_then(|i| lines.get(i)) {
                context.push(prev.to_string());
            }
            if let Some(next) = lines.get(index + 1) {
                context.push(next.to_string());
            }
            summary.evidence.insert(matched.to_string(), context);
        }
    }

    summary
}

fn months_between(start: &str, end: &str, today: NaiveDate) -> u32 {
    let Some(start) = parse_month_year(start) else {
        debug!("Unparseable range start '{start}'");
        return 0;
    };
    let end = match end.trim().to_lowercase().as_str() {
        "present" | "current" => Some(today),
        _ => parse_month_year(end),
    };
    let Some(end) = end else {
        debug!("Unparseable range end");
        return 0;
    };

    let months = (end.year() * 12 + end.month() as i32) - (start.year() * 12 + start.month() as i32);
    u32::try_from(months).unwrap_or_else(|_| {
        debug!("Range ends before it starts: {start} .. {end}");
        0
    })
}

/// `Sept. 2019`, `january 2020`, `Mar,2018` -> first day of that month.
fn parse_month_year(text: &str) -> Option<NaiveDate> {
    let month_word: String = text.chars().take_while(|c| c.is_alphabetic()).collect();
    let abbreviation = month_word.get(..3)?.to_lowercase();
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbreviation)?;

    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    let year: i32 = digits.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month as u32 + 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_longer_range_counts_more_months() {
        let one_year = extract_experience("Engineer, Jan 2019 - Jan 2020", today());
        let two_years = extract_experience("Engineer, Jan 2019 - Jan 2021", today());
        assert_eq!(one_year.months, 12);
        assert_eq!(two_years.months, 24);
    }

    #[test]
    fn test_present_and_current_match_explicit_end() {
        let explicit = extract_experience("Mar 2022 - Jun 2024", today());
        let present = extract_experience("Mar 2022 - Present", today());
        let current = extract_experience("March 2022 to current", today());
        assert_eq!(explicit.months, 27);
        assert_eq!(present.months, explicit.months);
        assert_eq!(current.months, explicit.months);
    }

    #[test]
    fn test_long_month_names_and_to_separator() {
        let summary = extract_experience("September 2015 to February 2016", today());
        assert_eq!(summary.months, 5);
    }

    #[test]
    fn test_ranges_are_summed() {
        let text = "Acme Inc\nJan 2018 - Jan 2019\nGlobex LLC\nFeb 2019 – Aug 2019";
        let summary = extract_experience(&crate::document::normalize_text(text), today());
        assert_eq!(summary.months, 18);
        assert_eq!(summary.years(), 1.5);
        assert_eq!(summary.evidence.len(), 2);
    }

    #[test]
    fn test_evidence_holds_remainder_and_neighbours() {
        let text = "Acme Inc\nSoftware Engineer Jan 2018 - Jan 2019\nBuilt things";
        let summary = extract_experience(text, today());
        assert_eq!(
            summary.evidence.get("Jan 2018 - Jan 2019").unwrap(),
            &vec![
                "Software Engineer".to_string(),
                "Acme Inc".to_string(),
                "Built things".to_string()
            ]
        );
    }

    #[test]
    fn test_first_line_has_no_previous_context() {
        let summary = extract_experience("Jan 2018 - Jan 2019", today());
        assert!(summary.evidence.get("Jan 2018 - Jan 2019").unwrap().is_empty());
    }

    #[test]
    fn test_reversed_range_contributes_zero() {
        let summary = extract_experience("Jan 2020 - Jan 2019", today());
        assert_eq!(summary.months, 0);
        assert_eq!(summary.evidence.len(), 1);
    }

    #[test]
    fn test_invalid_month_pair_contributes_zero() {
        assert_eq!(months_between("Foo 2019", "Jan 2020", today()), 0);
        assert_eq!(months_between("Jan 2019", "Bar 2020", today()), 0);
    }

    #[test]
    fn test_no_ranges() {
        let summary = extract_experience("Worked at Acme for a while", today());
        assert_eq!(summary, ExperienceSummary::default());
        assert_eq!(summary.years(), 0.0);
    }

    #[test]
    fn test_parse_month_year_variants() {
        let expected = NaiveDate::from_ymd_opt(2019, 9, 1);
        assert_eq!(parse_month_year("Sept. 2019"), expected);
        assert_eq!(parse_month_year("sep,2019"), expected);
        assert_eq!(parse_month_year("SEPTEMBER 2019"), expected);
    }
}
