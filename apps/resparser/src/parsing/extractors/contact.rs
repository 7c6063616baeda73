use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^@|\s]+@[^@]+\.[^@|\s]+").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?\d{3}\D{0,3}\d{3}\D{0,3}\d{4}").unwrap());

/// First e-mail address in the text.
///
/// The pattern can run across spaces, so only the first whitespace-delimited
/// token of the match is kept, with trailing punctuation trimmed.
pub fn extract_email(text: &str) -> Option<String> {
    let matched = EMAIL_RE.find(text)?.as_str();
    let email = matched
        .split_whitespace()
        .next()?
        .trim_end_matches([';', ',', '.', ')']);
    (!email.is_empty()).then(|| email.to_string())
}

/// Phone pattern, either the default or a caller-supplied override.
#[derive(Debug, Clone)]
pub enum PhonePattern {
    Default,
    Custom(Regex),
}

impl PhonePattern {
    fn regex(&self) -> &Regex {
        match self {
            PhonePattern::Default => &PHONE_RE,
            PhonePattern::Custom(re) => re,
        }
    }
}

/// First phone number. When the pattern has capture groups, the groups that
/// took part in the match are concatenated; otherwise the whole match is used.
pub fn extract_phone(text: &str, pattern: &PhonePattern) -> Option<String> {
    let re = pattern.regex();
    let caps = re.captures(text)?;
    let number = if re.captures_len() > 1 {
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect::<String>()
    } else {
        caps.get(0)?.as_str().to_string()
    };
    (!number.is_empty()).then_some(number)
}
