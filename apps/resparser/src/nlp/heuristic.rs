//! Rule-based tagger bundled with the service.
//!
//! Capitalisation stands in for part-of-speech tags, runs of content words stand in
//! for noun phrases, and organisation suffixes stand in for an ORG classifier.

use std::collections::HashSet;

use super::{Annotation, Entity, EntityLabel, NlpPipeline, Token};

const LEADING_PUNCT: &[char] = &['(', '[', '{', '"', '\'', '*', '•', '-'];
const TRAILING_PUNCT: &[char] = &[',', ';', ':', '!', '?', '.', ')', ']', '}', '"', '\''];

/// Words that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &["dr", "mr", "mrs", "ms", "jr", "sr", "st", "vs", "no", "inc", "co"];

const ORG_SUFFIXES: &[&str] = &[
    "inc", "incorporated", "corp", "corporation", "llc", "llp", "ltd", "limited", "company",
    "co", "technologies", "technology", "systems", "solutions", "labs", "laboratories",
    "group", "bank", "consulting", "software", "partners", "holdings", "services",
    "foundation", "university", "college", "institute", "school", "agency", "associates",
];

const ORG_CONNECTORS: &[&str] = &["of", "and", "&", "for"];

pub struct HeuristicPipeline {
    stop_words: HashSet<String>,
}

impl HeuristicPipeline {
    pub fn new(stop_words: HashSet<String>) -> Self {
        Self { stop_words }
    }

    fn is_stop(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    fn tokenize(&self, sentence: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for word in sentence.split_whitespace() {
            let core_start = word.trim_start_matches(LEADING_PUNCT);
            for c in word[..word.len() - core_start.len()].chars() {
                tokens.push(punct_token(c));
            }
            let core = core_start.trim_end_matches(TRAILING_PUNCT);
            if !core.is_empty() {
                tokens.push(Token {
                    text: core.to_string(),
                    is_stop: self.is_stop(core),
                    is_punct: core.chars().all(|c| !c.is_alphanumeric()),
                    is_proper: is_proper_noun(core) && !self.is_stop(core),
                });
            }
            for c in core_start[core.len()..].chars() {
                tokens.push(punct_token(c));
            }
        }
        tokens
    }
}

fn punct_token(c: char) -> Token {
    Token {
        text: c.to_string(),
        is_stop: false,
        is_punct: true,
        is_proper: false,
    }
}

/// Title-case or all-caps alphabetic words.
fn is_proper_noun(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    let letters_only = word
        .chars()
        .all(|c| c.is_alphabetic() || c == '-' || c == '\'' || c == '.');
    letters_only && word.chars().filter(|c| c.is_alphabetic()).count() >= 2
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Splits one line at sentence-final punctuation followed by whitespace.
fn split_sentences(line: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let words: Vec<&str> = line.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);

        let is_last = i + 1 == words.len();
        if !is_last && ends_sentence(word) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

fn ends_sentence(word: &str) -> bool {
    if word.ends_with(['!', '?']) {
        return true;
    }
    let Some(stem) = word.strip_suffix('.') else {
        return false;
    };
    // B.S. / Ph.D. / single initials / known abbreviations
    let is_abbreviation = stem.contains('.')
        || stem.chars().filter(|c| c.is_alphabetic()).count() <= 1
        || ABBREVIATIONS.contains(&stem.to_lowercase().as_str());
    !is_abbreviation
}

impl HeuristicPipeline {
    fn noun_chunks(&self, tokens: &[Token]) -> Vec<String> {
        let mut chunks = Vec::new();
        for run in tokens.split(|t| t.is_stop || t.is_punct) {
            for n in [2, 3] {
                for window in run.windows(n) {
                    chunks.push(
                        window
                            .iter()
                            .map(|t| t.text.as_str())
                            .collect::<Vec<_>>()
                            .join(" "),
                    );
                }
            }
        }
        chunks
    }

    fn org_entities(&self, tokens: &[Token]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        let mut flush = |run: &mut Vec<&str>| {
            while run
                .last()
                .is_some_and(|w| ORG_CONNECTORS.contains(&w.to_lowercase().as_str()))
            {
                run.pop();
            }
            let has_suffix = run
                .iter()
                .any(|w| ORG_SUFFIXES.contains(&w.to_lowercase().as_str()));
            if has_suffix && run.len() >= 2 {
                entities.push(Entity::new(EntityLabel::Org, run.join(" ")));
            }
            run.clear();
        };

        for token in tokens {
            let word = token.text.as_str();
            let connector =
                !run.is_empty() && ORG_CONNECTORS.contains(&word.to_lowercase().as_str());
            if !token.is_punct && (is_capitalized(word) || connector) {
                run.push(word);
            } else {
                flush(&mut run);
            }
        }
        flush(&mut run);
        entities
    }

    /// A short, all-proper-noun opening line reads as the candidate's name.
    fn person_entity(&self, first_sentence: &[Token]) -> Option<Entity> {
        let words: Vec<&Token> = first_sentence.iter().filter(|t| !t.is_punct).collect();
        if (2..=3).contains(&words.len()) && words.iter().all(|t| t.is_proper) {
            let text = words
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            return Some(Entity::new(EntityLabel::Person, text));
        }
        None
    }
}

impl NlpPipeline for HeuristicPipeline {
    fn annotate(&self, text: &str) -> Annotation {
        let sentences: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .flat_map(split_sentences)
            .collect();

        let mut annotation = Annotation::default();
        for (i, sentence) in sentences.iter().enumerate() {
            let tokens = self.tokenize(sentence);
            if i == 0 {
                annotation.entities.extend(self.person_entity(&tokens));
            }
            annotation.noun_chunks.extend(self.noun_chunks(&tokens));
            annotation.entities.extend(self.org_entities(&tokens));
            annotation.tokens.extend(tokens);
        }
        annotation.sentences = sentences;
        annotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceTables;

    fn pipeline() -> HeuristicPipeline {
        HeuristicPipeline::new(ReferenceTables::sample().stop_words().clone())
    }

    #[test]
    fn test_sentences_split_on_lines_and_punctuation() {
        let annotation = pipeline().annotate("Jane Doe\nI build systems. I ship them!  \n\nDone");
        assert_eq!(
            annotation.sentences,
            vec!["Jane Doe", "I build systems.", "I ship them!", "Done"]
        );
    }

    #[test]
    fn test_degree_abbreviations_do_not_end_sentences() {
        let annotation = pipeline().annotate("B.S. Computer Science, Ph.D. candidate. Next");
        assert_eq!(
            annotation.sentences,
            vec!["B.S. Computer Science, Ph.D. candidate.", "Next"]
        );
    }

    #[test]
    fn test_tokens_split_punctuation() {
        let tokens = pipeline().tokenize("(Rust, C++ and B.S.)");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["(", "Rust", ",", "C++", "and", "B.S", ".", ")"]);
        assert!(tokens[4].is_stop);
        assert!(tokens[1].is_proper);
    }

    #[test]
    fn test_noun_chunks_are_bi_and_tri_grams_of_content_runs() {
        let annotation = pipeline().annotate("deep machine learning for data");
        assert!(annotation.noun_chunks.contains(&"machine learning".to_string()));
        assert!(annotation
            .noun_chunks
            .contains(&"deep machine learning".to_string()));
        assert!(!annotation.noun_chunks.iter().any(|c| c.contains("for")));
    }

    #[test]
    fn test_org_entities_need_suffix() {
        let annotation =
            pipeline().annotate("Engineer at Acme Technologies Inc. Then Google, then Bank of America");
        let orgs: Vec<&str> = annotation
            .entities_with(&EntityLabel::Org)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(orgs, vec!["Acme Technologies Inc", "Bank of America"]);
    }

    #[test]
    fn test_person_entity_from_opening_line() {
        let annotation = pipeline().annotate("JANE DOE\nSoftware engineer");
        let people: Vec<&Entity> = annotation.entities_with(&EntityLabel::Person).collect();
        assert_eq!(people, vec![&Entity::new(EntityLabel::Person, "JANE DOE")]);
    }

    #[test]
    fn test_no_person_entity_for_long_opening_line() {
        let annotation = pipeline().annotate("Curriculum Vitae Of Jane Doe");
        assert_eq!(annotation.entities_with(&EntityLabel::Person).count(), 0);
    }
}
