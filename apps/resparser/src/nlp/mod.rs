//! NLP collaborator: sentence/token/chunk/entity annotations consumed by the extractors.
//!
//! `NlpPipeline` is the pluggable tagger (default: `HeuristicPipeline`).
//! `EntityModel` is the optional domain-tuned model contributing `Name` and
//! `Designation` spans (default: `NoEntityModel`; `RemoteEntityModel` over HTTP).

pub mod entity_model;
pub mod heuristic;

use serde::{Deserialize, Serialize};

pub use entity_model::{EntityModel, EntityModelError, NoEntityModel, RemoteEntityModel};
pub use heuristic::HeuristicPipeline;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    #[serde(rename = "PERSON")]
    Person,
    #[serde(rename = "ORG")]
    Org,
    Name,
    Designation,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
}

impl Entity {
    pub fn new(label: EntityLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_stop: bool,
    pub is_punct: bool,
    /// Proper-noun tag.
    pub is_proper: bool,
}

/// Everything the extractors need from one pass of the tagger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    pub sentences: Vec<String>,
    pub tokens: Vec<Token>,
    /// Multi-word noun phrases (bi- and tri-grams).
    pub noun_chunks: Vec<String>,
    pub entities: Vec<Entity>,
}

impl Annotation {
    pub fn entities_with<'a>(&'a self, label: &'a EntityLabel) -> impl Iterator<Item = &'a Entity> {
        self.entities.iter().filter(move |e| &e.label == label)
    }

    /// Tokens that are neither stop words nor punctuation, re-joined with spaces.
    pub fn content_text(&self) -> String {
        self.tokens
            .iter()
            .filter(|t| !t.is_stop && !t.is_punct)
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub trait NlpPipeline: Send + Sync {
    fn annotate(&self, text: &str) -> Annotation;
}

/// Keeps the first occurrence of each (label, text) pair.
pub fn dedup_entities(entities: Vec<Entity>) -> Vec<Entity> {
    let mut seen = std::collections::HashSet::new();
    entities
        .into_iter()
        .filter(|e| seen.insert((e.label.clone(), e.text.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_label_serde() {
        let json = r#"[{"label":"PERSON","text":"Jane Doe"},{"label":"Designation","text":"CTO"},{"label":"GPE","text":"Ohio"}]"#;
        let entities: Vec<Entity> = serde_json::from_str(json).unwrap();
        assert_eq!(entities[0].label, EntityLabel::Person);
        assert_eq!(entities[1].label, EntityLabel::Designation);
        assert_eq!(entities[2].label, EntityLabel::Other("GPE".to_string()));
    }

    #[test]
    fn test_dedup_entities_keeps_first() {
        let entities = vec![
            Entity::new(EntityLabel::Org, "Acme Inc"),
            Entity::new(EntityLabel::Org, "Acme Inc"),
            Entity::new(EntityLabel::Name, "Acme Inc"),
        ];
        assert_eq!(dedup_entities(entities).len(), 2);
    }

    #[test]
    fn test_content_text_drops_stop_words_and_punct() {
        let annotation = Annotation {
            tokens: vec![
                Token {
                    text: "I".into(),
                    is_stop: true,
                    is_punct: false,
                    is_proper: false,
                },
                Token {
                    text: "Jane".into(),
                    is_stop: false,
                    is_punct: false,
                    is_proper: true,
                },
                Token {
                    text: ",".into(),
                    is_stop: false,
                    is_punct: true,
                    is_proper: false,
                },
            ],
            ..Default::default()
        };
        assert_eq!(annotation.content_text(), "Jane");
    }
}
