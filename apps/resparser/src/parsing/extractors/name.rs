use crate::nlp::{Annotation, EntityLabel};

/// Candidate's name from a tagged text.
///
/// Two sources: the first pair of consecutive proper nouns (skipping pairs that
/// contain the word "name", e.g. a "Name:" label), and the first PERSON entity.
/// The entity wins unless the pattern match already contains it, in which case
/// the pattern match is the fuller form.
pub fn extract_name(annotation: &Annotation) -> Option<String> {
    let pattern = proper_noun_pair(annotation);
    let entity = annotation
        .entities_with(&EntityLabel::Person)
        .map(|e| e.text.trim())
        .find(|t| !t.is_empty());

    match (entity, pattern) {
        (Some(entity), Some(pattern))
            if pattern.to_lowercase().contains(&entity.to_lowercase()) =>
        {
            Some(pattern)
        }
        (Some(entity), _) => Some(entity.to_string()),
        (None, pattern) => pattern,
    }
}

fn proper_noun_pair(annotation: &Annotation) -> Option<String> {
    annotation
        .tokens
        .windows(2)
        .filter(|pair| pair.iter().all(|t| t.is_proper))
        .map(|pair| format!("{} {}", pair[0].text, pair[1].text))
        .find(|candidate| !candidate.to_lowercase().contains("name"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{Entity, HeuristicPipeline, NlpPipeline};
    use crate::reference::ReferenceTables;

    fn annotate(text: &str) -> Annotation {
        HeuristicPipeline::new(ReferenceTables::sample().stop_words().clone()).annotate(text)
    }

    #[test]
    fn test_pattern_match_when_no_entity() {
        let annotation = annotate("resume of Jane Doe, engineer at somewhere");
        assert_eq!(extract_name(&annotation).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_label_is_skipped() {
        let annotation = annotate("Full Name John Smith");
        // "Name" is a stop word, so neither pair around it qualifies.
        assert_eq!(extract_name(&annotation).as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_entity_wins_when_not_contained_in_pattern() {
        let mut annotation = annotate("Acme Corp hired me");
        annotation
            .entities
            .push(Entity::new(EntityLabel::Person, "Jane Doe"));
        assert_eq!(extract_name(&annotation).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_pattern_wins_when_it_contains_entity() {
        let mut annotation = annotate("Jane Doe");
        annotation.entities.retain(|e| e.label != EntityLabel::Person);
        annotation.entities.push(Entity::new(EntityLabel::Person, "Jane"));
        assert_eq!(extract_name(&annotation).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_no_name() {
        let annotation = annotate("worked on many things, 2019");
        assert_eq!(extract_name(&annotation), None);
    }
}
