//! Resume record builder.
//!
//! Flow: extract text → segment → annotate (whole doc + per-section) →
//!       run each field extractor on its narrowest section, falling back to the
//!       whole document when the section yields nothing → merge entity-model spans.
//!
//! A build is a single pass; the returned `ExtractedRecord` is never touched again.

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::document::{self, DocumentError, DocumentFormat};
use crate::models::record::ExtractedRecord;
use crate::nlp::{Annotation, Entity, EntityLabel, EntityModel, NlpPipeline};
use crate::parsing::extractors::{
    capitalize, extract_companies, extract_degrees, extract_designations, extract_email,
    extract_experience, extract_institutions, extract_name, extract_phone, extract_skills,
    PhonePattern,
};
use crate::parsing::segmenter::{segment, FieldKind, Sections};
use crate::reference::ReferenceTables;

/// Parses resumes into `ExtractedRecord`s. Cheap to share: everything inside is
/// immutable after construction.
pub struct ResumeParser {
    reference: Arc<ReferenceTables>,
    pipeline: Arc<dyn NlpPipeline>,
    entity_model: Arc<dyn EntityModel>,
    phone: PhonePattern,
}

/// One document after segmentation and the whole-document NLP pass.
struct AnnotatedDocument {
    /// Whitespace-collapsed text, used by the regex extractors.
    flat: String,
    whole: Annotation,
    sections: Sections,
    custom: Vec<Entity>,
}

impl ResumeParser {
    pub fn new(
        reference: Arc<ReferenceTables>,
        pipeline: Arc<dyn NlpPipeline>,
        entity_model: Arc<dyn EntityModel>,
        phone: PhonePattern,
    ) -> Self {
        Self {
            reference,
            pipeline,
            entity_model,
            phone,
        }
    }

    pub fn reference(&self) -> &ReferenceTables {
        &self.reference
    }

    /// Reads and parses a file. Only the read itself can fail; anything wrong with
    /// the contents degrades to missing fields.
    pub fn parse_path(&self, path: &Path) -> Result<ExtractedRecord, DocumentError> {
        let bytes = std::fs::read(path)?;
        Ok(self.parse_bytes(&bytes, DocumentFormat::from_path(path)))
    }

    pub fn parse_bytes(&self, bytes: &[u8], format: DocumentFormat) -> ExtractedRecord {
        let text = document::extract_text(bytes, format);
        let pages = document::page_count(bytes, format);
        self.parse_text(&text, pages, Local::now().date_naive())
    }

    /// Builds a record from already-extracted text. `today` resolves open-ended
    /// (`present`/`current`) date ranges.
    pub fn parse_text(&self, raw: &str, page_count: Option<u32>, today: NaiveDate) -> ExtractedRecord {
        let doc = self.annotate_document(raw);
        let reference = self.reference.as_ref();

        let name = self.name(&doc);
        let email = extract_email(&doc.flat);
        let phone = extract_phone(&doc.flat, &self.phone);

        let education = self.annotate_field(&doc, FieldKind::Education);
        let mut degrees = extract_degrees(&education.sentences, reference);
        if degrees.is_empty() {
            degrees = extract_degrees(&doc.whole.sentences, reference);
        }
        let mut institutions = extract_institutions(&education.sentences, reference);
        if institutions.is_empty() {
            institutions = extract_institutions(&doc.whole.sentences, reference);
        }

        let experience_text = doc.sections.field_text(FieldKind::Experience);
        let experience = extract_experience(&experience_text, today);
        let experience_annotation = self.pipeline.annotate(&experience_text);

        let companies = [
            self.pipeline.annotate(&experience.evidence_text()),
            experience_annotation.clone(),
        ]
        .iter()
        .map(|annotation| extract_companies(annotation, reference))
        .find(|found| !found.is_empty())
        .unwrap_or_else(|| extract_companies(&doc.whole, reference));

        let mut job_titles = extract_designations(&experience_annotation, reference);
        if job_titles.is_empty() {
            job_titles = extract_designations(&doc.whole, reference);
        }
        job_titles.extend(custom_texts(&doc.custom, &EntityLabel::Designation).map(capitalize));

        let skills_annotation = self.annotate_field(&doc, FieldKind::Skills);
        let mut skills = extract_skills(&skills_annotation, reference);
        if skills.is_empty() {
            skills = extract_skills(&doc.whole, reference);
        }

        debug!(
            "Extracted {} degrees, {} institutions, {} skills, {} titles, {} companies",
            degrees.len(),
            institutions.len(),
            skills.len(),
            job_titles.len(),
            companies.len()
        );

        ExtractedRecord {
            name,
            email,
            phone,
            degrees,
            institutions,
            skills,
            job_titles,
            companies,
            experience_months: experience.months,
            total_experience_years: experience.years(),
            experience_evidence: experience.evidence,
            page_count,
        }
    }

    fn annotate_document(&self, raw: &str) -> AnnotatedDocument {
        let custom = match self.entity_model.entities(raw) {
            Ok(entities) => entities,
            Err(e) => {
                warn!("Entity model unavailable, continuing without custom entities: {e}");
                Vec::new()
            }
        };

        let sections = segment(raw, &self.reference);
        if sections.is_empty() {
            debug!("Document has no text to segment");
        } else {
            let summary: Vec<String> = sections
                .iter()
                .map(|(kind, lines)| format!("{}={}", kind.label(), lines.len()))
                .collect();
            debug!("Segmented into {} sections: {}", sections.len(), summary.join(", "));
        }

        AnnotatedDocument {
            flat: raw.split_whitespace().collect::<Vec<_>>().join(" "),
            whole: self.pipeline.annotate(raw),
            sections,
            custom,
        }
    }

    fn annotate_field(&self, doc: &AnnotatedDocument, field: FieldKind) -> Annotation {
        self.pipeline.annotate(&doc.sections.field_text(field))
    }

    /// Custom `Name` entity, else the stop-word-free profile, else the whole document.
    fn name(&self, doc: &AnnotatedDocument) -> Option<String> {
        if let Some(custom) = custom_texts(&doc.custom, &EntityLabel::Name).next() {
            return Some(custom.to_string());
        }

        let profile = self.annotate_field(doc, FieldKind::Profile);
        let preprocessed = self.pipeline.annotate(&profile.content_text());
        extract_name(&preprocessed).or_else(|| {
            debug!("No name in profile section, trying whole document");
            extract_name(&doc.whole)
        })
    }
}

fn custom_texts<'a>(
    entities: &'a [Entity],
    label: &'a EntityLabel,
) -> impl Iterator<Item = &'a str> {
    entities
        .iter()
        .filter(move |e| &e.label == label)
        .map(|e| e.text.trim())
        .filter(|t| !t.is_empty())
}
