use std::sync::Arc;

use crate::config::Config;
use crate::parsing::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Reference tables, tagger, and entity model behind one immutable parser.
    pub parser: Arc<ResumeParser>,
    pub config: Config,
}
