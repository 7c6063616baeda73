//! Supplementary entity model: a domain-tuned NER service that labels `Name` and
//! `Designation` spans (and whatever else it was trained on).
//!
//! Called from parser worker threads, so the client is blocking. Failures are
//! reported to the caller, which treats them as "no entities".

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::{dedup_entities, Entity};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum EntityModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gave up after {retries} retries")]
    Exhausted { retries: u32 },
}

pub trait EntityModel: Send + Sync {
    fn entities(&self, raw_text: &str) -> Result<Vec<Entity>, EntityModelError>;
}

/// Used when no domain model is configured.
pub struct NoEntityModel;

impl EntityModel for NoEntityModel {
    fn entities(&self, _raw_text: &str) -> Result<Vec<Entity>, EntityModelError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Serialize)]
struct EntityRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EntityResponse {
    entities: Vec<Entity>,
}

/// HTTP client for an entity model served behind `POST <url>`.
///
/// Request: `{"text": "..."}`. Response: `{"entities": [{"label": "Name", "text": "..."}]}`.
pub struct RemoteEntityModel {
    client: Client,
    url: String,
}

impl RemoteEntityModel {
    pub fn new(url: String) -> Result<Self, EntityModelError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, url })
    }
}

impl EntityModel for RemoteEntityModel {
    /// Retries on 429 and 5xx with exponential backoff.
    fn entities(&self, raw_text: &str) -> Result<Vec<Entity>, EntityModelError> {
        let mut last_error: Option<EntityModelError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Entity model attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                std::thread::sleep(delay);
            }

            let response = match self
                .client
                .post(&self.url)
                .json(&EntityRequest { text: raw_text })
                .send()
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EntityModelError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().unwrap_or_default();
                last_error = Some(EntityModelError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }
            if !status.is_success() {
                return Err(EntityModelError::Api {
                    status: status.as_u16(),
                    message: response.text().unwrap_or_default(),
                });
            }

            let parsed: EntityResponse = response.json()?;
            debug!("Entity model returned {} spans", parsed.entities.len());
            return Ok(dedup_entities(parsed.entities));
        }

        Err(last_error.unwrap_or(EntityModelError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }
}
