use std::time::Duration;

use async_trait::async_trait;

use crate::context::NarrativeContext;
use crate::error::{NarrativeError, Result};
use crate::outcome::{NarrativeOutcome, NarrativeResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can turn an aggregate snapshot into narrative text.
///
/// The engine never retries through this trait; one call, one outcome or
/// one error.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, context: &NarrativeContext) -> Result<NarrativeOutcome>;
}

/// HTTP client for the narrative service: POSTs the context to
/// `{base_url}/narrative` and classifies the JSON response.
pub struct HttpNarrativeClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNarrativeClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/narrative", self.base_url)
    }
}

#[async_trait]
impl NarrativeGenerator for HttpNarrativeClient {
    async fn generate(&self, context: &NarrativeContext) -> Result<NarrativeOutcome> {
        let url = self.endpoint();
        log::debug!("Requesting narrative from {url}");

        let response = self.client.post(&url).json(context).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NarrativeError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: NarrativeResponse = serde_json::from_str(&body)
            .map_err(|e| NarrativeError::Json(format!("{e} (body: {})", preview(&body))))?;
        let outcome = NarrativeOutcome::classify(parsed);
        if !outcome.has_text() {
            log::warn!("Narrative service returned no usable text: {outcome:?}");
        }
        Ok(outcome)
    }
}

/// Fixed-outcome generator for tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticGenerator {
    outcome: NarrativeOutcome,
}

impl StaticGenerator {
    #[must_use]
    pub fn new(outcome: NarrativeOutcome) -> Self {
        Self { outcome }
    }

    /// Generator that always produces the given text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NarrativeOutcome::Generated {
            text: text.into(),
            model: "static".to_string(),
            tokens: None,
        })
    }
}

#[async_trait]
impl NarrativeGenerator for StaticGenerator {
    async fn generate(&self, _context: &NarrativeContext) -> Result<NarrativeOutcome> {
        Ok(self.outcome.clone())
    }
}

fn preview(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < LIMIT)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}...", &body[..cut])
    }
}
