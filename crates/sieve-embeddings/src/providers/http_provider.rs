//! Remote embedding provider.
//!
//! Speaks the common `POST {model, input: [text]}` → `{data: [{embedding}]}`
//! JSON shape with bearer auth. Single attempt per call: failures surface to
//! the caller.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use sieve_core::config::EmbeddingConfig;
use sieve_core::errors::{EmbeddingError, SieveResult};
use sieve_core::traits::IEmbeddingProvider;
use tracing::debug;

pub struct HttpEmbeddingProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl HttpEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> SieveResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| EmbeddingError::ProviderUnavailable {
                provider: "http".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            dimensions: config.dimensions,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl IEmbeddingProvider for HttpEmbeddingProvider {
    fn embed(&self, text: &str) -> SieveResult<Vec<f32>> {
        let mut request = self.client.post(&self.endpoint).json(&EmbedRequest {
            model: &self.model,
            input: [text],
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| EmbeddingError::ProviderUnavailable {
            provider: self.model.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let parsed: EmbedResponse = response.json().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("JSON parse error: {e}"),
        })?;
        debug!(model = %self.model, "remote embedding received");

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: "empty response".to_string(),
                }
                .into()
            })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}
