//! Blocking HTTP implementation of `IVectorIndex`.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sieve_core::config::VectorConfig;
use sieve_core::errors::{SieveResult, VectorError};
use sieve_core::models::{IndexStats, VectorMatch};
use sieve_core::traits::IVectorIndex;
use tracing::debug;

use crate::protocol::{QueryRequest, QueryResponse, StatsResponse};

const API_KEY_HEADER: &str = "Api-Key";

pub struct HttpVectorIndex {
    client: Client,
    host: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpVectorIndex {
    pub fn new(config: &VectorConfig) -> SieveResult<Self> {
        if config.host.trim().is_empty() {
            return Err(VectorError::Unreachable {
                reason: "vector host is not configured".to_string(),
            }
            .into());
        }
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VectorError::Unreachable {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> reqwest::Result<Response> {
        let mut request = self.client.post(format!("{}{}", self.host, path)).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        request.send()
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, VectorError> {
        response.json().map_err(|e| VectorError::InvalidResponse {
            reason: e.to_string(),
        })
    }
}

impl IVectorIndex for HttpVectorIndex {
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        partition: &str,
        include_metadata: bool,
    ) -> SieveResult<Vec<VectorMatch>> {
        let body = QueryRequest {
            vector,
            top_k,
            namespace: partition,
            include_metadata,
            include_values: false,
        };
        let response = self.post("/query", &body).map_err(|e| {
            if e.is_timeout() {
                VectorError::Timeout {
                    partition: partition.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                VectorError::PartitionFailed {
                    partition: partition.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VectorError::PartitionFailed {
                partition: partition.to_string(),
                reason: format!("{status}: {body}"),
            }
            .into());
        }

        let parsed: QueryResponse = Self::decode(response)?;
        debug!(partition = %partition, matches = parsed.matches.len(), "partition queried");
        Ok(parsed.matches.into_iter().map(Into::into).collect())
    }

    fn describe_stats(&self) -> SieveResult<IndexStats> {
        let response = self
            .post("/describe_index_stats", &serde_json::json!({}))
            .map_err(|e| VectorError::Unreachable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VectorError::Unreachable {
                reason: format!("{status}: {body}"),
            }
            .into());
        }

        let parsed: StatsResponse = Self::decode(response)?;
        Ok(parsed.into())
    }
}
