use reqwest::StatusCode;
use serde_json::Value;

use herald_common::config::AppConfig;
use herald_common::error::{HeraldError, Result};
use herald_common::types::PollCursor;

/// Source of raw status-change payloads.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch every status change since `cursor`, as undecoded JSON.
    async fn fetch(&self, cursor: PollCursor) -> Result<Value>;
}

/// Client for the homework review API.
///
/// One request per call, no retries: the poll loop re-invokes it on the next
/// cycle.
pub struct PracticumClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            endpoint,
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.practicum_endpoint.clone(),
            config.practicum_token.clone(),
        )
    }
}

#[async_trait::async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, cursor: PollCursor) -> Result<Value> {
        tracing::info!(cursor, endpoint = %self.endpoint, "Querying review API");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(|e| HeraldError::Transport(e.to_string()))?;

        if resp.status() != StatusCode::OK {
            return Err(HeraldError::Http {
                status: resp.status().as_u16(),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| HeraldError::Shape(format!("Ответ API не является JSON: {}", e)))
    }
}
