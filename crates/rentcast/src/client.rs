//! RentCast REST client.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::{ApiKey, Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.rentcast.io/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const API_KEY_HEADER: &str = "X-Api-Key";

const DEFAULT_USER_AGENT: &str = concat!("rentcast-mcp/", env!("CARGO_PKG_VERSION"));

/// Builder for creating a RentCast client.
#[derive(Debug, Clone)]
pub struct RentcastClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl RentcastClientBuilder {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<RentcastClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL {:?} cannot carry a path",
                self.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(RentcastClient {
            client,
            api_key: self.api_key,
            base_url,
        })
    }
}

/// Authenticated client for the RentCast API.
#[derive(Debug, Clone)]
pub struct RentcastClient {
    client: reqwest::Client,
    api_key: ApiKey,
    base_url: Url,
}

impl RentcastClient {
    pub fn builder(api_key: ApiKey) -> RentcastClientBuilder {
        RentcastClientBuilder::new(api_key)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for an endpoint below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so IDs containing `/`
    /// or spaces stay a single path segment.
    pub fn endpoint_url(&self, segments: &[String], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Issue one GET and return the JSON body as the vendor sent it.
    pub async fn get(&self, segments: &[String], query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint_url(segments, query)?;
        debug!(path = url.path(), query = url.query().unwrap_or(""), "GET");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "response");

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

/// Pull a human-readable message out of a vendor error body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        for field in ["message", "error"] {
            if let Some(Value::String(message)) = object.get(field) {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
