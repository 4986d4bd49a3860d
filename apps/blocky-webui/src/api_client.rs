use async_trait::async_trait;
use blocky_shared::api::{ActivityFeed, SearchRequest, SearchResult};
use reqwest::{header, redirect, Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// Failure of a single API call. The display text is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
    #[error("HTTP Error {code}: {reason}")]
    Status { code: u16, reason: String },
    #[error("Invalid response from API: {0}")]
    Decode(String),
}

/// Everything the views need from the blocky API.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn request(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, ApiError>;

    async fn fetch_activity(&self) -> Result<ActivityFeed, ApiError> {
        decode(self.request(Verb::Get, "all", None).await?)
    }

    async fn search(&self, target: &str) -> Result<SearchResult, ApiError> {
        let body = serde_json::to_value(SearchRequest {
            source: target.to_string(),
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        decode(self.request(Verb::Post, "search", Some(body)).await?)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        // Already installed is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::builder()
            .redirect(redirect::Policy::default())
            .referer(false)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn request(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!("{} {}", verb, url);

        let mut request = self
            .client
            .request(verb.method(), &url)
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::PRAGMA, "no-cache");
        // Content-Type is only attached when there is a body.
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
