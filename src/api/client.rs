use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{ChatRequest, ChatResponse, Game, RecommendRequest};

/// Errors that can occur while talking to the GameFinder API.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS backend failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Response body did not match the expected schema.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The two calls the client makes. Implemented over HTTP by [`HttpApi`];
/// tests substitute a recording fake.
#[async_trait]
pub trait GameFinderApi: Send + Sync {
    /// Base URL requests are sent to (for the status bar and logs).
    fn base_url(&self) -> &str;

    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Game>, ApiError>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;
}

/// reqwest-backed client for `POST /recommend` and `POST /chat`.
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    /// Creates a client. `timeout` of `None` means requests may hang indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("POST {} -> {}", url, status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("GameFinder API error on /{}: {} - {}", endpoint, status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| {
            warn!("Unparseable /{} response ({} bytes): {}", endpoint, raw.len(), e);
            ApiError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl GameFinderApi for HttpApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Game>, ApiError> {
        info!(
            "Recommend request: query={:?}, top_k={}",
            request.query, request.top_k
        );
        let games: Vec<Game> = self.post_json("recommend", request).await?;
        info!("Recommend returned {} games", games.len());
        Ok(games)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        info!(
            "Chat request: message_len={}, history_count={}",
            request.message.len(),
            request.history.len()
        );
        self.post_json("chat", request).await
    }
}
