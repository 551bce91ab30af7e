//! HTTP transport to the analysis backend.
//!
//! A single primitive: POST a JSON body to `base_url + path` and hand back
//! the parsed JSON, or a typed error describing which way the call failed.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// How a backend call can fail.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Request never produced a response
  #[error("request to {path} could not be delivered: {source}")]
  Transport {
    path: String,
    #[source]
    source: reqwest::Error,
  },

  /// Response arrived with a non-success status
  #[error("backend returned HTTP {status} for {path}")]
  Http { path: String, status: u16 },

  /// Response body was not valid JSON, or did not match the expected shape
  #[error("backend returned an unusable body for {path}: {source}")]
  MalformedResponse {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  /// Request body could not be encoded
  #[error("could not encode request body for {path}: {source}")]
  InvalidRequest {
    path: String,
    #[source]
    source: serde_json::Error,
  },

  /// Retries, cache and stub were all unavailable; carries the last
  /// attempt's error
  #[error("backend, cache, and stub tiers all exhausted for {path}")]
  Exhausted {
    path: String,
    #[source]
    source: Option<Box<ApiError>>,
  },
}

/// The network call primitive, behind a trait so tests can script outcomes.
#[async_trait]
pub trait Transport: Send + Sync {
  /// POST `body` as JSON to `path` and return the parsed response body.
  async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
  http: Client,
  base_url: String,
}

impl HttpTransport {
  /// Create a transport against `base_url`, validating it up front.
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    Url::parse(base_url).map_err(|e| eyre!("Invalid backend base URL {}: {}", base_url, e))?;

    let http = Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
    let url = format!("{}{}", self.base_url, path);

    let response = self
      .http
      .post(&url)
      .json(body)
      .send()
      .await
      .map_err(|source| ApiError::Transport {
        path: path.to_string(),
        source,
      })?;

    let status = response.status();
    if !status.is_success() {
      return Err(ApiError::Http {
        path: path.to_string(),
        status: status.as_u16(),
      });
    }

    let text = response.text().await.map_err(|source| ApiError::Transport {
      path: path.to_string(),
      source,
    })?;

    serde_json::from_str(&text).map_err(|source| ApiError::MalformedResponse {
      path: path.to_string(),
      source,
    })
  }
}
