use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx answer carrying the gateway's `{error, message}` envelope
    #[error("HTTP {status} {error}: {message}")]
    Api {
        status: u16,
        error: String,
        message: String,
    },
}

impl SdkError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            SdkError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct CacheGateClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl CacheGateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SdkError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SdkError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await?;
        let envelope = serde_json::from_str::<ErrorEnvelope>(&body).unwrap_or_else(|_| ErrorEnvelope {
            error: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            message: body,
        });

        Err(SdkError::Api {
            status: status.as_u16(),
            error: envelope.error,
            message: envelope.message,
        })
    }
}
