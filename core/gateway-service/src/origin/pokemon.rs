// core/gateway-service/src/origin/pokemon.rs
// Paginated items client for the public PokeAPI

use async_trait::async_trait;
use cachegate_common::{log_external_api_call, MetricsTimer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use super::OriginError;

/// Normalized pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

/// Upstream page, passed through verbatim.
///
/// `count` is the total number of items available upstream; fields other than
/// `count` and `results` (`next`, `previous`, ...) live in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaginatedResponse {
    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.result_count() == 0
    }
}

#[async_trait]
pub trait PokemonApi: Send + Sync {
    async fn fetch_page(&self, page: PageRequest) -> Result<PaginatedResponse, OriginError>;
}

#[derive(Debug, Clone)]
pub struct HttpPokemonClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpPokemonClient {
    /// `timeout` bounds the whole exchange, body included
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OriginError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OriginError::Upstream(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> OriginError {
        if err.is_timeout() {
            OriginError::Timeout(self.timeout.as_millis() as u64)
        } else {
            OriginError::Upstream(err.to_string())
        }
    }
}

#[async_trait]
impl PokemonApi for HttpPokemonClient {
    async fn fetch_page(&self, page: PageRequest) -> Result<PaginatedResponse, OriginError> {
        let url = format!("{}/pokemon", self.base_url);
        let timer = MetricsTimer::new();

        let response = self
            .client
            .get(&url)
            .query(&[("limit", page.limit), ("offset", page.offset)])
            .send()
            .await
            .map_err(|e| {
                log_external_api_call("pokeapi", &url, timer.elapsed_millis(), None);
                self.classify(e)
            })?;

        let status = response.status();
        log_external_api_call("pokeapi", &url, timer.elapsed_millis(), Some(status.as_u16()));

        if !status.is_success() {
            return Err(OriginError::Upstream(format!("pokeapi returned HTTP {}", status)));
        }

        response
            .json::<PaginatedResponse>()
            .await
            .map_err(|e| self.classify(e))
    }
}
