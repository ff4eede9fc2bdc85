use super::client::{CacheGateClient, SdkError};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Where the gateway found the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Origin,
}

#[derive(Debug, Deserialize)]
pub struct GamesResponse {
    pub source: Source,
    pub genre: String,
    /// Milliseconds spent resolving the request
    pub duration: u64,
    /// Only set on a cache miss
    pub count: Option<usize>,
    pub data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct PokemonPage {
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct PokemonResponse {
    pub source: Source,
    pub limit: u32,
    pub offset: u32,
    pub duration: u64,
    pub count: Option<usize>,
    pub total_available: Option<u64>,
    pub data: PokemonPage,
}

impl CacheGateClient {
    pub async fn games(&self, genre: &str) -> Result<GamesResponse, SdkError> {
        let request = self.client.get(self.url("/games")).query(&[("genre", genre)]);
        self.send(request).await
    }

    /// Omitted parameters fall back to the gateway defaults
    pub async fn pokemon(&self, limit: Option<u32>, offset: Option<u32>) -> Result<PokemonResponse, SdkError> {
        let mut params = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit", limit));
        }
        if let Some(offset) = offset {
            params.push(("offset", offset));
        }

        let request = self.client.get(self.url("/pokemon")).query(&params);
        self.send(request).await
    }
}
