use super::client::{CacheGateClient, SdkError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CacheKeys {
    pub success: bool,
    pub count: usize,
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlushResult {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub status: String,
}

impl CacheGateClient {
    pub async fn cache_keys(&self) -> Result<CacheKeys, SdkError> {
        self.send(self.client.get(self.url("/cache/keys"))).await
    }

    pub async fn flush_cache(&self) -> Result<FlushResult, SdkError> {
        self.send(self.client.delete(self.url("/cache"))).await
    }

    pub async fn status(&self) -> Result<Status, SdkError> {
        self.send(self.client.get(self.url("/"))).await
    }
}
