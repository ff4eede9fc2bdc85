// core/gateway-service/src/cache_key.rs
// Deterministic cache keys per logical query

use std::fmt;

/// Cache key derived from query parameters.
///
/// Each scheme has a fixed prefix, so keys from different query types never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `genre:<genre>`, with the genre used verbatim
    pub fn genre(genre: &str) -> Self {
        Self(format!("genre:{}", genre))
    }

    /// `pokemon:limit<limit>:offset<offset>`, from already-normalized numbers
    pub fn pokemon_page(limit: u32, offset: u32) -> Self {
        Self(format!("pokemon:limit{}:offset{}", limit, offset))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
