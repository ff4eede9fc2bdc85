//! Typed client for the CacheGate HTTP gateway.

pub mod admin;
pub mod client;
pub mod queries;

pub use admin::{CacheKeys, FlushResult, Status};
pub use client::{CacheGateClient, SdkError};
pub use queries::{GamesResponse, PokemonPage, PokemonResponse, Source};
