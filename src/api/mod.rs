//! # API Client
//!
//! HTTP boundary to the recommendation and chat service. Everything past this
//! module (ranking, embeddings, the language model) is opaque to the client.

pub mod client;
pub mod types;

pub use client::{ApiError, GameFinderApi, HttpApi};
pub use types::{ChatRequest, ChatResponse, Game, HistoryEntry, HistoryRole, Price, RecommendRequest};
