//! Client for the external chat-completion provider plus the streaming
//! relay plumbing used by the content-generation endpoints.
//!
//! The provider speaks the OpenAI-compatible `chat/completions` wire
//! format. Two call shapes exist: a non-streaming completion used for
//! structured generation, and an SSE stream relayed fragment-by-fragment
//! to the dashboard for a live-typing effect.

pub mod client;
pub mod config;
pub mod error;
pub mod generate;
pub mod stream;

pub use client::{AiClient, ChatStream};
pub use config::{AiConfig, Endpoint};
pub use error::AiError;
