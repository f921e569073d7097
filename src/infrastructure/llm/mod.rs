//! Chat completions client
//!
//! HTTP client for OpenAI-compatible chat completion APIs, used as the
//! query/answer service:
//! - Typed request/response bodies
//! - Error classification (transient vs permanent)
//! - Exponential backoff retry for transient failures

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::{OpenAiClient, OpenAiClientConfig};
pub use error::LlmApiError;
pub use retry::RetryPolicy;
