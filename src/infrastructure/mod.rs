//! Infrastructure layer module
//!
//! This module contains the adapters for external systems:
//! - Chat completions client (reqwest)
//! - HTTP URL verifier
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod llm;
pub mod logging;
pub mod verifier;
