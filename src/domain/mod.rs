//! Domain layer for link resolution
//!
//! This module contains the link candidate model, the conversation
//! transcript, and the port traits the resolver drives.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};
