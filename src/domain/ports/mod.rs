//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - QueryService: the query/answer (chat completion) service
//! - UrlVerifier: reachability probes for suggested URLs
//! - Interaction: the user-facing prompt surface
//!
//! These traits keep the resolution state machine independent of
//! HTTP clients and the terminal.

pub mod interaction;
pub mod query_service;
pub mod url_verifier;

pub use interaction::{Interaction, ResolverEvent};
pub use query_service::QueryService;
pub use url_verifier::{UrlVerifier, Verification};
