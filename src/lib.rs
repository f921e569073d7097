//! Linkfill - placeholder link resolver
//!
//! Linkfill scans a markdown document for links whose target is a
//! free-text description, for example `[the book](rust programming book)`,
//! and resolves each one to a real URL through a conversation with an
//! LLM. The user reviews every suggestion and can accept it, override it
//! with their own URL, or add context for another round.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Link candidates, transcripts, and port traits
//! - **Service Layer** (`services`): Extraction, resolution loop, and patching
//! - **Infrastructure Layer** (`infrastructure`): HTTP clients, config, logging
//! - **Adapters** (`adapters`): Scripted in-process port implementations
//! - **CLI Layer** (`cli`): Command-line interface and terminal interaction
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use linkfill::{ConversationalResolver, DocumentProcessor, OutputTarget};
//!
//! let resolver = ConversationalResolver::new(query_service, config.resolver.clone());
//! let processor = DocumentProcessor::new(resolver);
//! let summary = processor
//!     .process_file(Path::new("notes.md"), &OutputTarget::InPlace, &mut ui)
//!     .await?;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, LinkCandidate, LoggingConfig, RejectedUrls, ResolutionState, ResolverConfig,
    RetryConfig, Span, Suggestion, Transcript,
};
pub use domain::ports::{Interaction, QueryService, ResolverEvent, UrlVerifier, Verification};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    ConversationalResolver, DocumentPatcher, DocumentProcessor, LinkExtractor, OutputTarget,
    RunSummary,
};
