//! In-process adapters for the domain ports.

pub mod mock;

pub use mock::{formatted_reply, ScriptedInteraction, ScriptedQueryService, StaticVerifier};
