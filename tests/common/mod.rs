//! Common test utilities for integration tests
//!
//! Shared fixtures for building candidates, scripted services, and
//! resolvers.

use std::sync::Arc;

use linkfill::adapters::{formatted_reply, ScriptedQueryService, StaticVerifier};
use linkfill::domain::models::{LinkCandidate, ResolverConfig};
use linkfill::domain::ports::{ResolverEvent, UrlVerifier};
use linkfill::services::{ConversationalResolver, LinkExtractor};

/// A well-formed service reply.
#[allow(dead_code)]
pub fn reply(url: &str, confidence: f64) -> String {
    formatted_reply(url, confidence, "best match for the description")
}

/// The first candidate extracted from `text`.
#[allow(dead_code)]
pub fn candidate(text: &str) -> LinkCandidate {
    LinkExtractor::new()
        .extract(text)
        .into_iter()
        .next()
        .expect("text should contain a link")
}

/// Resolver over a scripted service, optionally with a verifier.
#[allow(dead_code)]
pub fn resolver(
    service: &Arc<ScriptedQueryService>,
    verifier: Option<Arc<StaticVerifier>>,
    config: ResolverConfig,
) -> ConversationalResolver {
    let resolver = ConversationalResolver::new(service.clone(), config);
    match verifier {
        Some(verifier) => resolver.with_verifier(verifier as Arc<dyn UrlVerifier>),
        None => resolver,
    }
}

/// Whether `event` is a `Settled` event.
#[allow(dead_code)]
pub fn is_settled(event: &ResolverEvent) -> bool {
    matches!(event, ResolverEvent::Settled { .. })
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
