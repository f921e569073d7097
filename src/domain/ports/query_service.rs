//! Query/answer service port - interface for chat completion backends.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ChatMessage;

/// A service that answers an ordered, role-tagged conversation with a
/// single text reply.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Send the full conversation and return the reply text.
    ///
    /// Transport and API failures map to `DomainError::ServiceCall`.
    async fn complete(&self, messages: &[ChatMessage]) -> DomainResult<String>;
}
