//! URL verifier port - reachability probes.

use async_trait::async_trait;

/// Result of probing a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub reachable: bool,
    /// HTTP status, or 0 when the transport failed.
    pub status: u16,
}

impl Verification {
    /// 2xx and 3xx count as reachable.
    pub const fn from_status(status: u16) -> Self {
        Self {
            reachable: status >= 200 && status < 400,
            status,
        }
    }

    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            status: 0,
        }
    }
}

/// Checks whether a suggested URL actually answers.
///
/// Infallible by contract: every failure is folded into an unreachable
/// verdict.
#[async_trait]
pub trait UrlVerifier: Send + Sync {
    async fn verify(&self, url: &str) -> Verification;
}
