use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::domain::models::VerifierConfig;
use crate::domain::ports::{UrlVerifier, Verification};

/// Probes URLs with HEAD, falling back to GET when HEAD fails at the
/// transport level or the server does not implement it.
pub struct HttpUrlVerifier {
    http_client: ReqwestClient,
}

impl HttpUrlVerifier {
    pub fn new(config: &VerifierConfig) -> Result<Self, reqwest::Error> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("linkfill/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl UrlVerifier for HttpUrlVerifier {
    #[instrument(skip(self))]
    async fn verify(&self, url: &str) -> Verification {
        let status = match self.http_client.head(url).send().await {
            Ok(response) if !rejects_head(response.status()) => response.status(),
            Ok(response) => {
                debug!(status = %response.status(), "HEAD not supported, retrying with GET");
                match self.get_status(url).await {
                    Some(status) => status,
                    None => return Verification::unreachable(),
                }
            }
            Err(head_err) => {
                debug!(error = %head_err, "HEAD failed, retrying with GET");
                match self.get_status(url).await {
                    Some(status) => status,
                    None => return Verification::unreachable(),
                }
            }
        };

        let verification = Verification::from_status(status.as_u16());
        debug!(status = verification.status, reachable = verification.reachable, "probe finished");
        verification
    }
}

impl HttpUrlVerifier {
    async fn get_status(&self, url: &str) -> Option<StatusCode> {
        match self.http_client.get(url).send().await {
            Ok(response) => Some(response.status()),
            Err(get_err) => {
                debug!(error = %get_err, "GET failed");
                None
            }
        }
    }
}

/// Servers that do not implement HEAD answer 405 or 501.
fn rejects_head(status: StatusCode) -> bool {
    status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED
}
