use async_trait::async_trait;
use thiserror::Error;

use crate::config::PromptConfig;

/// Why a single summary could not be produced. Every variant is terminal for
/// that document in the current run; none is retried.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The endpoint answered with a non-success status.
    #[error("Error: {status} {reason}")]
    Transport { status: u16, reason: String },
    /// The endpoint answered successfully but reported an application error.
    #[error("Error: {0}")]
    Api(String),
    /// The request never produced a response (connect, TLS, timeout, body).
    #[error("Error: request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Error: malformed response: {0}")]
    MalformedResponse(String),
    #[error("Error: admission gate closed")]
    Cancelled,
}

#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// Produces a summary of `content`. Suspends the calling task for the
    /// round trip without blocking other tasks.
    async fn generate(&self, prompt: &PromptConfig, content: &str) -> Result<String, RemoteError>;
}

#[async_trait]
impl<G> SummaryGenerator for &G
where
    G: SummaryGenerator + ?Sized,
{
    async fn generate(&self, prompt: &PromptConfig, content: &str) -> Result<String, RemoteError> {
        (**self).generate(prompt, content).await
    }
}
