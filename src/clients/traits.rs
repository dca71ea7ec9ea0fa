use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    /// Model that produced the text, when the provider reports it
    pub model: Option<String>,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service not configured: {0}")]
    NotConfigured(String),
    #[error("completion timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("http error: {0}")]
    Http(String),
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("completion returned no text")]
    Empty,
}

/// Text-completion collaborator: one prompt in, one block of text out.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Completion, CompletionError>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}
