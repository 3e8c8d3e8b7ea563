//! Text-in/text-out generation service seam.

use std::fmt;

/// Why the service produced no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFailure {
    /// The service answered with a non-success HTTP status.
    Status(u16),
    /// The request never got a status back.
    Transport(String),
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFailure::Status(code) => write!(f, "HTTP {code}"),
            ServiceFailure::Transport(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ServiceFailure {}

/// A service that turns a system prompt and a user payload into raw text.
///
/// Returned text is passed through untouched; trimming and decoding happen
/// in the pipeline.
#[allow(async_fn_in_trait)]
pub trait GenerationService {
    async fn generate(&self, system_prompt: &str, user_payload: &str)
        -> Result<String, ServiceFailure>;
}
