//! Generation phases and response classification.

use chrono::NaiveDate;
use serde::Serialize;

use super::normalize::normalize_challenge;
use super::service::ServiceFailure;
use crate::error::GenerationError;
use crate::prompt::Prompt;
use crate::state::Challenge;

/// Message for a response with no usable text.
pub const EMPTY_RESPONSE: &str = "Empty response";
/// Message for text that is not JSON.
pub const INVALID_RESPONSE: &str = "Invalid response format";

/// Where today's generation stands. Lives in memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "error", rename_all = "snake_case")]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
    Succeeded,
    #[serde(serialize_with = "serialize_error")]
    Failed(GenerationError),
}

fn serialize_error<S: serde::Serializer>(err: &GenerationError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&err.to_string())
}

impl GenerationPhase {
    pub fn is_generating(&self) -> bool {
        matches!(self, GenerationPhase::Generating)
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            GenerationPhase::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// An accepted trigger, waiting for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub date: NaiveDate,
    /// Planner reset counter at the time of the trigger.
    pub epoch: u64,
    pub prompt: Prompt,
}

/// Map a service outcome onto a challenge or a classified failure.
///
/// Checks run in order: status, empty text, JSON decoding, normalization.
///
/// # Errors
/// Returns the [`GenerationError`] for the first check that fails.
pub fn classify(outcome: Result<String, ServiceFailure>) -> Result<Challenge, GenerationError> {
    let text = match outcome {
        Ok(text) => text,
        Err(ServiceFailure::Status(401 | 403)) => return Err(GenerationError::Unauthorized),
        Err(ServiceFailure::Status(code)) => {
            return Err(GenerationError::ServiceError(code.to_string()))
        }
        Err(ServiceFailure::Transport(message)) => {
            return Err(GenerationError::ServiceError(message))
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::MalformedResponse(EMPTY_RESPONSE.into()));
    }
    let payload: serde_json::Value = serde_json::from_str(text)
        .map_err(|_| GenerationError::MalformedResponse(INVALID_RESPONSE.into()))?;
    Ok(normalize_challenge(&payload)?)
}
