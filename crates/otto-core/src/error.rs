//! Core error types for otto-core.
//!
//! This module defines the error hierarchy using thiserror. Generation
//! failures carry their own retry classification; storage failures are
//! absorbed by the persistence layer and surfaced as a sticky notice.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for otto-core.
///
/// Returned by host-facing entry points that can fail for more than one
/// reason, such as opening a session or driving generation to completion.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Challenge generation errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// True for a generation failure that a plain retry could fix.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Generation(err) if err.is_retryable())
    }
}

/// Durable storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),

    /// Read failed
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Write failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Challenge generation failures, classified by whether a plain retry could
/// plausibly succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Credential absent or still the placeholder value.
    #[error("Gemini API key not configured. Set generation.api_key or OTTO_API_KEY.")]
    ConfigurationMissing,

    /// The prompt builder refused the selection.
    #[error("Cannot build prompt: {0}")]
    Prompt(#[from] PromptError),

    /// HTTP 401/403 from the service.
    #[error("Gemini request unauthorized. Verify the API key.")]
    Unauthorized,

    /// Any other non-success status or a transport fault.
    #[error("Gemini error: {0}")]
    ServiceError(String),

    /// Empty text, unparseable text, or a payload that failed normalization.
    #[error("{0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Whether the same action, unmodified, could succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::ServiceError(_) | GenerationError::MalformedResponse(_)
        )
    }
}

impl From<NormalizeError> for GenerationError {
    fn from(err: NormalizeError) -> Self {
        GenerationError::MalformedResponse(err.to_string())
    }
}

/// Prompt builder failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("Invalid training selection")]
    InvalidTriplet,

    #[error("Missing prompt template for {0}")]
    MissingTemplate(String),
}

/// Structural faults found while normalizing an untrusted challenge payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Missing challenge payload")]
    NotAnObject,
}

/// Reasons a local command was refused. These are silent no-ops for the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("weekday index {0} out of range")]
    SlotOutOfRange(usize),

    #[error("no challenge exists for today")]
    NoChallenge,

    #[error("today's result was already submitted")]
    AlreadySubmitted,

    #[error("score {0} is outside 1..=10")]
    ScoreOutOfRange(i64),

    #[error("no dial value has been committed")]
    NoCommittedValue,

    #[error("there is no retryable generation failure")]
    NothingToRetry,
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    StorageError::Locked
                } else {
                    StorageError::WriteFailed(err.to_string())
                }
            }
            _ => StorageError::ReadFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
