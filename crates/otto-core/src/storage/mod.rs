mod config;
pub mod database;
pub mod store;

pub use config::{
    Config, GeneralConfig, GenerationConfig, StorageConfig, API_KEY_ENV, API_KEY_PLACEHOLDER,
};
pub use database::Database;
pub use store::{MemoryBackend, PersistenceStore, StateBackend, STORAGE_NOTICE};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/otto[-dev]/` based on OTTO_ENV.
///
/// Set OTTO_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("OTTO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("otto-dev")
    } else {
        base_dir.join("otto")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
