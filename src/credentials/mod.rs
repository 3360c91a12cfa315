pub mod prompt;

use std::fmt;
use std::path::PathBuf;

/// Environment variable name for providing the API key without a key file
pub const ENV_KEY_VAR: &str = "ENNEAMIND_API_KEY";

// Re-export prompt functions for convenience
pub use prompt::{prompt_for_key, setup_key_if_missing};

/// Path of the key file (~/.config/enneamind/api-key)
pub fn get_key_path() -> PathBuf {
    crate::config::get_config_dir().join("api-key")
}

/// Check for an API key in the ENNEAMIND_API_KEY environment variable.
/// Returns Some(key) if the env var is set and non-empty, None otherwise.
pub fn get_key_from_env() -> Option<String> {
    match std::env::var(ENV_KEY_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

#[derive(Debug)]
pub enum CredentialError {
    KeyNotFound,
    ReadFailed(String),
    StoreFailed(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::KeyNotFound => write!(f, "API key not found"),
            CredentialError::ReadFailed(msg) => write!(f, "Failed to read key file: {}", msg),
            CredentialError::StoreFailed(msg) => write!(f, "Failed to store API key: {}", msg),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Retrieve the API key from the key file under the config directory
pub fn get_key() -> Result<String, CredentialError> {
    let path = get_key_path();
    if !path.exists() {
        return Err(CredentialError::KeyNotFound);
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| CredentialError::ReadFailed(format!("{}", e)))?;

    let key = content.trim().to_string();
    if key.is_empty() {
        Err(CredentialError::KeyNotFound)
    } else {
        Ok(key)
    }
}

/// Store the API key in the key file under the config directory
pub fn store_key(key: &str) -> Result<(), CredentialError> {
    crate::config::ensure_config_dir()
        .map_err(|e| CredentialError::StoreFailed(format!("{}", e)))?;

    std::fs::write(get_key_path(), key)
        .map_err(|e| CredentialError::StoreFailed(format!("{}", e)))
}
