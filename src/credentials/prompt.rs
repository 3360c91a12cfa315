use anyhow::{Context, Result};

use super::{get_key, get_key_from_env, store_key, CredentialError};
use crate::config::Config;

/// Prompts user to enter the data service API key
pub fn prompt_for_key() -> Result<String> {
    println!("Data service API key required.");
    println!("Find it in your project's API settings (the anon/service key).");
    println!();

    let key = rpassword::prompt_password("Enter API key: ")
        .context("Failed to read API key from stdin")?;

    let key = key.trim();

    if key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    Ok(key.to_string())
}

/// Resolve the API key, prompting on first run.
///
/// Resolution order: ENNEAMIND_API_KEY env var, then the config file,
/// then the key file under the config directory, then an interactive
/// prompt whose answer is stored for next time.
pub fn setup_key_if_missing(config: &Config) -> Result<String> {
    if let Some(key) = get_key_from_env() {
        return Ok(key);
    }

    if let Some(ref key) = config.store.api_key {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }

    match get_key() {
        Ok(key) => Ok(key),
        Err(CredentialError::KeyNotFound) => {
            // Key missing, prompt for it
            let key = prompt_for_key()?;

            store_key(&key).context("Failed to store API key")?;

            println!("API key stored in the config directory.");

            Ok(key)
        }
        Err(e) => anyhow::bail!("Failed to read API key: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StoreConfig};

    fn config_with_key(key: Option<&str>) -> Config {
        Config {
            store: StoreConfig {
                url: "https://example.supabase.co".to_string(),
                api_key: key.map(str::to_string),
            },
            inventory: None,
        }
    }

    #[test]
    fn test_config_key_wins_over_key_file() {
        let config = config_with_key(Some("from-config"));
        let key = setup_key_if_missing(&config).unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn test_config_key_is_trimmed() {
        let config = config_with_key(Some("  spaced-key  "));
        let key = setup_key_if_missing(&config).unwrap();
        assert_eq!(key, "spaced-key");
    }
}
