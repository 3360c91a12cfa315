mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{Config, InventoryConfig, StoreConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::inventory::AnswerScale;

/// Get the config directory path (~/.config/enneamind/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("enneamind")
}

/// Get the default config file path (~/.config/enneamind/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory at {}", config_dir.display())
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/enneamind/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `enneamind init` to create one.",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.store.url.trim().is_empty() {
        errors.push("store.url: must not be empty".to_string());
    } else if !config.store.url.starts_with("http://") && !config.store.url.starts_with("https://")
    {
        errors.push(format!(
            "store.url: '{}' must start with http:// or https://",
            config.store.url
        ));
    }

    if let Some(ref inventory) = config.inventory {
        if let Some(scale) = inventory.scale {
            if AnswerScale::from_max(scale).is_none() {
                errors.push(format!(
                    "inventory.scale: {} is not supported (use 4 or 5)",
                    scale
                ));
            }
        }
        if let Some(page_size) = inventory.page_size {
            if page_size == 0 {
                errors.push("inventory.page_size: must be at least 1".to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
