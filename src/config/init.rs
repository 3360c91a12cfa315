use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, InventoryConfig, StoreConfig};
use crate::inventory::AnswerScale;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("EnneaMind Configuration Wizard");
    println!("==============================");
    println!();

    // 1. Data service
    println!("The questionnaire reads its item bank from a hosted data service");
    println!("and writes responses and results back to it.");
    let url = loop {
        let input = prompt("Data service URL (e.g., https://example.supabase.co): ")?;
        if input.starts_with("http://") || input.starts_with("https://") {
            break input;
        }
        println!("  Invalid: must start with http:// or https://. Try again.");
    };

    let store_key = prompt(
        "API key (leave empty to be prompted on first run, or set ENNEAMIND_API_KEY): ",
    )?;
    let api_key = if store_key.is_empty() {
        None
    } else {
        Some(store_key)
    };

    // 2. Inventory presentation
    println!();
    let scale: u8 = loop {
        let input = prompt_with_default("Answer scale (4 or 5)", "4")?;
        match input.parse::<u8>() {
            Ok(v) if AnswerScale::from_max(v).is_some() => break v,
            _ => println!("  Invalid: only the 4-point and 5-point inventories exist. Try again."),
        }
    };

    let page_size: usize = loop {
        let input = prompt_with_default("Items per page", "10")?;
        match input.parse::<usize>() {
            Ok(v) if v >= 1 => break v,
            _ => println!("  Invalid: must be a positive number. Try again."),
        }
    };

    // 3. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 4. Write config
    let config = Config {
        store: StoreConfig { url, api_key },
        inventory: Some(InventoryConfig {
            scale: Some(scale),
            page_size: Some(page_size),
        }),
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `enneamind` to take the questionnaire.");

    Ok(())
}
