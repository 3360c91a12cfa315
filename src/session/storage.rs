use super::types::SessionState;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default session state file path (~/.config/enneamind/session.json)
pub fn get_session_path() -> PathBuf {
    crate::config::get_config_dir().join("session.json")
}

/// Load session state from a JSON file
///
/// If the file doesn't exist, returns a fresh state with a new identity.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_session_state(path: &Path) -> Result<SessionState> {
    if !path.exists() {
        return Ok(SessionState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open session state file at {}", path.display()))?;

    let state: SessionState =
        serde_json::from_reader(file).context("Failed to load session state")?;

    // Version check
    if state.version != 1 {
        anyhow::bail!("Unsupported session state version: {}", state.version);
    }

    Ok(state)
}

/// Save session state to a JSON file atomically
///
/// Uses atomic-write-file to ensure the file is never left in a corrupted state.
/// Creates the config directory if it doesn't exist.
pub fn save_session_state(path: &Path, state: &SessionState) -> Result<()> {
    // Ensure config directory exists
    crate::config::ensure_config_dir()?;

    // Open atomic write file
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    // Write JSON with pretty formatting
    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize session state")?;

    // Commit the write atomically
    file.commit().context("Failed to save session state")?;

    Ok(())
}
