use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "boardtally";

/// Directory holding the persisted configuration. Created on first use.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("no user config directory on this system")?;
    ensure_dir(base.join(APP_DIR))
}

/// Directory holding logs and other run state. Created on first use.
pub fn state_dir() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .context("no user state directory on this system")?;
    ensure_dir(base.join(APP_DIR))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&path)
        .with_context(|| format!("could not create application directory {}", path.display()))?;
    Ok(path)
}
