use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$EVOLVE_HOME`, else `$HOME/.evolve`
pub fn evolve_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("EVOLVE_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".evolve"))
}

pub fn ensure_evolve_home() -> Result<PathBuf> {
    let dir = evolve_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
