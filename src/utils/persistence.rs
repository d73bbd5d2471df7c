//! Save-file locations.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::progression::error::{ProgressionError, ProgressionResult};

pub const PROGRESSION_FILE: &str = "progression.dat";

/// Platform config directory for BagsWorld, created if needed.
pub fn save_dir() -> ProgressionResult<PathBuf> {
    let project_dirs =
        ProjectDirs::from("", "", "bagsworld").ok_or(ProgressionError::NoSaveDirectory)?;
    let dir = project_dirs.config_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a save file inside `save_dir()`.
pub fn save_path(filename: &str) -> ProgressionResult<PathBuf> {
    Ok(save_dir()?.join(filename))
}
