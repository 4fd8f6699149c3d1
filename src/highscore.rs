//! Persist the best session score to disk (XDG config or ~/.config/chain-pop).

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{config_dir, ConfigError};

const FILENAME: &str = "highscore";

/// Returns the path to the high score file (config dir / chain-pop / highscore).
pub fn highscore_path() -> PathBuf {
    config_dir().join(FILENAME)
}

/// Loads the stored high score. Returns 0 on a missing or unreadable file.
pub fn load_highscore() -> u32 {
    load_from(&highscore_path())
}

/// Stores `score` as the new high score, creating the config directory if needed.
pub fn save_highscore(score: u32) -> Result<(), ConfigError> {
    save_to(&highscore_path(), score)
}

/// Folds a finished session's score into the stored record.
/// Returns true when `score` beat the previous best and was written.
pub fn record_highscore(score: u32) -> Result<bool, ConfigError> {
    if score > load_highscore() {
        save_highscore(score)?;
        return Ok(true);
    }
    Ok(false)
}

fn load_from(path: &Path) -> u32 {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return 0,
    };
    content.trim().parse::<u32>().unwrap_or(0)
}

fn save_to(path: &Path, score: u32) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", score))?;
    Ok(())
}
