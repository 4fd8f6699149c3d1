//! Tunable timings and game knobs, persisted as JSON (XDG config or ~/.config/chain-pop).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{EffectKind, DEFAULT_MOVES_AVAILABLE};

const FILENAME: &str = "tunables.json";

/// Allowed range for the gravity speed multiplier.
pub const GRAVITY_MULTIPLIER_RANGE: (f32, f32) = (0.1, 5.0);
/// Allowed range for spawn start and despawn end scales.
pub const ANIMATION_SCALE_RANGE: (f32, f32) = (0.01, 0.5);

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tunables: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no effect registered for kind `{}`", .0.as_str())]
    UnknownEffect(EffectKind),
}

/// The designer-facing timing and animation values, one flat record.
///
/// Movement: `movement_check_interval`, `element_move_duration`,
/// `position_update_threshold`, `gravity_multiplier`. Turn pacing:
/// `respawn_delay`, `despawn_delay`. Element animation: `spawn_duration`,
/// `despawn_duration`, `spawn_start_scale`, `despawn_end_scale`.
/// All durations and delays are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tunables {
    pub movement_check_interval: f32,
    pub element_move_duration: f32,
    pub position_update_threshold: f32,
    pub gravity_multiplier: f32,
    pub respawn_delay: f32,
    pub despawn_delay: f32,
    pub spawn_duration: f32,
    pub despawn_duration: f32,
    pub spawn_start_scale: f32,
    pub despawn_end_scale: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            movement_check_interval: 0.05,
            element_move_duration: 0.4,
            position_update_threshold: 0.01,
            gravity_multiplier: 1.0,
            respawn_delay: 0.4,
            despawn_delay: 0.4,
            spawn_duration: 0.25,
            despawn_duration: 0.25,
            spawn_start_scale: 0.1,
            despawn_end_scale: 0.1,
        }
    }
}

impl Tunables {
    /// Clamps the multiplier and scale fields into their allowed ranges.
    pub fn clamped(mut self) -> Self {
        let (g_min, g_max) = GRAVITY_MULTIPLIER_RANGE;
        let (s_min, s_max) = ANIMATION_SCALE_RANGE;
        self.gravity_multiplier = self.gravity_multiplier.clamp(g_min, g_max);
        self.spawn_start_scale = self.spawn_start_scale.clamp(s_min, s_max);
        self.despawn_end_scale = self.despawn_end_scale.clamp(s_min, s_max);
        self
    }

    /// Reads tunables from `path`, clamping out-of-range values.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let tunables: Tunables = serde_json::from_str(&text)?;
        Ok(tunables.clamped())
    }

    /// Writes tunables as pretty JSON, creating the config directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Game-level knobs supplied at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Turns the player may spend before the session ends.
    pub moves_available: u32,
    /// When false, every committed chain resolves as a normal match.
    pub power_ups_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            moves_available: DEFAULT_MOVES_AVAILABLE,
            power_ups_enabled: false,
        }
    }
}

/// Returns the path to the tunables file (config dir / chain-pop / tunables.json).
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir().join(FILENAME))
}

pub(crate) fn config_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if xdg.is_empty() {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".config")
        } else {
            PathBuf::from(xdg)
        }
    } else {
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from("."))
    };
    base.join("chain-pop")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chain-pop-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_match_designer_values() {
        let t = Tunables::default();
        assert_eq!(t.movement_check_interval, 0.05);
        assert_eq!(t.element_move_duration, 0.4);
        assert_eq!(t.gravity_multiplier, 1.0);
        assert_eq!(t.spawn_start_scale, 0.1);
        assert_eq!(t.despawn_end_scale, 0.1);
    }

    #[test]
    fn test_clamp_pulls_values_into_range() {
        let t = Tunables {
            gravity_multiplier: 12.0,
            spawn_start_scale: 0.0,
            despawn_end_scale: 3.0,
            ..Tunables::default()
        }
        .clamped();
        assert_eq!(t.gravity_multiplier, 5.0);
        assert_eq!(t.spawn_start_scale, 0.01);
        assert_eq!(t.despawn_end_scale, 0.5);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = temp_file("roundtrip.json");
        let saved = Tunables {
            respawn_delay: 0.75,
            ..Tunables::default()
        };
        saved.save(&path).unwrap();
        let loaded = Tunables::try_load(&path).unwrap();
        assert_eq!(loaded, saved);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_clamps_persisted_values() {
        let path = temp_file("clamp.json");
        let wild = Tunables {
            gravity_multiplier: 99.0,
            ..Tunables::default()
        };
        wild.save(&path).unwrap();
        let loaded = Tunables::try_load(&path).unwrap();
        assert_eq!(loaded.gravity_multiplier, 5.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let path = temp_file("does-not-exist.json");
        assert!(matches!(
            Tunables::try_load(&path),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let path = temp_file("malformed.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Tunables::try_load(&path),
            Err(ConfigError::Malformed(_))
        ));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.moves_available, 20);
        assert!(!config.power_ups_enabled);
    }
}
