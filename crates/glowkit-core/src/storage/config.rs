//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Breathing phase durations
//! - Default meditation session length
//! - Cue output mode (audio bell vs. visual text)
//!
//! Configuration is stored at `~/.config/glowkit/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{PhaseTable, DEFAULT_COUNTDOWN_SECS};

/// Breathing sequencer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default)]
    pub phases: PhaseTable,
}

/// Meditation countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationConfig {
    /// Preferred session length in seconds. Values outside the preset
    /// list are silently replaced with the default when a timer is built.
    #[serde(default = "default_session_secs")]
    pub default_secs: u64,
}

/// Cue output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuesConfig {
    /// Ring the terminal bell on phase shifts and completions.
    #[serde(default = "default_true")]
    pub audio: bool,
}

fn default_session_secs() -> u64 {
    DEFAULT_COUNTDOWN_SECS
}
fn default_true() -> bool {
    true
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            phases: PhaseTable::default(),
        }
    }
}

impl Default for MeditationConfig {
    fn default() -> Self {
        Self {
            default_secs: default_session_secs(),
        }
    }
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self { audio: true }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/glowkit/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub meditation: MeditationConfig,
    #[serde(default)]
    pub cues: CuesConfig,
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/glowkit"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, text).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Set a dotted `section.key` to a string value, as used by
    /// `config set` in the CLI.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        let parse_u64 = |v: &str| v.parse::<u64>().map_err(|_| invalid("expected an integer"));
        // A zero-length phase table would leave the sequencer with nothing
        // to advance through.
        let parse_duration = |v: &str| match parse_u64(v)? {
            0 => Err(invalid("phase duration must be at least 1 ms")),
            ms => Ok(ms),
        };

        match key {
            "breathing.in_ms" => self.breathing.phases.in_ms = parse_duration(value)?,
            "breathing.hold_ms" => self.breathing.phases.hold_ms = parse_duration(value)?,
            "breathing.out_ms" => self.breathing.phases.out_ms = parse_duration(value)?,
            "breathing.rest_ms" => self.breathing.phases.rest_ms = parse_duration(value)?,
            "meditation.default_secs" => self.meditation.default_secs = parse_u64(value)?,
            "cues.audio" => {
                self.cues.audio = value
                    .parse::<bool>()
                    .map_err(|_| invalid("expected true or false"))?
            }
            _ => return Err(invalid("unknown configuration key")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_breathing_pattern() {
        let config = Config::default();
        assert_eq!(config.breathing.phases.in_ms, 4000);
        assert_eq!(config.breathing.phases.hold_ms, 7000);
        assert_eq!(config.breathing.phases.out_ms, 8000);
        assert_eq!(config.breathing.phases.rest_ms, 2000);
        assert_eq!(config.meditation.default_secs, 600);
        assert!(config.cues.audio);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.meditation.default_secs, 600);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [meditation]
            default_secs = 900

            [cues]
            audio = false
            "#,
        )
        .unwrap();
        assert_eq!(config.meditation.default_secs, 900);
        assert!(!config.cues.audio);
        assert_eq!(config.breathing.phases.in_ms, 4000);
    }

    #[test]
    fn set_value_by_dotted_key() {
        let mut config = Config::default();
        config.set_value("breathing.hold_ms", "5000").unwrap();
        assert_eq!(config.breathing.phases.hold_ms, 5000);
        config.set_value("cues.audio", "false").unwrap();
        assert!(!config.cues.audio);

        assert!(config.set_value("cues.audio", "maybe").is_err());
        assert!(config.set_value("nope", "1").is_err());
    }

    #[test]
    fn zero_phase_durations_are_rejected() {
        let mut config = Config::default();
        for key in [
            "breathing.in_ms",
            "breathing.hold_ms",
            "breathing.out_ms",
            "breathing.rest_ms",
        ] {
            assert!(config.set_value(key, "0").is_err(), "{key} accepted 0");
        }
        // Values are untouched after the rejected writes.
        assert_eq!(config.breathing.phases, PhaseTable::default());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.meditation.default_secs = 1200;
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.meditation.default_secs, 1200);
    }
}
