mod config;
pub mod database;

pub use config::{BreathingConfig, Config, CuesConfig, MeditationConfig};
pub use database::{Database, WorkoutRecord, WorkoutStats};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/glowkit[-dev]/` based on GLOWKIT_ENV.
///
/// Set GLOWKIT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("GLOWKIT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("glowkit-dev")
    } else {
        base_dir.join("glowkit")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
