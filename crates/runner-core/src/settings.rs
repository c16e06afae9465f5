use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, RunnerError};

/// Largest precision accepted for displayed distances.
pub const MAX_DISPLAY_DECIMALS: u32 = 6;

// ── Settings ───────────────────────────────────────────────────────────────────

/// Runtime configuration, persisted to `~/.csv-runner/settings.json`.
///
/// Every field has a default, so partial documents load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logging level (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`).
    pub log_level: String,
    /// Decimal places used when formatting distances for display.
    pub display_decimals: u32,
    /// Reject paths that do not end in `.csv` before reading them.
    pub require_csv_extension: bool,
    /// Write log output to this file instead of stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            display_decimals: 2,
            require_csv_extension: true,
            log_file: None,
        }
    }
}

impl Settings {
    /// Return the default path to the settings file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the settings path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".csv-runner").join("settings.json")
    }

    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from an explicit path.
    /// Returns `Default` when the file is absent, unparsable or out of range.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to parse settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.display_decimals > MAX_DISPLAY_DECIMALS {
            return Err(RunnerError::Config(format!(
                "display_decimals must be at most {}, got {}",
                MAX_DISPLAY_DECIMALS, self.display_decimals
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(RunnerError::Config("log_level must not be empty".to_string()));
        }
        Ok(())
    }

    /// Atomically write settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write settings to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the settings file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
