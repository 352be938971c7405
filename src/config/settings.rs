//! User settings for FinTrack
//!
//! Manages user preferences: the display currency every aggregate is
//! converted into, the base currency for transactions recorded without one,
//! and the default analytics window.

use serde::{Deserialize, Serialize};

use super::paths::FinTrackPaths;
use crate::error::FinTrackError;
use crate::models::CurrencyCode;
use crate::services::period::clamp_period;

/// User settings for FinTrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency all analytics and dashboard figures are shown in
    #[serde(default)]
    pub display_currency: CurrencyCode,

    /// Currency assumed for new transactions entered without one
    #[serde(default)]
    pub base_currency: CurrencyCode,

    /// Default analytics window in months (current month included)
    #[serde(default = "default_analytics_period")]
    pub analytics_period: u32,

    /// Number of transactions shown in the overview's recent list
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_analytics_period() -> u32 {
    6
}

fn default_recent_count() -> usize {
    8
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            display_currency: CurrencyCode::default(),
            base_currency: CurrencyCode::default(),
            analytics_period: default_analytics_period(),
            recent_count: default_recent_count(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// The analytics window, clamped to the supported range
    pub fn analytics_period(&self) -> u32 {
        clamp_period(self.analytics_period)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinTrackPaths) -> Result<Self, FinTrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinTrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinTrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinTrackPaths) -> Result<(), FinTrackError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinTrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            FinTrackError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
