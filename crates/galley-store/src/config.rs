//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     GALLEY_CONFIRMATION_DELAY_MS=500                                    │
//! │     GALLEY_FAILURE_PROBABILITY=0.1                                      │
//! │     GALLEY_PAGE_SIZE=5                                                  │
//! │     GALLEY_LOG=info,galley=debug                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/galley-admin/config.toml (Linux)                          │
//! │     ~/Library/Application Support/com.galley.admin/config.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [toggle]
//! confirmation_delay_ms = 500
//! failure_probability = 0.1
//!
//! [orders]
//! page_size = 5
//!
//! [dashboard]
//! preview_len = 5
//!
//! [logging]
//! filter = "info,galley=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use galley_core::validation::validate_probability;
use galley_core::{DEFAULT_PAGE_SIZE, DEFAULT_PREVIEW_LEN};

use crate::error::{StoreError, StoreResult};
use crate::store::StoreSettings;

// =============================================================================
// Toggle Settings
// =============================================================================

/// Timing and failure rate of the simulated availability confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleSettings {
    /// How long the confirmation takes to resolve (milliseconds).
    #[serde(default = "default_confirmation_delay")]
    pub confirmation_delay_ms: u64,

    /// Chance that a confirmation fails and the toggle is rolled back.
    #[serde(default = "default_failure_probability")]
    pub failure_probability: f64,
}

fn default_confirmation_delay() -> u64 {
    500
}

fn default_failure_probability() -> f64 {
    0.1
}

impl Default for ToggleSettings {
    fn default() -> Self {
        ToggleSettings {
            confirmation_delay_ms: default_confirmation_delay(),
            failure_probability: default_failure_probability(),
        }
    }
}

// =============================================================================
// List Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersSettings {
    /// Rows per page on the orders table.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for OrdersSettings {
    fn default() -> Self {
        OrdersSettings {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Recent orders / featured items shown on the dashboard.
    #[serde(default = "default_preview_len")]
    pub preview_len: usize,
}

fn default_preview_len() -> usize {
    DEFAULT_PREVIEW_LEN
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            preview_len: default_preview_len(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` still wins.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,galley=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration for the store and the demo binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleyConfig {
    #[serde(default)]
    pub toggle: ToggleSettings,

    #[serde(default)]
    pub orders: OrdersSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl GalleyConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if anything goes wrong.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes the configuration as pretty TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> StoreResult<()> {
        validate_probability("failure_probability", self.toggle.failure_probability)
            .map_err(|e| StoreError::InvalidConfig(e.to_string()))?;

        if self.orders.page_size == 0 {
            return Err(StoreError::InvalidConfig(
                "page_size must be greater than 0".into(),
            ));
        }

        if self.dashboard.preview_len == 0 {
            return Err(StoreError::InvalidConfig(
                "preview_len must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `GALLEY_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("GALLEY_CONFIRMATION_DELAY_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => {
                    debug!(ms, "Overriding confirmation delay from environment");
                    self.toggle.confirmation_delay_ms = ms;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid GALLEY_CONFIRMATION_DELAY_MS"),
            }
        }

        if let Some(raw) = lookup("GALLEY_FAILURE_PROBABILITY") {
            match raw.parse::<f64>() {
                Ok(p) => {
                    debug!(p, "Overriding failure probability from environment");
                    self.toggle.failure_probability = p;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid GALLEY_FAILURE_PROBABILITY"),
            }
        }

        if let Some(raw) = lookup("GALLEY_PAGE_SIZE") {
            match raw.parse::<usize>() {
                Ok(size) => self.orders.page_size = size,
                Err(_) => warn!(value = %raw, "Ignoring invalid GALLEY_PAGE_SIZE"),
            }
        }

        if let Some(filter) = lookup("GALLEY_LOG") {
            self.logging.filter = filter;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "galley", "admin")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Runtime settings handed to `RestaurantStore::new`.
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            confirmation_delay: Duration::from_millis(self.toggle.confirmation_delay_ms),
            failure_probability: self.toggle.failure_probability,
            page_size: self.orders.page_size,
            preview_len: self.dashboard.preview_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = GalleyConfig::default();
        assert_eq!(config.toggle.confirmation_delay_ms, 500);
        assert!((config.toggle.failure_probability - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.orders.page_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GalleyConfig::from_toml("[toggle]\nfailure_probability = 0.5\n").unwrap();
        assert!((config.toggle.failure_probability - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.toggle.confirmation_delay_ms, 500);
        assert_eq!(config.dashboard.preview_len, 5);
    }

    #[test]
    fn test_malformed_toml_is_a_load_error() {
        let err = GalleyConfig::from_toml("[toggle\n").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GalleyConfig::default();
        config.toggle.failure_probability = 1.5;
        assert!(config.validate().is_err());

        config.toggle.failure_probability = 0.0;
        config.orders.page_size = 0;
        assert!(config.validate().is_err());

        config.orders.page_size = 10;
        config.dashboard.preview_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GALLEY_CONFIRMATION_DELAY_MS", "50"),
            ("GALLEY_FAILURE_PROBABILITY", "not-a-number"),
            ("GALLEY_PAGE_SIZE", "20"),
            ("GALLEY_LOG", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = GalleyConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.toggle.confirmation_delay_ms, 50);
        assert!((config.toggle.failure_probability - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.orders.page_size, 20);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_store_settings() {
        let settings = GalleyConfig::default().store_settings();
        assert_eq!(settings.confirmation_delay, Duration::from_millis(500));
        assert_eq!(settings.page_size, 5);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("galley").join("config.toml");

        let mut config = GalleyConfig::default();
        config.toggle.confirmation_delay_ms = 250;
        config.toggle.failure_probability = 0.25;
        config.orders.page_size = 12;
        config.logging.filter = "warn".to_string();

        config.save(Some(path.clone())).unwrap();
        assert!(path.exists());

        let loaded = GalleyConfig::load(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GalleyConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.orders.page_size, GalleyConfig::default().orders.page_size);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&GalleyConfig::default()).unwrap();
        assert!(toml_str.contains("[toggle]"));
        assert!(toml_str.contains("[orders]"));
        assert_eq!(GalleyConfig::from_toml(&toml_str).unwrap(), GalleyConfig::default());
    }
}
