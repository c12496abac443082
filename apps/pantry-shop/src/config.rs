//! # Shop Configuration
//!
//! Settings for the demo driver: report locale, record file format, logging.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PANTRY_LOCALE=es-CO                                                │
//! │     PANTRY_DELIMITER=;                                                 │
//! │     PANTRY_DATE_FORMAT=%d/%m/%Y                                        │
//! │     PANTRY_LOG=debug                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/pantry/pantry.toml (Linux)                               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     en-US, comma-separated records, ISO dates                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pantry.toml
//! [locale]
//! tag = "es-CO"
//!
//! [records]
//! delimiter = ";"
//! date_format = "%Y-%m-%d"
//!
//! [logging]
//! filter = "info,pantry=debug"
//! ```

use std::path::PathBuf;

use pantry_core::RecordFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Report locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSettings {
    /// Language tag; unsupported tags render as en-US.
    #[serde(default = "default_locale_tag")]
    pub tag: String,
}

fn default_locale_tag() -> String {
    pantry_core::DEFAULT_LANGUAGE_TAG.to_string()
}

impl Default for LocaleSettings {
    fn default() -> Self {
        LocaleSettings {
            tag: default_locale_tag(),
        }
    }
}

/// Text layout of product and review record files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSettings {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// chrono format string for food best-before dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_delimiter() -> char {
    ','
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for RecordSettings {
    fn default() -> Self {
        RecordSettings {
            delimiter: default_delimiter(),
            date_format: default_date_format(),
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Log filter used when neither the config nor the environment sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,pantry=debug";

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Shop Configuration
// =============================================================================

/// Complete configuration for the shop driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub locale: LocaleSettings,

    #[serde(default)]
    pub records: RecordSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ShopConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading shop config from file");
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

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load shop config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document; absent sections and keys take defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let delimiter = self.records.delimiter;
        if delimiter.is_alphanumeric() || delimiter.is_whitespace() || delimiter == '.' {
            return Err(ConfigError::Invalid(format!(
                "record delimiter '{}' would clash with field contents",
                delimiter
            )));
        }

        if self.records.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "records.date_format must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `PANTRY_*` overrides from `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tag) = lookup("PANTRY_LOCALE") {
            debug!(locale = %tag, "Overriding locale from environment");
            self.locale.tag = tag;
        }

        if let Some(value) = lookup("PANTRY_DELIMITER") {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(delimiter), None) => self.records.delimiter = delimiter,
                _ => warn!(value = %value, "PANTRY_DELIMITER must be a single character, ignoring"),
            }
        }

        if let Some(format) = lookup("PANTRY_DATE_FORMAT") {
            self.records.date_format = format;
        }

        if let Some(filter) = lookup("PANTRY_LOG") {
            self.logging.filter = filter;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pantry", "pantry")
            .map(|dirs| dirs.config_dir().join("pantry.toml"))
    }

    /// Record layout for the batch parser.
    pub fn record_format(&self) -> RecordFormat {
        RecordFormat {
            delimiter: self.records.delimiter,
            date_format: self.records.date_format.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
