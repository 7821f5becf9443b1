//! Configuration file parser for the site's feed ingestion settings.
//!
//! The config file is optional; a missing file yields `Config::default()`,
//! which has no sources and therefore makes a run a no-op. Unknown keys are
//! accepted but logged, since they are most likely typos.
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::feed::fetcher::DEFAULT_USER_AGENT;
use crate::ingest::Source;
use crate::publish::DEFAULT_EXTENSION;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level ingestion configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feeds to ingest, in the order they should be processed.
    ///
    /// A non-array value is treated as "no sources". Entries that are not
    /// tables are dropped with a warning.
    #[serde(deserialize_with = "lenient_sources")]
    pub external_sources: Vec<Source>,

    /// Per-request fetch timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every feed request.
    pub user_agent: String,

    /// Number of sources fetched at once.
    pub concurrency: usize,

    /// File extension for generated post documents.
    pub post_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            external_sources: Vec::new(),
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 4,
            post_extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "external_sources",
        "timeout_secs",
        "user_agent",
        "concurrency",
        "post_extension",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text. Blank text yields the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            sources = config.external_sources.len(),
            timeout_secs = config.timeout_secs,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn lenient_sources<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match toml::Value::deserialize(deserializer)? {
        toml::Value::Array(items) => items,
        other => {
            tracing::warn!(
                found = other.type_str(),
                "external_sources is not an array, ignoring"
            );
            return Ok(Vec::new());
        }
    };

    let sources = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item.try_into::<Source>() {
            Ok(source) => Some(source),
            Err(e) => {
                tracing::warn!(index = index, error = %e, "Ignoring malformed external source");
                None
            }
        })
        .collect();

    Ok(sources)
}

// ============================================================================
// Tests
// ============================================================================
