//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\musophile\config.toml
//! - macOS: ~/Library/Application Support/musophile/config.toml
//! - Linux: ~/.config/musophile/config.toml
//!
//! The config file is human-readable and editable. Every section is
//! optional; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::search::musicbrainz;
use crate::search::spotify::{self, EnrichmentStrategy};
use crate::search::widget::WidgetOptions;
use crate::search::SearchAttribute;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Metadata search settings
    pub metadata: MetadataConfig,

    /// Track matching settings
    pub enrichment: EnrichmentConfig,

    /// Search defaults
    pub search: SearchConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Spotify access token, used by the direct strategy when no page is given
    pub access_token: Option<String>,
    /// The proxy backend holds a token for this user (the page's has-token
    /// marker, for runs without a page)
    pub backend_has_token: bool,
}

/// MusicBrainz settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Web service root
    pub base_url: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: musicbrainz::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Track matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// "proxy" (trusted backend) or "direct" (Spotify Web API)
    pub strategy: EnrichmentStrategy,

    /// Backend proxy root, queried as `{proxy_base_url}/{title}/{artist}`
    pub proxy_base_url: String,

    /// Spotify search endpoint
    pub api_base_url: String,

    /// Track lookups in flight at once (1 = one at a time)
    pub concurrency: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            strategy: EnrichmentStrategy::Proxy,
            proxy_base_url: spotify::DEFAULT_PROXY_BASE_URL.to_string(),
            api_base_url: spotify::DEFAULT_API_BASE_URL.to_string(),
            concurrency: 1,
        }
    }
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Attribute used when none is given
    pub default_attribute: SearchAttribute,

    /// Result limit used when none is given
    pub default_limit: u32,

    /// Hard cap on any requested limit (MusicBrainz allows at most 100)
    pub max_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_attribute: SearchAttribute::Recording,
            default_limit: 25,
            max_limit: 100,
        }
    }
}

impl Config {
    /// Widget tunables derived from this config
    pub fn widget_options(&self) -> WidgetOptions {
        WidgetOptions {
            max_limit: self.search.max_limit.max(1),
            concurrency: self.enrichment.concurrency.max(1),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("musophile"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, falling back to defaults
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
