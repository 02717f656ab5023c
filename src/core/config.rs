//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.gamefinder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::chat::DEFAULT_HISTORY_WINDOW;
use crate::core::search::{DEFAULT_PAGE_SIZE, DEFAULT_TOP_K};
use crate::core::storage::LocalStorage;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GameFinderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub api_url: Option<String>,
    pub top_k: Option<usize>,
    pub page_size: Option<usize>,
    pub history_window: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub storage_dir: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "GAMEFINDER_API_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base URL without a trailing slash.
    pub api_base: String,
    pub top_k: usize,
    pub page_size: usize,
    pub history_window: usize,
    pub request_timeout: Option<Duration>,
    pub storage_dir: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.gamefinder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gamefinder").join("config.toml"))
}

/// Load config from `~/.gamefinder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GameFinderConfig::default()`.
pub fn load_config() -> Result<GameFinderConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(GameFinderConfig::default())
        }
    }
}

/// Same as [`load_config`] for an explicit path. Malformed TOML is `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<GameFinderConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(GameFinderConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GameFinderConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# GameFinder Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# api_url = "http://localhost:8000"   # Or set GAMEFINDER_API_URL / --api-url
# top_k = 64                          # Results requested per search
# page_size = 8                       # Cards revealed per "show more"
# history_window = 10                 # Chat messages sent as context
# request_timeout_secs = 30           # Unset = wait indefinitely
# storage_dir = "/home/me/.gamefinder/storage"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GameFinderConfig, cli_api_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_api_url, std::env::var(API_URL_ENV).ok())
}

fn resolve_with_env(
    config: &GameFinderConfig,
    cli_api_url: Option<&str>,
    env_api_url: Option<String>,
) -> ResolvedConfig {
    // API base: CLI → env → config → default
    let api_base = cli_api_url
        .map(|s| s.to_string())
        .or(env_api_url)
        .or_else(|| config.general.api_url.clone())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_base = api_base.trim().trim_end_matches('/').to_string();

    let storage_dir = config
        .general
        .storage_dir
        .clone()
        .or_else(|| LocalStorage::default_dir().ok())
        .unwrap_or_else(|| PathBuf::from(".gamefinder").join("storage"));

    ResolvedConfig {
        api_base,
        top_k: config.general.top_k.unwrap_or(DEFAULT_TOP_K),
        page_size: config
            .general
            .page_size
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE),
        history_window: config
            .general
            .history_window
            .unwrap_or(DEFAULT_HISTORY_WINDOW),
        request_timeout: config
            .general
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        storage_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&GameFinderConfig::default(), None, None);
        assert_eq!(resolved.api_base, DEFAULT_API_URL);
        assert_eq!(resolved.top_k, 64);
        assert_eq!(resolved.page_size, 8);
        assert_eq!(resolved.history_window, 10);
        assert!(resolved.request_timeout.is_none());
    }

    #[test]
    fn test_override_order() {
        let config = GameFinderConfig {
            general: GeneralConfig {
                api_url: Some("http://from-config:1".to_string()),
                ..Default::default()
            },
        };

        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.api_base, "http://from-config:1");

        let resolved = resolve_with_env(&config, None, Some("http://from-env:2".into()));
        assert_eq!(resolved.api_base, "http://from-env:2");

        let resolved = resolve_with_env(
            &config,
            Some("http://from-cli:3/"),
            Some("http://from-env:2".into()),
        );
        assert_eq!(resolved.api_base, "http://from-cli:3");
    }

    #[test]
    fn test_config_values_override_defaults() {
        let config = GameFinderConfig {
            general: GeneralConfig {
                top_k: Some(16),
                page_size: Some(4),
                history_window: Some(2),
                request_timeout_secs: Some(30),
                storage_dir: Some(PathBuf::from("/tmp/gf")),
                ..Default::default()
            },
        };
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.top_k, 16);
        assert_eq!(resolved.page_size, 4);
        assert_eq!(resolved.history_window, 2);
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(resolved.storage_dir, PathBuf::from("/tmp/gf"));
    }

    #[test]
    fn test_zero_page_size_and_timeout_fall_back() {
        let config = GameFinderConfig {
            general: GeneralConfig {
                page_size: Some(0),
                request_timeout_secs: Some(0),
                ..Default::default()
            },
        };
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
        assert!(resolved.request_timeout.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
api_url = "https://games.example.com/"
"#;
        let config: GameFinderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.api_url.as_deref(),
            Some("https://games.example.com/")
        );
        assert!(config.general.top_k.is_none());
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.api_base, "https://games.example.com");
    }

    #[test]
    fn test_generated_default_parses_as_empty() {
        let dir = std::env::temp_dir().join(format!("gamefinder-cfg-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let first = load_config_from(&path).unwrap();
        assert!(first.general.api_url.is_none());
        assert!(path.exists());

        let second = load_config_from(&path).unwrap();
        assert!(second.general.api_url.is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("gamefinder-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\napi_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(dir);
    }
}
