//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.smalltalk-admin/config.toml`. If missing on first run,
//! a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub port: Option<u16>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BotConfig {
    pub poll_interval_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BehaviorConfig {
    pub tolerate_delete_errors: Option<bool>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub port: Option<u16>,
    pub page_size: Option<u32>,
    pub poll_interval_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "SMALLTALK_API_URL";
pub const ENV_PORT: &str = "SMALLTALK_API_PORT";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub page_size: u32,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub tolerate_delete_errors: bool,
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

/// Returns the path to `~/.smalltalk-admin/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".smalltalk-admin").join("config.toml"))
}

/// Load config from `~/.smalltalk-admin/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AdminConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AdminConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AdminConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AdminConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: AdminConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# smalltalk-admin configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8000"   # Or set SMALLTALK_API_URL
# port = 8000                          # Or set SMALLTALK_API_PORT; replaces the URL's port
# request_timeout_secs = 30

# [ui]
# page_size = 10

# [bot]
# poll_interval_secs = 30

# [behavior]
# Treat a delete whose connection failed (no HTTP status) as having succeeded.
# tolerate_delete_errors = true
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AdminConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &AdminConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env(ENV_BASE_URL))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Port: CLI → env → config
    let port = cli.port.or_else(|| {
        env(ENV_PORT)
            .and_then(|p| match p.trim().parse::<u16>() {
                Ok(port) => Some(port),
                Err(e) => {
                    warn!("Ignoring {}={:?}: {}", ENV_PORT, p, e);
                    None
                }
            })
            .or(config.api.port)
    });

    let base_url = match port {
        Some(port) => apply_port(&base_url, port),
        None => base_url,
    };

    let page_size = cli
        .page_size
        .or(config.ui.page_size)
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let poll_secs = cli
        .poll_interval_secs
        .or(config.bot.poll_interval_secs)
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

    ResolvedConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        page_size,
        poll_interval: Duration::from_secs(poll_secs),
        request_timeout: Duration::from_secs(
            config
                .api
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        tolerate_delete_errors: config.behavior.tolerate_delete_errors.unwrap_or(true),
    }
}

/// Replaces the port of `base_url`. Unparseable URLs are returned unchanged.
fn apply_port(base_url: &str, port: u16) -> String {
    match reqwest::Url::parse(base_url) {
        Ok(mut url) => {
            if url.set_port(Some(port)).is_err() {
                warn!("Cannot set a port on {}", base_url);
                return base_url.to_string();
            }
            url.to_string()
        }
        Err(e) => {
            warn!("Invalid base URL {:?}: {}", base_url, e);
            base_url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&AdminConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(resolved.poll_interval, Duration::from_secs(30));
        assert_eq!(resolved.request_timeout, Duration::from_secs(30));
        assert!(resolved.tolerate_delete_errors);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let config = AdminConfig {
            api: ApiConfig {
                base_url: Some("http://from-file:9000".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "https://api.example.com/api/v1/"),
            (ENV_PORT, "8443"),
        ]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), |k| {
            env.get(k).map(|v| v.to_string())
        });
        assert_eq!(resolved.base_url, "https://api.example.com:8443/api/v1");
    }

    #[test]
    fn test_cli_wins_over_env() {
        let cli = CliOverrides {
            base_url: Some("http://cli-host".to_string()),
            port: Some(7000),
            page_size: Some(25),
            poll_interval_secs: Some(5),
        };
        let resolved = resolve_with_env(&AdminConfig::default(), &cli, |k| {
            (k == ENV_BASE_URL).then(|| "http://env-host".to_string())
        });
        assert_eq!(resolved.base_url, "http://cli-host:7000");
        assert_eq!(resolved.page_size, 25);
        assert_eq!(resolved.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_env_port_is_ignored() {
        let resolved = resolve_with_env(&AdminConfig::default(), &CliOverrides::default(), |k| {
            (k == ENV_PORT).then(|| "not-a-port".to_string())
        });
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_zero_page_size_falls_back_to_default() {
        let cli = CliOverrides {
            page_size: Some(0),
            ..Default::default()
        };
        let resolved = resolve_with_env(&AdminConfig::default(), &cli, no_env);
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[api]
base_url = "http://10.0.0.5:8000/api/v1"
request_timeout_secs = 5

[ui]
page_size = 20

[bot]
poll_interval_secs = 60

[behavior]
tolerate_delete_errors = false
"#;
        let config: AdminConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://10.0.0.5:8000/api/v1")
        );
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://10.0.0.5:8000/api/v1");
        assert_eq!(resolved.page_size, 20);
        assert_eq!(resolved.poll_interval, Duration::from_secs(60));
        assert_eq!(resolved.request_timeout, Duration::from_secs(5));
        assert!(!resolved.tolerate_delete_errors);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: AdminConfig = toml::from_str("[ui]\npage_size = 15\n").unwrap();
        assert_eq!(config.ui.page_size, Some(15));
        assert!(config.api.base_url.is_none());
        assert!(config.behavior.tolerate_delete_errors.is_none());
    }
}
