//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the church is not set there, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `MESSESINFO_CHURCH_NAME`: Church name (required)
//! - `MESSESINFO_POSTAL_CODE`: Church postal code (required)
//! - `MESSESINFO_CITY`: Church city
//! - `MESSESINFO_API_KEY`: Capability key for the JSON-RPC endpoint
//! - `MESSESINFO_BASE_URL`: Site base URL
//! - `MESSESINFO_SOURCE`: `rpc` or `html`
//! - `MESSESINFO_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `MESSESINFO_UPDATE_INTERVAL_HOURS`: Hours between refreshes
//! - `MESSESINFO_DAYS_AHEAD`: Days to scrape, starting today
//! - `MESSESINFO_RETENTION_DAYS`: Past days kept in the cache
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./messesinfo.json` or `./messesinfo.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use messesinfo_domain::{
    ChurchConfig, Config, CoordinatorConfig, MessesError, Result, ScraperConfig, SourceKind,
};

/// Load and validate configuration with automatic fallback strategy
///
/// # Errors
/// Returns `MessesError::Config` if no source yields a valid configuration.
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Church name and postal code must be set; every other variable falls back
/// to its default.
///
/// # Errors
/// Returns `MessesError::Config` if required variables are missing or a
/// value does not parse.
pub fn load_from_env() -> Result<Config> {
    let church = ChurchConfig {
        name: env_var("MESSESINFO_CHURCH_NAME")?,
        postal_code: env_var("MESSESINFO_POSTAL_CODE")?,
        city: env_opt("MESSESINFO_CITY").unwrap_or_default(),
    };

    let defaults = ScraperConfig::default();
    let scraper = ScraperConfig {
        base_url: env_opt("MESSESINFO_BASE_URL").unwrap_or(defaults.base_url),
        api_key: env_opt("MESSESINFO_API_KEY"),
        source: env_parse("MESSESINFO_SOURCE", "source", |raw| {
            SourceKind::from_str(raw).map_err(|e| e.to_string())
        })?
        .unwrap_or(defaults.source),
        request_timeout_secs: env_number("MESSESINFO_REQUEST_TIMEOUT_SECS", "request timeout")?
            .unwrap_or(defaults.request_timeout_secs),
        page_size: defaults.page_size,
    };

    let defaults = CoordinatorConfig::default();
    let coordinator = CoordinatorConfig {
        update_interval_hours: env_number("MESSESINFO_UPDATE_INTERVAL_HOURS", "update interval")?
            .unwrap_or(defaults.update_interval_hours),
        days_ahead: env_number("MESSESINFO_DAYS_AHEAD", "days ahead")?.unwrap_or(defaults.days_ahead),
        retention_days: env_number("MESSESINFO_RETENTION_DAYS", "retention days")?
            .unwrap_or(defaults.retention_days),
    };

    Ok(Config { church, scraper, coordinator })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MessesError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MessesError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MessesError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MessesError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, by file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MessesError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MessesError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(MessesError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 8] = [
        "config.json",
        "config.toml",
        "messesinfo.json",
        "messesinfo.toml",
        "../config.json",
        "../config.toml",
        "../../config.json",
        "../../config.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        MessesError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(
    key: &str,
    what: &str,
    parse: impl FnOnce(&str) -> std::result::Result<T, String>,
) -> Result<Option<T>> {
    env_opt(key)
        .map(|raw| parse(&raw).map_err(|e| MessesError::Config(format!("Invalid {}: {}", what, e))))
        .transpose()
}

fn env_number<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_parse(key, what, |raw| raw.parse::<T>().map_err(|e| e.to_string()))
}
