//! Configuration loader
//!
//! Loads account settings from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Searches multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `QBIS_COMPANY`, `QBIS_USERNAME`, `QBIS_PASSWORD`: required
//! - `QBIS_URL`: base URL of the web application
//! - `QBIS_TIMEZONE`: IANA timezone of the employee's calendar
//! - `QBIS_REQUEST_TIMEOUT_SECS`: per-request timeout in seconds
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.{json,toml}` and `./qbis.{json,toml}` (current working directory)
//! 2. `../config.{json,toml}` and `../../config.{json,toml}`
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};

use qbis_domain::{QbisConfig, QbisError, Result};

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `QbisError::Config` if neither source yields a valid configuration.
pub fn load() -> Result<QbisConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `QbisError::Config` if a required variable is missing or a value
/// does not validate.
pub fn load_from_env() -> Result<QbisConfig> {
    let mut config =
        QbisConfig::new(env_var("QBIS_COMPANY")?, env_var("QBIS_USERNAME")?, env_var("QBIS_PASSWORD")?);

    if let Some(url) = optional_env_var("QBIS_URL") {
        config = config.with_base_url(url);
    }
    if let Some(tz) = optional_env_var("QBIS_TIMEZONE") {
        config = config.with_timezone(tz);
    }
    if let Some(secs) = optional_env_var("QBIS_REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = secs
            .parse::<u64>()
            .map_err(|e| QbisError::Config(format!("Invalid request timeout: {e}")))?;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations.
///
/// # Errors
/// Returns `QbisError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or do not validate
pub fn load_from_file(path: Option<PathBuf>) -> Result<QbisConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(QbisError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => find_config_path().ok_or_else(|| {
            QbisError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| QbisError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<QbisConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| QbisError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| QbisError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(QbisError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_path() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("qbis.json"),
        dir.join("qbis.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// # Errors
/// Returns `QbisError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| QbisError::Config(format!("Missing required environment variable: {key}")))
}

fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
