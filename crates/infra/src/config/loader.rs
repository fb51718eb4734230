//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `EXACT_REFRESH_TOKEN`: OAuth refresh token seeding the token store (required)
//! - `EXACT_CLIENT_ID`: OAuth client id (required)
//! - `EXACT_CLIENT_SECRET`: OAuth client secret (required)
//! - `EXACT_DIVISION`: Exact Online division (required)
//! - `EXACT_BASE_URL`: Platform base URL (default `https://start.exactonline.nl`)
//! - `EXACT_CUSTOMER_GUID`: Account used when an order has no debtor code
//! - `EXACT_HTTP_TIMEOUT_SECS`: Outbound request timeout (default 30)
//! - `HOST`: Listen address (default `0.0.0.0`)
//! - `PORT`: Listen port (default 3000)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` or `./config.json` (current working directory)
//! 2. `./orderbridge.toml` or `./orderbridge.json` (current working directory)
//! 3. `../config.toml` or `../config.json` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use orderbridge_domain::constants::{
    DEFAULT_EXACT_BASE_URL, DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT,
};
use orderbridge_domain::{BridgeError, Config, ExactConfig, Result, ServerConfig};

/// Load and validate configuration
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to a config file. When no file exists
/// either, the environment error is reported.
///
/// # Errors
/// Returns `BridgeError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or empty
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(env_err) => {
            tracing::debug!(error = %env_err, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path))?,
                None => return Err(env_err),
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `BridgeError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let refresh_token = env_var("EXACT_REFRESH_TOKEN")?;
    let division = env_var("EXACT_DIVISION")?;
    let client_id = env_var("EXACT_CLIENT_ID")?;
    let client_secret = env_var("EXACT_CLIENT_SECRET")?;

    let base_url = env_opt("EXACT_BASE_URL").unwrap_or_else(|| DEFAULT_EXACT_BASE_URL.to_string());
    let fallback_customer_guid = env_opt("EXACT_CUSTOMER_GUID");
    let timeout_secs = env_opt("EXACT_HTTP_TIMEOUT_SECS")
        .map(|s| {
            s.parse::<u64>()
                .map_err(|e| BridgeError::Config(format!("Invalid HTTP timeout: {}", e)))
        })
        .transpose()?
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

    let host = env_opt("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = env_opt("PORT")
        .map(|s| s.parse::<u16>().map_err(|e| BridgeError::Config(format!("Invalid port: {}", e))))
        .transpose()?
        .unwrap_or(DEFAULT_PORT);

    Ok(Config {
        server: ServerConfig { host, port },
        exact: ExactConfig {
            client_id,
            client_secret,
            refresh_token,
            division,
            base_url,
            fallback_customer_guid,
            timeout_secs,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BridgeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BridgeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BridgeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BridgeError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `BridgeError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BridgeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BridgeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.toml", "config.json", "orderbridge.toml", "orderbridge.json"];

    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// Empty values count as missing.
///
/// # Errors
/// Returns `BridgeError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        BridgeError::Config(format!("Missing required environment variable: {}", key))
    })
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
