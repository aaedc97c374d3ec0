//! Main application configuration
//!
//! This module defines the primary configuration structures for the podium
//! ranking service, including environment variable loading and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub engine: EngineSettings,
    pub store: StoreSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host the HTTP API binds to
    pub http_host: String,
    /// Port the HTTP API binds to
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Ranking-engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Maximum rating points exchanged per vote
    pub k_factor: f64,
    /// Rating assigned to newly created companies
    pub initial_rating: f64,
    /// Retry budget for the optimistic vote commit
    pub max_update_retries: u32,
    /// Leaderboard page size when the caller supplies none or an invalid one
    pub default_page_size: u32,
    /// Upper bound on requested leaderboard page sizes
    pub max_page_size: u32,
    /// Maximum comment length in characters
    pub max_comment_length: usize,
    /// Maximum comments returned per company listing
    pub comment_list_limit: usize,
}

/// Storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Optional JSON file with the initial company catalog
    pub seed_path: Option<PathBuf>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "podium".to_string(),
            log_level: "info".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1500.0,
            max_update_retries: 8,
            default_page_size: 25,
            max_page_size: 100,
            max_comment_length: 2000,
            comment_list_limit: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(host) = env::var("HTTP_HOST") {
            config.service.http_host = host;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            config.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            config.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Engine settings
        if let Ok(k_factor) = env::var("ELO_K_FACTOR") {
            config.engine.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K_FACTOR value: {}", k_factor))?;
        }
        if let Ok(initial) = env::var("ELO_INITIAL_RATING") {
            config.engine.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(retries) = env::var("MAX_UPDATE_RETRIES") {
            config.engine.max_update_retries = retries
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_UPDATE_RETRIES value: {}", retries))?;
        }
        if let Ok(page_size) = env::var("DEFAULT_PAGE_SIZE") {
            config.engine.default_page_size = page_size
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_PAGE_SIZE value: {}", page_size))?;
        }
        if let Ok(max_page) = env::var("MAX_PAGE_SIZE") {
            config.engine.max_page_size = max_page
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_PAGE_SIZE value: {}", max_page))?;
        }
        if let Ok(max_len) = env::var("MAX_COMMENT_LENGTH") {
            config.engine.max_comment_length = max_len
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_COMMENT_LENGTH value: {}", max_len))?;
        }
        if let Ok(limit) = env::var("COMMENT_LIST_LIMIT") {
            config.engine.comment_list_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid COMMENT_LIST_LIMIT value: {}", limit))?;
        }

        // Store settings
        if let Ok(seed_path) = env::var("SEED_PATH") {
            config.store.seed_path = Some(PathBuf::from(seed_path));
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate ports and timeouts
    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    // Validate engine settings
    if !config.engine.k_factor.is_finite() || config.engine.k_factor <= 0.0 {
        return Err(anyhow!("K-factor must be positive"));
    }
    if !config.engine.initial_rating.is_finite() || config.engine.initial_rating <= 0.0 {
        return Err(anyhow!("Initial rating must be positive"));
    }
    if config.engine.max_update_retries == 0 {
        return Err(anyhow!("Vote retry budget must be greater than 0"));
    }
    if config.engine.max_page_size == 0 {
        return Err(anyhow!("Max page size must be greater than 0"));
    }
    if config.engine.default_page_size == 0
        || config.engine.default_page_size > config.engine.max_page_size
    {
        return Err(anyhow!(
            "Default page size must be between 1 and {}",
            config.engine.max_page_size
        ));
    }
    if config.engine.max_comment_length == 0 {
        return Err(anyhow!("Max comment length must be greater than 0"));
    }
    if config.engine.comment_list_limit == 0 {
        return Err(anyhow!("Comment list limit must be greater than 0"));
    }

    Ok(())
}
