//! Configuration management for the podium service
//!
//! This module handles all configuration loading from environment variables,
//! optional TOML files, validation, and default values for the ranking engine.

pub mod app;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, EngineSettings, ServiceSettings, StoreSettings};
