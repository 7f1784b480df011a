//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from `./config` and the environment
pub fn load_config() -> Result<AppConfig> {
    load_config_from(Path::new("config"))
}

/// Load configuration with override files looked up in `dir`
pub fn load_config_from(dir: &Path) -> Result<AppConfig> {
    let env_name = std::env::var("CODY_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::from(dir.join("default")).required(false))
        .add_source(File::from(dir.join(env_name)).required(false))
        .add_source(File::from(dir.join("local")).required(false))
        // 3. Environment variables (highest priority); CODY_CACHE__PORT, not CODY__CACHE__PORT
        .add_source(
            Environment::with_prefix("CODY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
