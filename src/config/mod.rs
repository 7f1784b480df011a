//! Application configuration types

mod loader;


pub use loader::{load_config, load_config_from, DEFAULT_CONFIG};

use cody_core::{
    detect_language, CacheConfig, ChatSettings, ClassifierConfig, CommandType, Language,
    PrimaryBackendConfig,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub language: String,
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub primary: PrimaryBackendConfig,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

impl AppConfig {
    /// Configured language, falling back to the locale environment
    pub fn language(&self) -> Language {
        Language::from_code(&self.language).unwrap_or_else(detect_language)
    }

    /// Classifier switches
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            strict_unrecognized: self.classifier.strict_unrecognized,
            lenient_commands: self.classifier.lenient_commands.iter().copied().collect(),
            ..ClassifierConfig::default()
        }
    }
}

/// Toolchain settings
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainConfig {
    pub project_path: PathBuf,
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

impl ToolchainConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

fn default_command_timeout() -> u64 {
    1800
}

/// Classifier settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub strict_unrecognized: bool,
    pub lenient_commands: Vec<CommandType>,
}
