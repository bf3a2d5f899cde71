//! Configuration management for Casebench
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{CasebenchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Casebench
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Simulated progress timer settings
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Chat panel behavior
    #[serde(default)]
    pub chat: ChatConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
    /// Mock authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Progress emitter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Amount added to the progress value on every tick (1-100)
    #[serde(default = "default_progress_step")]
    pub step: u8,

    /// Delay between ticks (milliseconds)
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn default_progress_step() -> u8 {
    5
}

fn default_tick_interval() -> u64 {
    100
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step: default_progress_step(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

/// Chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulated assistant "thinking" delay before replying (milliseconds)
    #[serde(default = "default_reply_delay")]
    pub reply_delay_ms: u64,

    /// How much of the user's request is quoted in a version's change note
    #[serde(default = "default_change_summary_chars")]
    pub change_summary_chars: usize,
}

fn default_reply_delay() -> u64 {
    1500
}

fn default_change_summary_chars() -> usize {
    40
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay(),
            change_summary_chars: default_change_summary_chars(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Prefix of generated export file names
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_file_prefix() -> String {
    "test-cases".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
        }
    }
}

/// Mock authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Simulated login latency (milliseconds)
    #[serde(default = "default_auth_latency")]
    pub latency_ms: u64,

    /// Shortest password the mock authenticator accepts
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

fn default_auth_latency() -> u64 {
    500
}

fn default_min_password_len() -> usize {
    6
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_auth_latency(),
            min_password_len: default_min_password_len(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CasebenchError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CasebenchError::Yaml(e).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(step) = std::env::var("CASEBENCH_PROGRESS_STEP") {
            if let Ok(value) = step.parse() {
                self.progress.step = value;
            } else {
                tracing::warn!("Invalid CASEBENCH_PROGRESS_STEP: {}", step);
            }
        }

        if let Ok(tick) = std::env::var("CASEBENCH_PROGRESS_TICK_MS") {
            if let Ok(value) = tick.parse() {
                self.progress.tick_interval_ms = value;
            } else {
                tracing::warn!("Invalid CASEBENCH_PROGRESS_TICK_MS: {}", tick);
            }
        }

        if let Ok(delay) = std::env::var("CASEBENCH_CHAT_REPLY_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.chat.reply_delay_ms = value;
            } else {
                tracing::warn!("Invalid CASEBENCH_CHAT_REPLY_DELAY_MS: {}", delay);
            }
        }

        if let Ok(prefix) = std::env::var("CASEBENCH_EXPORT_PREFIX") {
            self.export.file_prefix = prefix;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
        if cli.instant {
            tracing::debug!("Instant mode: simulated delays disabled");
            self.progress.step = 100;
            self.progress.tick_interval_ms = 1;
            self.chat.reply_delay_ms = 0;
            self.auth.latency_ms = 0;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.progress.step == 0 || self.progress.step > 100 {
            return Err(
                CasebenchError::Config("progress.step must be between 1 and 100".to_string())
                    .into(),
            );
        }

        if self.progress.tick_interval_ms == 0 {
            return Err(CasebenchError::Config(
                "progress.tick_interval_ms must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.change_summary_chars == 0 {
            return Err(CasebenchError::Config(
                "chat.change_summary_chars must be greater than 0".to_string(),
            )
            .into());
        }

        if self.export.file_prefix.trim().is_empty() {
            return Err(
                CasebenchError::Config("export.file_prefix cannot be empty".to_string()).into(),
            );
        }

        if self.auth.min_password_len == 0 {
            return Err(CasebenchError::Config(
                "auth.min_password_len must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
