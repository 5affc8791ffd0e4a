//! Configuration management for Urdu Notebook
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{NotebookError, Result};
use crate::storage::{DEFAULT_STORE_PATH, DEFAULT_TITLE, DEFAULT_TITLE_MAX_CHARS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Urdu Notebook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where chats are stored
    #[serde(default)]
    pub storage: StorageConfig,
    /// Chat titles and acknowledgements
    #[serde(default)]
    pub chat: ChatConfig,
    /// Summary and question handling
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Chat store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON chat document
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Chat behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum title length in characters
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,

    /// Title used before any user message exists
    #[serde(default = "default_title")]
    pub default_title: String,

    /// How many characters of a chat message the acknowledgement repeats
    #[serde(default = "default_reply_echo_chars")]
    pub reply_echo_chars: usize,
}

fn default_title_max_chars() -> usize {
    DEFAULT_TITLE_MAX_CHARS
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_reply_echo_chars() -> usize {
    50
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            title_max_chars: default_title_max_chars(),
            default_title: default_title(),
            reply_echo_chars: default_reply_echo_chars(),
        }
    }
}

/// Text analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sentences kept by the summary
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// Characters of the analysed text recorded in the chat
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_summary_sentences() -> usize {
    2
}

fn default_preview_chars() -> usize {
    200
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            summary_sentences: default_summary_sentences(),
            preview_chars: default_preview_chars(),
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
            tracing::info!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NotebookError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| NotebookError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(max_chars) = std::env::var("URDU_NOTEBOOK_TITLE_MAX_CHARS") {
            if let Ok(v) = max_chars.parse() {
                self.chat.title_max_chars = v;
            } else {
                tracing::warn!("Invalid URDU_NOTEBOOK_TITLE_MAX_CHARS: {}", max_chars);
            }
        }

        if let Ok(sentences) = std::env::var("URDU_NOTEBOOK_SUMMARY_SENTENCES") {
            if let Ok(v) = sentences.parse() {
                self.analysis.summary_sentences = v;
            } else {
                tracing::warn!("Invalid URDU_NOTEBOOK_SUMMARY_SENTENCES: {}", sentences);
            }
        }
    }

    /// `--store`, which clap also fills from `URDU_NOTEBOOK_STORE`
    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(store) = &cli.store {
            tracing::debug!(store = %store.display(), "Store path override");
            self.storage.path = store.clone();
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(NotebookError::Config("storage.path cannot be empty".to_string()).into());
        }

        if self.chat.title_max_chars == 0 {
            return Err(NotebookError::Config(
                "chat.title_max_chars must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.default_title.trim().is_empty() {
            return Err(
                NotebookError::Config("chat.default_title cannot be empty".to_string()).into(),
            );
        }

        if self.analysis.summary_sentences == 0 {
            return Err(NotebookError::Config(
                "analysis.summary_sentences must be greater than 0".to_string(),
            )
            .into());
        }

        if self.analysis.preview_chars == 0 {
            return Err(NotebookError::Config(
                "analysis.preview_chars must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
