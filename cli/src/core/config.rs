//! # intentbot Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates the runtime settings of the
//! chatbot: the similarity threshold, which model backend to use, where the
//! intent catalog lives, and the handful of phrases the chat loop prints.
//!
//! ## Architecture
//!
//! Configuration is assembled from layers, lowest precedence first:
//! 1. Default values defined in the code
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Project-specific `.intentbot.toml` in the current directory or an ancestor
//! 4. Command-line overrides (`--intents`, `--threshold`, `--backend`, `--model`)
//!
//! Passing `--config <FILE>` replaces layers 2 and 3 with exactly that file.
//!
//! Files are parsed into `PartialConfig`, whose fields are all optional, so a
//! file only needs to mention the settings it changes. A relative catalog
//! path in a file is relative to that file; `--intents` is relative to the
//! working directory. Each layer is applied
//! on top of the previous one, then paths are expanded and the result is
//! validated.
//!
//! ## Examples
//!
//! ```toml
//! [matcher]
//! threshold = 0.8
//!
//! [model]
//! backend = "lexical"
//!
//! [intents]
//! path = "~/bots/support.toml"
//! ```
//!
use crate::core::error::{BotError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the project-level configuration file searched for in the working directory.
pub const PROJECT_CONFIG_FILENAME: &str = ".intentbot.toml";

/// Fully resolved configuration used by the commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub bot: BotConfig,
    pub matcher: MatcherConfig,
    pub model: ModelConfig,
    pub intents: IntentsConfig,
}

/// Conversation settings: what the bot prints and which words end the chat.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    /// Display name printed before every reply.
    pub name: String,
    /// Line printed once when the chat starts.
    pub greeting: String,
    /// Line printed when the chat ends.
    pub farewell: String,
    /// Inputs (compared case-insensitively) that end the chat.
    pub exit_keywords: Vec<String>,
    /// Intent name reported when nothing clears the threshold.
    pub fallback_intent: String,
    /// Reply used when the intent name is not in the catalog.
    pub default_response: String,
}

/// Settings for the intent matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Minimum cosine similarity accepted as a match.
    pub threshold: f32,
}

/// Which model provider produces sentence vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub backend: Backend,
    /// Hugging Face repository id of the sentence-transformer.
    pub name: String,
    /// Repository revision (branch, tag or commit).
    pub revision: String,
    /// Vector length of the lexical backend.
    pub lexical_dimensions: usize,
}

/// Location of the intent catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentsConfig {
    pub path: PathBuf,
}

/// Model provider implementations selectable from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Pretrained BERT sentence-transformer (downloaded from the Hugging Face Hub).
    #[default]
    Bert,
    /// Offline hashed bag-of-words vectors.
    Lexical,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Bert => write!(f, "bert"),
            Backend::Lexical => write!(f, "lexical"),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Bot".to_string(),
            greeting: "🤖  Chatbot is ready!  (type 'quit' to exit)".to_string(),
            farewell: "Bye! 👋".to_string(),
            exit_keywords: vec!["quit".to_string(), "exit".to_string()],
            fallback_intent: "fallback".to_string(),
            default_response: "I'm not sure how to respond to that.".to_string(),
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { threshold: 0.75 }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Bert,
            name: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            revision: "main".to_string(),
            lexical_dimensions: 1024,
        }
    }
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("intents.json"),
        }
    }
}

// --- File layer ---

/// Shape of a configuration file. Every field is optional so that a layer
/// only overrides what it mentions.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default)]
    pub bot: PartialBotConfig,
    #[serde(default)]
    pub matcher: PartialMatcherConfig,
    #[serde(default)]
    pub model: PartialModelConfig,
    #[serde(default)]
    pub intents: PartialIntentsConfig,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialBotConfig {
    pub name: Option<String>,
    pub greeting: Option<String>,
    pub farewell: Option<String>,
    pub exit_keywords: Option<Vec<String>>,
    pub fallback_intent: Option<String>,
    pub default_response: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialMatcherConfig {
    pub threshold: Option<f32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialModelConfig {
    pub backend: Option<Backend>,
    pub name: Option<String>,
    pub revision: Option<String>,
    pub lexical_dimensions: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialIntentsConfig {
    pub path: Option<PathBuf>,
}

impl PartialConfig {
    /// Applies every value present in this layer onto `config`.
    pub fn apply_to(self, config: &mut Config) {
        let bot = self.bot;
        if let Some(v) = bot.name {
            config.bot.name = v;
        }
        if let Some(v) = bot.greeting {
            config.bot.greeting = v;
        }
        if let Some(v) = bot.farewell {
            config.bot.farewell = v;
        }
        if let Some(v) = bot.exit_keywords {
            config.bot.exit_keywords = v;
        }
        if let Some(v) = bot.fallback_intent {
            config.bot.fallback_intent = v;
        }
        if let Some(v) = bot.default_response {
            config.bot.default_response = v;
        }
        if let Some(v) = self.matcher.threshold {
            config.matcher.threshold = v;
        }
        let model = self.model;
        if let Some(v) = model.backend {
            config.model.backend = v;
        }
        if let Some(v) = model.name {
            config.model.name = v;
        }
        if let Some(v) = model.revision {
            config.model.revision = v;
        }
        if let Some(v) = model.lexical_dimensions {
            config.model.lexical_dimensions = v;
        }
        if let Some(v) = self.intents.path {
            config.intents.path = v;
        }
    }
}

impl PartialConfig {
    /// Resolves a relative `[intents] path` against `base_dir`, the directory
    /// of the file that set it. `~` is expanded first.
    fn resolve_relative_paths(&mut self, base_dir: &Path) {
        if let Some(path) = self.intents.path.take() {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            self.intents.path = Some(if expanded.is_relative() {
                base_dir.join(expanded)
            } else {
                expanded
            });
        }
    }
}

/// Values given on the command line. They take precedence over every file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Use exactly this file instead of the user and project files.
    pub config_path: Option<PathBuf>,
    pub intents: Option<PathBuf>,
    pub threshold: Option<f32>,
    pub backend: Option<Backend>,
    pub model: Option<String>,
}

impl ConfigOverrides {
    fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.intents {
            config.intents.path = path.clone();
        }
        if let Some(threshold) = self.threshold {
            config.matcher.threshold = threshold;
        }
        if let Some(backend) = self.backend {
            config.model.backend = backend;
        }
        if let Some(model) = &self.model {
            config.model.name = model.clone();
        }
    }
}

// --- Loading ---

/// Loads the effective configuration from all layers and validates it.
pub fn load_config(overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = Config::default();

    if let Some(path) = &overrides.config_path {
        if !path.is_file() {
            return Err(anyhow!(BotError::Config(format!(
                "Configuration file '{}' does not exist.",
                path.display()
            ))));
        }
        info!("Loading configuration from: {}", path.display());
        load_config_from_path(path)?.apply_to(&mut config);
    } else {
        if let Some(user) = load_user_config()? {
            user.apply_to(&mut config);
        }
        if let Some(project) = load_project_config()? {
            project.apply_to(&mut config);
        }
    }

    overrides.apply_to(&mut config);
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<PartialConfig>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "IntentBot", "intentbot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<PartialConfig>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(path) = find_project_config_path(&current_dir) {
        info!("Loading project configuration from: {}", path.display());
        load_config_from_path(&path).map(Some)
    } else {
        debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for the project
/// config file. The search stops at the first directory containing `.git`.
pub fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads and parses a single configuration file.
///
/// Relative paths inside the file are taken relative to the file itself, so a
/// project config found in an ancestor directory still points at its catalog.
pub fn load_config_from_path(path: &Path) -> Result<PartialConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let mut partial: PartialConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    if let Some(base_dir) = path.parent() {
        partial.resolve_relative_paths(base_dir);
    }
    Ok(partial)
}

fn expand_config_paths(config: &mut Config) {
    let raw = config.intents.path.to_string_lossy();
    let expanded = shellexpand::tilde(&raw).into_owned();
    debug!("Expanded intents path: {}", expanded);
    config.intents.path = PathBuf::from(expanded);
}

/// Checks invariants that the rest of the program relies on.
pub fn validate_config(config: &Config) -> Result<()> {
    let threshold = config.matcher.threshold;
    if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
        return Err(anyhow!(BotError::Config(format!(
            "Similarity threshold must be a number between -1 and 1, got {}.",
            threshold
        ))));
    }
    if config.bot.exit_keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(anyhow!(BotError::Config(
            "At least one non-empty exit keyword is required.".to_string()
        )));
    }
    if config.bot.fallback_intent.trim().is_empty() {
        return Err(anyhow!(BotError::Config(
            "The fallback intent name cannot be empty.".to_string()
        )));
    }
    if config.bot.default_response.trim().is_empty() {
        return Err(anyhow!(BotError::Config(
            "The default response cannot be empty.".to_string()
        )));
    }
    if config.model.name.trim().is_empty() {
        return Err(anyhow!(BotError::Config(
            "The model name cannot be empty.".to_string()
        )));
    }
    if config.model.lexical_dimensions == 0 {
        return Err(anyhow!(BotError::Config(
            "lexical_dimensions must be greater than zero.".to_string()
        )));
    }
    Ok(())
}
