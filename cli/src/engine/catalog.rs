//! # Intent Catalog
//!
//! File: cli/src/engine/catalog.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The catalog is the bot's knowledge: a list of intents, each with example
//! phrases (patterns) and canned replies (responses). It is loaded once at
//! startup and never changes afterwards.
//!
//! ## File formats
//!
//! The format is chosen by extension.
//!
//! JSON, either a top-level array or an object with an `intents` array:
//!
//! ```json
//! [
//!   { "intent": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hi!", "Hello!"] }
//! ]
//! ```
//!
//! TOML, as an array of tables:
//!
//! ```toml
//! [[intents]]
//! intent = "greeting"
//! patterns = ["hello", "hi there"]
//! responses = ["Hi!", "Hello!"]
//! ```
//!
//! `name` is accepted in place of `intent`.
//!
//! ## Validation
//!
//! - names are non-blank and unique
//! - every intent has at least one response
//! - every intent has at least one pattern, except the one named like the
//!   fallback sentinel, whose responses are used when nothing matches
//! - patterns are non-blank
//!
use crate::core::error::{BotError, Result};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A named category of user utterance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Intent {
    #[serde(rename = "intent", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

impl Intent {
    pub fn new<N, P, R>(name: N, patterns: P, responses: R) -> Self
    where
        N: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Supported on-disk layouts of a catalog file.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Intent>),
    Table { intents: Vec<Intent> },
}

impl CatalogFile {
    fn into_intents(self) -> Vec<Intent> {
        match self {
            CatalogFile::List(intents) | CatalogFile::Table { intents } => intents,
        }
    }
}

/// The validated, immutable set of intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

impl IntentCatalog {
    /// Validates `intents` and builds a catalog. `fallback_intent` is the
    /// only name allowed to have no patterns.
    pub fn from_intents(intents: Vec<Intent>, fallback_intent: &str) -> Result<Self> {
        validate_intents(&intents, fallback_intent)?;
        debug!("Validated {} intents", intents.len());
        Ok(Self { intents })
    }

    /// Loads and validates a catalog file (`.json` or `.toml`).
    pub fn load(path: &Path, fallback_intent: &str) -> Result<Self> {
        if !path.is_file() {
            return Err(anyhow!(BotError::Catalog(format!(
                "Intent file '{}' not found.",
                path.display()
            ))));
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read intent file: {}", path.display()))?;
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let intents = parse_catalog(&content, &extension)
            .with_context(|| format!("Failed to load intent file: {}", path.display()))?;
        let catalog = Self::from_intents(intents, fallback_intent)
            .with_context(|| format!("Invalid intent file: {}", path.display()))?;
        info!(
            "Loaded {} intents ({} patterns) from {}",
            catalog.len(),
            catalog.pattern_count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Looks an intent up by exact name.
    pub fn get(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intent> {
        self.intents.iter()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Total number of patterns across all intents.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|i| i.patterns.len()).sum()
    }
}

impl<'a> IntoIterator for &'a IntentCatalog {
    type Item = &'a Intent;
    type IntoIter = std::slice::Iter<'a, Intent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_intents(intents: &[Intent], fallback_intent: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for (position, intent) in intents.iter().enumerate() {
        if intent.name.trim().is_empty() {
            return Err(anyhow!(BotError::Catalog(format!(
                "Intent #{} has no name.",
                position + 1
            ))));
        }
        if !seen.insert(intent.name.as_str()) {
            return Err(anyhow!(BotError::DuplicateIntent {
                name: intent.name.clone()
            }));
        }
        if intent.responses.is_empty() {
            return Err(anyhow!(BotError::MissingResponses {
                name: intent.name.clone()
            }));
        }
        if intent.patterns.is_empty() && intent.name != fallback_intent {
            return Err(anyhow!(BotError::MissingPatterns {
                name: intent.name.clone()
            }));
        }
        if let Some(blank) = intent.patterns.iter().position(|p| p.trim().is_empty()) {
            return Err(anyhow!(BotError::Catalog(format!(
                "Pattern #{} of intent '{}' is blank.",
                blank + 1,
                intent.name
            ))));
        }
    }
    Ok(())
}

fn parse_catalog(content: &str, extension: &str) -> Result<Vec<Intent>> {
    let file: CatalogFile = match extension {
        "json" => serde_json::from_str(content).map_err(|e| {
            anyhow!(BotError::Catalog(format!("Malformed JSON intent catalog: {}", e)))
        })?,
        "toml" => toml::from_str(content).map_err(|e| {
            anyhow!(BotError::Catalog(format!("Malformed TOML intent catalog: {}", e)))
        })?,
        other => {
            return Err(anyhow!(BotError::UnsupportedCatalogFormat {
                extension: other.to_string()
            }))
        }
    };
    Ok(file.into_intents())
}
