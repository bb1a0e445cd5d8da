//! # intentbot Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the `intentbot` binary and the
//! startup sequence they share.
//!
//! ## Commands
//!
//! - `chat`: interactive chat loop (the default when no subcommand is given)
//! - `classify`: one-shot intent detection for a single input
//! - `validate`: checks the intent catalog without loading a model
//!
//! Each command defines its own arguments struct and handler. Handlers receive
//! the already loaded `Config`; `main.rs` builds it from files and global flags.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::{Bot, EngineSettings, IntentCatalog};
use crate::model;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Interactive chat loop on stdin/stdout.
pub mod chat;
/// Prints the intent detected for one input.
pub mod classify;
/// Loads and checks the intent catalog.
pub mod validate;

/// Loads the intent catalog named in `config`.
pub fn load_catalog(config: &Config) -> Result<IntentCatalog> {
    IntentCatalog::load(&config.intents.path, &config.bot.fallback_intent)
        .context("Failed to load intent catalog")
}

/// Startup sequence shared by `chat` and `classify`: catalog, model, index.
pub fn build_bot(config: &Config) -> Result<Bot> {
    let catalog = load_catalog(config)?;
    let provider = model::load_provider(&config.model).context("Failed to load model provider")?;
    let bot = Bot::new(provider, catalog, &EngineSettings::from_config(config))?;
    info!(
        "Bot ready: {} intents, {} indexed patterns, threshold {}",
        bot.catalog().len(),
        bot.matcher().index().len(),
        bot.matcher().threshold()
    );
    Ok(bot)
}

/// Seeded generator when `seed` is given, otherwise seeded from the OS.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
