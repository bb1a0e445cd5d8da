//! # intentbot Validate Command
//!
//! File: cli/src/commands/validate.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `intentbot validate`, which loads the intent catalog with the
//! same rules the chat uses and prints a summary. No model is loaded, so the
//! command is fast and works offline.
//!
//! ## Usage
//!
//! ```bash
//! intentbot validate
//! intentbot --intents support.toml validate
//! ```
//!
//! Invalid catalogs make the command fail with the validation error.
//!
use super::load_catalog;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for the 'validate' subcommand.
#[derive(Parser, Debug, Default)]
pub struct ValidateArgs {}

/// Handler function for the 'validate' subcommand.
pub fn handle_validate(_args: ValidateArgs, config: &Config) -> Result<()> {
    info!("Validating intent catalog {}", config.intents.path.display());
    println!("Checking intent catalog: {}", config.intents.path.display());

    let catalog = load_catalog(config)?;
    for intent in &catalog {
        println!(
            "  - {}: {} patterns, {} responses",
            intent.name,
            intent.patterns.len(),
            intent.responses.len()
        );
    }

    let fallback = &config.bot.fallback_intent;
    if catalog.get(fallback).is_none() {
        println!(
            "ℹ️  No '{}' intent: unmatched input gets \"{}\"",
            fallback, config.bot.default_response
        );
    }
    println!(
        "✅ Catalog is valid: {} intents, {} patterns.",
        catalog.len(),
        catalog.pattern_count()
    );
    Ok(())
}
