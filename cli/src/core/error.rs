//! # intentbot Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout intentbot. Domain
//! failures (bad configuration, a malformed intent catalog, an unusable model)
//! are described by the `BotError` enum, while propagation uses `anyhow` so
//! that every layer can attach context such as file paths or pattern text.
//!
//! ## Architecture
//!
//! - `BotError`: custom error enum derived with `thiserror`
//! - `Result<T>`: alias for `anyhow::Result<T>`
//!
//! Startup errors (configuration, catalog, model) are fatal and end up in
//! `main`, which prints them and exits with status 1. Nothing inside the
//! chat loop produces a `BotError`: unknown intents and weak matches fall
//! back to default responses instead.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use intentbot::core::error::{BotError, Result};
//! use anyhow::Context;
//!
//! fn load(path: &std::path::Path) -> Result<String> {
//!     if !path.exists() {
//!         anyhow::bail!(BotError::Catalog(format!("{} not found", path.display())));
//!     }
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read {}", path.display()))
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for intentbot.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Intent catalog error: {0}")]
    Catalog(String),

    #[error("Intent '{name}' is defined more than once in the catalog.")]
    DuplicateIntent { name: String },

    #[error("Intent '{name}' has no responses.")]
    MissingResponses { name: String },

    #[error("Intent '{name}' has no patterns.")]
    MissingPatterns { name: String },

    #[error("Unsupported intent catalog format '{extension}'. Expected .json or .toml.")]
    UnsupportedCatalogFormat { extension: String },

    #[error("Model error: {0}")]
    Model(String),
}

/// Type alias for Result using anyhow::Error so callers can add context freely.
pub type Result<T> = anyhow::Result<T>;
