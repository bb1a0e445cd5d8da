//! # intentbot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! - `config`: configuration loading, layering and validation
//! - `error`: the `BotError` type and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust,ignore
//! use intentbot::core::config::{self, ConfigOverrides};
//! use intentbot::core::error::{BotError, Result};
//! ```
//!
pub mod config;
pub mod error;
