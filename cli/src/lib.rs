//! # intentbot Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! intentbot is a command-line chatbot. It matches free-text input against a
//! catalog of intents by comparing sentence vectors from a pretrained model,
//! then answers with a random canned response of the best intent.
//!
//! The library exposes everything the `intentbot` binary is built from so
//! that integration tests (and other programs) can drive it directly:
//!
//! - `core`: configuration and error types
//! - `model`: the `ModelProvider` seam and its backends
//! - `engine`: catalog, pattern index, matcher, response selector and `Bot`
//! - `repl`: the interactive chat loop
//! - `commands`: the subcommands of the binary
//!
pub mod commands;
pub mod core;
pub mod engine;
pub mod model;
pub mod repl;
