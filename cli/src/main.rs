//! # intentbot Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the intentbot CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration once and routing to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Chat using intents.json in the current directory
//! intentbot
//!
//! # Check a catalog, then chat with the offline backend and more logging
//! intentbot --intents support.toml validate
//! intentbot -v --backend lexical --intents support.toml
//! ```
//!
//! Logs go to stderr so that they never interleave with the conversation on
//! stdout.
//!
use clap::{Parser, Subcommand};
use intentbot::commands;
use intentbot::core::config::{self, Backend, ConfigOverrides};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "intentbot",
    about = "🤖 intentbot: a chatbot that answers by matching intents",
    long_about = "Matches what you type against a catalog of intents using sentence\n\
                  embeddings and replies with one of the intent's canned responses.",
    propagate_version = true,
    version
)]
struct Cli {
    /// Subcommand to run (defaults to 'chat').
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this configuration file instead of the user and project files.
    #[arg(long, global = true, env = "INTENTBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Intent catalog file (.json or .toml).
    #[arg(long, global = true)]
    intents: Option<PathBuf>,

    /// Minimum similarity for a match, between -1 and 1.
    #[arg(long, global = true, allow_negative_numbers = true)]
    threshold: Option<f32>,

    /// Model provider backend.
    #[arg(long, global = true, value_enum)]
    backend: Option<Backend>,

    /// Hugging Face repository id of the sentence-transformer.
    #[arg(long, global = true)]
    model: Option<String>,
}

/// Enum defining all available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat interactively (default)
    Chat(commands::chat::ChatArgs),
    /// Print the intent detected for one input
    Classify(commands::classify::ClassifyArgs),
    /// Check the intent catalog without loading a model
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let overrides = ConfigOverrides {
        config_path: cli.config,
        intents: cli.intents,
        threshold: cli.threshold,
        backend: cli.backend,
        model: cli.model,
    };

    let command_result = config::load_config(&overrides).and_then(|config| {
        match cli.command.unwrap_or(Commands::Chat(Default::default())) {
            Commands::Chat(args) => commands::chat::handle_chat(args, &config),
            Commands::Classify(args) => commands::classify::handle_classify(args, &config),
            Commands::Validate(args) => commands::validate::handle_validate(args, &config),
        }
    });

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
