//! # intentbot Chat Command
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `intentbot chat`, the default command. It loads the catalog and
//! the model once, then runs the interaction loop on stdin/stdout until the
//! user types an exit keyword or the input ends.
//!
//! ## Usage
//!
//! ```bash
//! # Start chatting with the configured model and intents
//! intentbot
//!
//! # Offline backend, reproducible replies
//! intentbot --backend lexical chat --seed 7
//! ```
//!
use super::{build_bot, make_rng};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::repl::ChatSession;
use clap::Parser;
use std::io;
use tracing::info;

/// Arguments for the 'chat' subcommand.
#[derive(Parser, Debug, Default)]
pub struct ChatArgs {
    /// Seed for response selection, for reproducible conversations.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Handler function for the 'chat' subcommand.
pub fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);

    let bot = build_bot(config)?;
    let session = ChatSession::new(&bot, &config.bot);
    let mut rng = make_rng(args.seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock(), &mut rng)?;
    Ok(())
}
