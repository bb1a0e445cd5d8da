//! # intentbot Classify Command
//!
//! File: cli/src/commands/classify.rs
//! Author: Christi Mahu
//!
//! Implements `intentbot classify <TEXT>...`: runs one input through the
//! matcher and prints the detected intent, its score and the pattern that
//! produced it. With `--respond` a response is sampled as well.
//!
//! ```bash
//! intentbot classify hi there
//! intentbot classify --respond --seed 1 "what is your name"
//! ```
//!
use super::{build_bot, make_rng};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::MatchResult;
use clap::Parser;
use tracing::info;

/// Arguments for the 'classify' subcommand.
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Text to classify. Multiple words are joined with spaces.
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Also print a response for the detected intent.
    #[arg(long)]
    pub respond: bool,

    /// Seed for response selection.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Handler function for the 'classify' subcommand.
pub fn handle_classify(args: ClassifyArgs, config: &Config) -> Result<()> {
    let text = args.text.join(" ");
    info!("Classifying {:?}", text);

    let bot = build_bot(config)?;
    let result = bot.classify(&text)?;

    match &result {
        MatchResult::Matched {
            intent,
            score,
            pattern,
        } => {
            println!("Intent: {}", intent);
            println!("Score: {:.3}", score);
            println!("Pattern: {}", pattern);
        }
        MatchResult::Fallback {
            sentinel,
            best_score,
        } => {
            println!("Intent: {}", sentinel);
            println!(
                "Score: {:.3} (below threshold {:.3})",
                best_score,
                bot.matcher().threshold()
            );
        }
    }

    if args.respond {
        let mut rng = make_rng(args.seed);
        println!("Response: {}", bot.respond(result.intent_name(), &mut rng));
    }
    Ok(())
}
