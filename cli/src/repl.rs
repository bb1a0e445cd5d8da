//! # intentbot Interaction Loop
//!
//! File: cli/src/repl.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A blocking read-decide-respond loop over any `BufRead`/`Write` pair. The
//! `chat` command runs it on stdin/stdout; tests run it on in-memory buffers.
//!
//! ## States
//!
//! The loop is RUNNING until it reads an exit keyword (compared
//! case-insensitively after trimming) or reaches the end of input, then it
//! prints the farewell and is TERMINATED. Lines that are not valid UTF-8 are
//! decoded lossily and answered like any other input. Exit keywords never reach the
//! matcher or the response selector.
//!
//! ## Transcript
//!
//! ```text
//! 🤖  Chatbot is ready!  (type 'quit' to exit)
//! You: hello
//! Bot: Hi!
//! You: quit
//! Bot: Bye! 👋
//! ```
//!
use crate::core::config::BotConfig;
use crate::core::error::Result;
use crate::engine::Bot;
use crate::model::ModelProvider;
use anyhow::Context;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    ExitKeyword,
    EndOfInput,
}

/// Summary returned when the loop terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub termination: Termination,
    /// Number of inputs the bot answered.
    pub turns: usize,
}

enum LoopState {
    Running,
    Terminated(Termination),
}

/// Prompts, farewell and exit keywords for one chat session.
pub struct ChatSession<'a, P: ModelProvider> {
    bot: &'a Bot<P>,
    bot_name: String,
    greeting: String,
    farewell: String,
    exit_keywords: Vec<String>,
}

impl<'a, P: ModelProvider> ChatSession<'a, P> {
    pub fn new(bot: &'a Bot<P>, config: &BotConfig) -> Self {
        Self {
            bot,
            bot_name: config.name.clone(),
            greeting: config.greeting.clone(),
            farewell: config.farewell.clone(),
            exit_keywords: config
                .exit_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// True when `input` (already trimmed) is one of the exit keywords.
    pub fn is_exit_keyword(&self, input: &str) -> bool {
        let input = input.to_lowercase();
        self.exit_keywords.iter().any(|k| *k == input)
    }

    /// Runs the loop until an exit keyword or the end of `input`.
    pub fn run<R, W, G>(&self, mut input: R, mut output: W, rng: &mut G) -> Result<SessionSummary>
    where
        R: BufRead,
        W: Write,
        G: Rng + ?Sized,
    {
        writeln!(output, "{}", self.greeting).context("Failed to write to output")?;

        let mut turns = 0;
        let mut state = LoopState::Running;
        let mut buf = Vec::new();

        while let LoopState::Running = state {
            write!(output, "You: ").context("Failed to write prompt")?;
            output.flush().context("Failed to flush output")?;

            buf.clear();
            let read = input.read_until(b'\n', &mut buf).context("Failed to read input")?;
            if read == 0 {
                // Keep the farewell off the prompt line.
                writeln!(output).context("Failed to write to output")?;
                state = LoopState::Terminated(Termination::EndOfInput);
                continue;
            }

            // Invalid UTF-8 is replaced, not rejected.
            let line = String::from_utf8_lossy(&buf);
            let text = line.trim();
            if self.is_exit_keyword(text) {
                state = LoopState::Terminated(Termination::ExitKeyword);
                continue;
            }

            let result = self.bot.classify(text)?;
            debug!(
                "Input {:?} classified as '{}' (score {:.3})",
                text,
                result.intent_name(),
                result.score()
            );
            let reply = self.bot.respond(result.intent_name(), rng);
            writeln!(output, "{}: {}", self.bot_name, reply).context("Failed to write reply")?;
            turns += 1;
        }

        writeln!(output, "{}: {}", self.bot_name, self.farewell).context("Failed to write to output")?;
        output.flush().context("Failed to flush output")?;

        let termination = match state {
            LoopState::Terminated(reason) => reason,
            LoopState::Running => Termination::EndOfInput,
        };
        info!("Chat ended ({:?}) after {} turns", termination, turns);
        Ok(SessionSummary { termination, turns })
    }
}
