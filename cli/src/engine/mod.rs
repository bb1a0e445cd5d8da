//! # intentbot Engine
//!
//! File: cli/src/engine/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The engine turns a line of user text into a reply. It is assembled once at
//! startup into a `Bot`, which owns everything a chat turn needs and is then
//! only read:
//!
//! - `catalog`: the intents loaded from the intent file
//! - `index`: one precomputed vector per catalog pattern
//! - `matcher`: best-match search with a similarity threshold
//! - `responder`: random response selection with a default message
//!
//! ## Usage
//!
//! ```rust,ignore
//! let bot = Bot::new(provider, catalog, &EngineSettings::from_config(&config))?;
//! let reply = bot.reply("hello", &mut rand::thread_rng())?;
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::model::ModelProvider;
use rand::Rng;

pub mod catalog;
pub mod index;
pub mod matcher;
pub mod responder;

pub use catalog::{Intent, IntentCatalog};
pub use index::{PatternEntry, PatternIndex};
pub use matcher::{IntentMatcher, MatchResult};
pub use responder::ResponseSelector;

/// Engine parameters taken from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub threshold: f32,
    pub fallback_intent: String,
    pub default_response: String,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            threshold: config.matcher.threshold,
            fallback_intent: config.bot.fallback_intent.clone(),
            default_response: config.bot.default_response.clone(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Application context: provider, catalog, matcher and selector, built once.
pub struct Bot<P: ModelProvider = Box<dyn ModelProvider>> {
    provider: P,
    catalog: IntentCatalog,
    matcher: IntentMatcher,
    selector: ResponseSelector,
}

impl<P: ModelProvider> Bot<P> {
    /// Builds the pattern index with `provider` and assembles the bot.
    pub fn new(provider: P, catalog: IntentCatalog, settings: &EngineSettings) -> Result<Self> {
        let index = PatternIndex::build(&catalog, &provider)?;
        let matcher = IntentMatcher::new(index, settings.threshold, settings.fallback_intent.as_str());
        let selector = ResponseSelector::new(
            settings.default_response.as_str(),
            settings.fallback_intent.as_str(),
        );
        Ok(Self {
            provider,
            catalog,
            matcher,
            selector,
        })
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    pub fn matcher(&self) -> &IntentMatcher {
        &self.matcher
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Matches `text` against the catalog.
    ///
    /// Input is trimmed first. Blank input is not vectorized and always
    /// yields the fallback.
    pub fn classify(&self, text: &str) -> Result<MatchResult> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(self.matcher.fallback(0.0));
        }
        self.matcher.match_text(&self.provider, text)
    }

    /// Picks a response for an intent name (or the default message).
    pub fn respond<R: Rng + ?Sized>(&self, intent_name: &str, rng: &mut R) -> &str {
        self.selector.select(&self.catalog, intent_name, rng)
    }

    /// Classifies `text` and picks a response for the result.
    pub fn reply<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Result<&str> {
        let result = self.classify(text)?;
        Ok(self.respond(result.intent_name(), rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Embedding, LexicalProvider};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Lexical provider that counts how often it is asked for a vector.
    struct CountingProvider {
        inner: LexicalProvider,
        calls: Cell<usize>,
    }

    impl ModelProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn vectorize(&self, text: &str) -> Result<Embedding> {
            self.calls.set(self.calls.get() + 1);
            self.inner.vectorize(text)
        }
    }

    fn greeting_catalog() -> IntentCatalog {
        IntentCatalog::from_intents(
            vec![Intent::new("greeting", ["hello", "hi there"], ["Hi!", "Hello!"])],
            "fallback",
        )
        .unwrap()
    }

    #[test]
    fn test_settings_follow_config() {
        let settings = EngineSettings::default();
        assert_eq!(settings.threshold, 0.75);
        assert_eq!(settings.fallback_intent, "fallback");
        assert_eq!(settings.default_response, "I'm not sure how to respond to that.");
    }

    #[test]
    fn test_index_built_once_per_pattern() {
        let provider = CountingProvider {
            inner: LexicalProvider::new(1024),
            calls: Cell::new(0),
        };
        let bot = Bot::new(provider, greeting_catalog(), &EngineSettings::default()).unwrap();
        assert_eq!(bot.provider().calls.get(), 2);
        assert_eq!(bot.matcher().index().len(), 2);

        bot.classify("hello").unwrap();
        assert_eq!(bot.provider().calls.get(), 3);
    }

    #[test]
    fn test_blank_input_skips_vectorization() {
        let provider = CountingProvider {
            inner: LexicalProvider::new(1024),
            calls: Cell::new(0),
        };
        let bot = Bot::new(provider, greeting_catalog(), &EngineSettings::default()).unwrap();
        let result = bot.classify("   ").unwrap();
        assert!(result.is_fallback());
        assert_eq!(bot.provider().calls.get(), 2);
    }

    #[test]
    fn test_reply_end_to_end() {
        let bot = Bot::new(
            LexicalProvider::new(1024),
            greeting_catalog(),
            &EngineSettings::default(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let reply = bot.reply("  Hello ", &mut rng).unwrap();
        assert!(["Hi!", "Hello!"].contains(&reply));

        let reply = bot
            .reply("asdkjasd completely unrelated gibberish", &mut rng)
            .unwrap();
        assert_eq!(reply, "I'm not sure how to respond to that.");
    }
}
