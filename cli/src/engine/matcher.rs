//! # Intent Matcher
//!
//! File: cli/src/engine/matcher.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Decides which intent a piece of text belongs to. The input is vectorized
//! once and compared against every entry of the pattern index. The best
//! entry wins if its similarity reaches the threshold; otherwise the result
//! is the fallback sentinel.
//!
//! ## Decision rule
//!
//! - the running maximum starts at `0.0` and only moves on a strictly greater
//!   similarity, so the first entry reaching a maximum keeps it and entries
//!   with non-positive similarity can never match
//! - a best similarity `>= threshold` is a match
//! - an empty index always yields the fallback
//!
use super::index::{PatternEntry, PatternIndex};
use crate::core::error::Result;
use crate::model::{Embedding, ModelProvider};
use tracing::debug;

/// Outcome of matching one input.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// An intent cleared the threshold.
    Matched {
        intent: String,
        score: f32,
        /// Catalog pattern that produced the score.
        pattern: String,
    },
    /// Nothing cleared the threshold.
    Fallback {
        sentinel: String,
        /// Best similarity seen, `0.0` when no entry scored above zero.
        best_score: f32,
    },
}

impl MatchResult {
    /// The matched intent name, or the fallback sentinel.
    pub fn intent_name(&self) -> &str {
        match self {
            MatchResult::Matched { intent, .. } => intent,
            MatchResult::Fallback { sentinel, .. } => sentinel,
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            MatchResult::Matched { score, .. } => *score,
            MatchResult::Fallback { best_score, .. } => *best_score,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MatchResult::Fallback { .. })
    }
}

/// Linear best-match search over a `PatternIndex`.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    index: PatternIndex,
    threshold: f32,
    fallback_intent: String,
}

impl IntentMatcher {
    pub fn new(index: PatternIndex, threshold: f32, fallback_intent: impl Into<String>) -> Self {
        Self {
            index,
            threshold,
            fallback_intent: fallback_intent.into(),
        }
    }

    pub fn index(&self) -> &PatternIndex {
        &self.index
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn fallback_intent(&self) -> &str {
        &self.fallback_intent
    }

    /// Vectorizes `text` with `provider` and matches it.
    pub fn match_text<P: ModelProvider + ?Sized>(&self, provider: &P, text: &str) -> Result<MatchResult> {
        let query = provider.vectorize(text)?;
        Ok(self.match_embedding(provider, &query))
    }

    /// Matches an already computed vector.
    pub fn match_embedding<P: ModelProvider + ?Sized>(&self, provider: &P, query: &Embedding) -> MatchResult {
        match self.best_entry(provider, query) {
            Some((entry, score)) if score >= self.threshold => {
                debug!(
                    "Matched intent '{}' via pattern '{}' (score {:.3})",
                    entry.intent, entry.pattern, score
                );
                MatchResult::Matched {
                    intent: entry.intent.clone(),
                    score,
                    pattern: entry.pattern.clone(),
                }
            }
            best => {
                let best_score = best.map_or(0.0, |(_, score)| score);
                debug!(
                    "No intent reached threshold {:.3} (best {:.3}), using '{}'",
                    self.threshold, best_score, self.fallback_intent
                );
                self.fallback(best_score)
            }
        }
    }

    /// Fallback result with the given best score.
    pub fn fallback(&self, best_score: f32) -> MatchResult {
        MatchResult::Fallback {
            sentinel: self.fallback_intent.clone(),
            best_score,
        }
    }

    fn best_entry<P: ModelProvider + ?Sized>(
        &self,
        provider: &P,
        query: &Embedding,
    ) -> Option<(&PatternEntry, f32)> {
        let mut best: Option<(&PatternEntry, f32)> = None;
        let mut best_score = 0.0f32;
        for entry in self.index.entries() {
            let score = provider.similarity(query, &entry.embedding);
            if score > best_score {
                best_score = score;
                best = Some((entry, score));
            }
        }
        best
    }
}
