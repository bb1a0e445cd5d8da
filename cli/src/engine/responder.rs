//! # Response Selector
//!
//! File: cli/src/engine/responder.rs
//! Author: Christi Mahu
//!
//! Picks the reply for an intent name: a uniformly random response of the
//! intent, or the configured default message when the catalog has no such
//! intent. Selection never fails.
//!
use super::catalog::IntentCatalog;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ResponseSelector {
    default_response: String,
    fallback_intent: String,
}

impl ResponseSelector {
    pub fn new(default_response: impl Into<String>, fallback_intent: impl Into<String>) -> Self {
        Self {
            default_response: default_response.into(),
            fallback_intent: fallback_intent.into(),
        }
    }

    pub fn default_response(&self) -> &str {
        &self.default_response
    }

    /// Returns a response for `intent_name`, drawing randomness from `rng`.
    pub fn select<'a, R: Rng + ?Sized>(
        &'a self,
        catalog: &'a IntentCatalog,
        intent_name: &str,
        rng: &mut R,
    ) -> &'a str {
        match catalog.get(intent_name) {
            Some(intent) => match intent.responses.choose(rng) {
                Some(response) => response.as_str(),
                // Catalog validation guarantees at least one response.
                None => self.default_response.as_str(),
            },
            None => {
                if intent_name == self.fallback_intent {
                    debug!("No '{}' intent in catalog, using default response", intent_name);
                } else {
                    warn!(
                        "Intent '{}' is not in the catalog, using default response",
                        intent_name
                    );
                }
                self.default_response.as_str()
            }
        }
    }
}
