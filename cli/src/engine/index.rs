//! # Pattern Index
//!
//! File: cli/src/engine/index.rs
//! Author: Christi Mahu
//!
//! Vectors for every catalog pattern, computed once at startup so that a
//! chat turn only has to vectorize the user's input. Entries keep catalog
//! order, which the matcher relies on to break ties.
//!
use super::catalog::IntentCatalog;
use crate::core::error::Result;
use crate::model::{Embedding, ModelProvider};
use anyhow::Context;
use tracing::{debug, info};

/// One precomputed pattern vector and the intent it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternEntry {
    pub embedding: Embedding,
    pub intent: String,
    pub pattern: String,
}

/// Ordered list of pattern vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternIndex {
    entries: Vec<PatternEntry>,
}

impl PatternIndex {
    /// Vectorizes every pattern of `catalog`, one provider call per pattern.
    /// The first provider failure aborts the build.
    pub fn build<P: ModelProvider + ?Sized>(catalog: &IntentCatalog, provider: &P) -> Result<Self> {
        let mut entries = Vec::with_capacity(catalog.pattern_count());
        for intent in catalog {
            for pattern in &intent.patterns {
                let embedding = provider.vectorize(pattern).with_context(|| {
                    format!(
                        "Failed to vectorize pattern '{}' of intent '{}'",
                        pattern, intent.name
                    )
                })?;
                entries.push(PatternEntry {
                    embedding,
                    intent: intent.name.clone(),
                    pattern: pattern.clone(),
                });
            }
            debug!(
                "Indexed {} patterns for intent '{}'",
                intent.patterns.len(),
                intent.name
            );
        }
        info!(
            "Pattern index built with {} entries using '{}'",
            entries.len(),
            provider.name()
        );
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::Intent;
    use crate::model::LexicalProvider;

    struct BrokenProvider;

    impl ModelProvider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        fn vectorize(&self, _text: &str) -> Result<Embedding> {
            anyhow::bail!("model unavailable")
        }
    }

    fn catalog() -> IntentCatalog {
        IntentCatalog::from_intents(
            vec![
                Intent::new("greeting", ["hello", "hi there"], ["Hi!"]),
                Intent::new("fallback", Vec::<String>::new(), ["Sorry?"]),
                Intent::new("farewell", ["goodbye"], ["Bye!"]),
            ],
            "fallback",
        )
        .unwrap()
    }

    #[test]
    fn test_one_entry_per_pattern_in_catalog_order() {
        let index = PatternIndex::build(&catalog(), &LexicalProvider::new(64)).unwrap();
        let order: Vec<(&str, &str)> = index
            .entries()
            .iter()
            .map(|e| (e.intent.as_str(), e.pattern.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("greeting", "hello"),
                ("greeting", "hi there"),
                ("farewell", "goodbye")
            ]
        );
    }

    #[test]
    fn test_empty_catalog_gives_empty_index() {
        let catalog = IntentCatalog::from_intents(Vec::new(), "fallback").unwrap();
        let index = PatternIndex::build(&catalog, &LexicalProvider::new(64)).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_provider_failure_is_fatal_with_context() {
        let err = PatternIndex::build(&catalog(), &BrokenProvider).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("pattern 'hello' of intent 'greeting'"));
        assert!(message.contains("model unavailable"));
    }
}
