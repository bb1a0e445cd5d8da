//! # Lexical Provider
//!
//! File: cli/src/model/lexical.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! An offline provider that needs no model download. Text is lowercased and
//! split into alphanumeric words; every word is hashed (FNV-1a) into one of
//! `dimensions` buckets and the bucket counts form the vector. Two texts are
//! similar when they share words, so this backend only recognises phrasings
//! close to the catalog patterns. It exists for air-gapped machines and for
//! hermetic tests.
//!
use super::{Embedding, ModelProvider};
use crate::core::error::Result;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashed bag-of-words vectorizer.
#[derive(Debug, Clone)]
pub struct LexicalProvider {
    dimensions: usize,
}

impl LexicalProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn bucket(&self, word: &str) -> usize {
        (fnv1a(word.as_bytes()) % self.dimensions as u64) as usize
    }
}

impl ModelProvider for LexicalProvider {
    fn name(&self) -> &str {
        "lexical"
    }

    fn vectorize(&self, text: &str) -> Result<Embedding> {
        let mut values = vec![0.0f32; self.dimensions];
        for word in words(text) {
            values[self.bucket(&word)] += 1.0;
        }
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }
        Ok(Embedding::new(values))
    }
}

/// Lowercased alphanumeric words of `text`.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_normalized() {
        let collected: Vec<String> = words("Hello, WORLD!  it's  fine").collect();
        assert_eq!(collected, vec!["hello", "world", "it", "s", "fine"]);
    }

    #[test]
    fn test_identical_text_is_fully_similar() {
        let provider = LexicalProvider::new(1024);
        let a = provider.vectorize("Hi there").unwrap();
        let b = provider.vectorize("hi THERE!").unwrap();
        assert!((provider.similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_overlap_is_between_zero_and_one() {
        let provider = LexicalProvider::new(1024);
        let a = provider.vectorize("what is your name").unwrap();
        let b = provider.vectorize("what is the time").unwrap();
        let sim = provider.similarity(&a, &b);
        assert!(sim > 0.0 && sim < 1.0, "similarity was {}", sim);
    }

    #[test]
    fn test_empty_text_has_zero_vector() {
        let provider = LexicalProvider::new(16);
        let empty = provider.vectorize("   ").unwrap();
        let hello = provider.vectorize("hello").unwrap();
        assert_eq!(empty.len(), 16);
        assert_eq!(empty.norm(), 0.0);
        assert_eq!(provider.similarity(&empty, &hello), 0.0);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let provider = LexicalProvider::new(1024);
        let v = provider.vectorize("the quick brown fox jumps over the lazy dog").unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dimensions_is_clamped() {
        assert_eq!(LexicalProvider::new(0).dimensions(), 1);
    }

    #[test]
    fn test_fnv1a_known_values() {
        assert_eq!(fnv1a(b""), FNV_OFFSET_BASIS);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
