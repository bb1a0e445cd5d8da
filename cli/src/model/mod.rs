//! # intentbot Model Providers
//!
//! File: cli/src/model/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A model provider turns text into a fixed-length vector and scores two
//! vectors against each other. The chatbot never looks inside a vector; it
//! only asks the provider for `vectorize` and `similarity`, which keeps the
//! pretrained model behind a single seam.
//!
//! ## Architecture
//!
//! - `ModelProvider`: the trait consumed by the pattern index and the matcher
//! - `Embedding`: an owned vector, independent of any tensor library
//! - `bert`: sentence-transformer backend (candle + tokenizers + hf-hub)
//! - `lexical`: offline hashed bag-of-words backend
//! - `load_provider`: picks a backend from `ModelConfig`
//!
use crate::core::config::{Backend, ModelConfig};
use crate::core::error::Result;
use tracing::info;

pub mod bert;
pub mod lexical;

pub use bert::BertProvider;
pub use lexical::LexicalProvider;

/// A sentence vector produced by a `ModelProvider`.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Euclidean length of the vector.
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|v| v * v).sum::<f32>().sqrt()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Capability consumed by the chatbot: text in, vector out, vectors compared.
pub trait ModelProvider {
    /// Human readable identifier, used in logs.
    fn name(&self) -> &str;

    /// Computes the vector for `text`.
    fn vectorize(&self, text: &str) -> Result<Embedding>;

    /// Cosine similarity of two vectors, in `[-1, 1]`.
    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        cosine_similarity(a.as_slice(), b.as_slice())
    }
}

impl<P: ModelProvider + ?Sized> ModelProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn vectorize(&self, text: &str) -> Result<Embedding> {
        (**self).vectorize(text)
    }

    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        (**self).similarity(a, b)
    }
}

/// Cosine similarity of two slices.
///
/// Returns `0.0` when the lengths differ or either vector has zero length,
/// so degenerate inputs never look similar to anything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Builds the provider selected in the configuration.
///
/// The BERT backend may download model files on first use.
pub fn load_provider(config: &ModelConfig) -> Result<Box<dyn ModelProvider>> {
    info!("Loading model provider: {}", config.backend);
    match config.backend {
        Backend::Bert => Ok(Box::new(BertProvider::load(&config.name, &config.revision)?)),
        Backend::Lexical => Ok(Box::new(LexicalProvider::new(config.lexical_dimensions))),
    }
}
