//! # Sentence-Transformer Provider
//!
//! File: cli/src/model/bert.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Runs a BERT sentence-transformer (by default
//! `sentence-transformers/all-MiniLM-L6-v2`) on the CPU with candle. A
//! sentence vector is the attention-masked mean of the token embeddings,
//! L2-normalised so that cosine similarity is a plain dot product.
//!
//! ## Model files
//!
//! `config.json`, `tokenizer.json` and `model.safetensors` are looked up in
//! the local Hugging Face cache first. Files that are missing are downloaded
//! once through the synchronous `hf-hub` API; a failed download is fatal.
//!
use super::{Embedding, ModelProvider};
use crate::core::error::{BotError, Result};
use anyhow::{anyhow, Context};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::{api::sync::ApiBuilder, Cache, Repo, RepoType};
use std::path::PathBuf;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHTS_FILE: &str = "model.safetensors";

/// Longest input, in tokens, that the model accepts.
const MAX_SEQUENCE_LENGTH: usize = 512;

/// BERT sentence-transformer loaded from the Hugging Face Hub.
pub struct BertProvider {
    name: String,
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl BertProvider {
    /// Loads the model `model_id` at `revision`, downloading files that are
    /// not cached yet.
    pub fn load(model_id: &str, revision: &str) -> Result<Self> {
        let device = Device::Cpu;
        let files = ModelFiles::fetch(model_id, revision)?;

        let config: Config = serde_json::from_str(
            &std::fs::read_to_string(&files.config)
                .with_context(|| format!("Failed to read {}", files.config.display()))?,
        )
        .with_context(|| format!("Failed to parse {}", files.config.display()))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| anyhow!(BotError::Model(format!("Failed to load tokenizer: {}", e))))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| anyhow!(BotError::Model(format!("Failed to configure tokenizer: {}", e))))?;
        // Vectors are computed one sentence at a time, padding is never needed.
        tokenizer.with_padding(None);

        // SAFETY: the weights file is owned by the Hugging Face cache and is not
        // modified while the process runs.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DType::F32, &device)
                .context("Failed to load model weights")?
        };
        let model = BertModel::load(vb, &config).context("Failed to initialize BERT model")?;
        info!("Loaded sentence-transformer '{}' ({})", model_id, revision);

        Ok(Self {
            name: model_id.to_string(),
            model,
            tokenizer,
            device,
        })
    }

    fn embed(&self, text: &str) -> Result<Tensor> {
        let tokens = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!(BotError::Model(format!("Tokenization failed: {}", e))))?;

        let token_ids = tokens.get_ids();
        let token_type_ids = vec![0u32; token_ids.len()];
        let attention_mask = tokens.get_attention_mask();

        let token_ids = Tensor::new(token_ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(token_type_ids.as_slice(), &self.device)?.unsqueeze(0)?;

        let embeddings = self
            .model
            .forward(&token_ids, &token_type_ids, None)
            .context("Model forward pass failed")?;

        // Masked mean pooling over the token axis.
        let mask = Tensor::new(attention_mask, &self.device)?
            .unsqueeze(0)?
            .unsqueeze(2)?
            .to_dtype(DType::F32)?;
        let summed = embeddings.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
        let mean = summed.broadcast_div(&counts)?;

        let norm = mean.sqr()?.sum_keepdim(1)?.sqrt()?.clamp(1e-12, f64::MAX)?;
        Ok(mean.broadcast_div(&norm)?)
    }
}

impl ModelProvider for BertProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn vectorize(&self, text: &str) -> Result<Embedding> {
        let tensor = self.embed(text)?;
        let values = tensor
            .squeeze(0)?
            .to_vec1::<f32>()
            .context("Failed to read sentence vector")?;
        Ok(Embedding::new(values))
    }
}

/// Local paths of the three files a sentence-transformer needs.
struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

impl ModelFiles {
    fn fetch(model_id: &str, revision: &str) -> Result<Self> {
        Self::fetch_into(&Cache::default(), model_id, revision)
    }

    /// Resolves the files in `cache`, downloading the missing ones into it.
    fn fetch_into(cache: &Cache, model_id: &str, revision: &str) -> Result<Self> {
        let repo = Repo::with_revision(model_id.to_string(), RepoType::Model, revision.to_string());
        let cached_repo = cache.repo(repo.clone());

        let cached = [CONFIG_FILE, TOKENIZER_FILE, WEIGHTS_FILE].map(|file| cached_repo.get(file));
        if let [Some(config), Some(tokenizer), Some(weights)] = cached {
            debug!("Using cached model files for '{}'", model_id);
            return Ok(Self {
                config,
                tokenizer,
                weights,
            });
        }

        eprintln!("Downloading {} …", model_id);
        info!("Model '{}' not fully cached, downloading", model_id);
        let api = ApiBuilder::new()
            .with_cache_dir(cache.path().clone())
            .build()
            .map_err(|e| anyhow!(BotError::Model(format!("Failed to initialize Hugging Face API: {}", e))))?;
        let remote = api.repo(repo);
        let get = |file: &str| {
            remote.get(file).map_err(|e| {
                anyhow!(BotError::Model(format!(
                    "Model '{}' is unavailable: failed to download {}: {}",
                    model_id, file, e
                )))
            })
        };

        Ok(Self {
            config: get(CONFIG_FILE)?,
            tokenizer: get(TOKENIZER_FILE)?,
            weights: get(WEIGHTS_FILE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

    #[test]
    #[ignore] // Requires model download
    fn test_fetch_into_empty_cache() {
        let temp_dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(temp_dir.path().to_path_buf());

        let files = ModelFiles::fetch_into(&cache, MODEL, "main").expect("Download should succeed");
        for path in [&files.config, &files.tokenizer, &files.weights] {
            assert!(path.starts_with(temp_dir.path()), "{} outside cache", path.display());
            assert!(path.is_file());
        }

        // Second lookup is served from the cache.
        let cached = ModelFiles::fetch_into(&cache, MODEL, "main").unwrap();
        assert_eq!(cached.weights, files.weights);
    }

    #[test]
    #[ignore] // Requires model download
    fn test_vector_shape_and_norm() {
        let provider = BertProvider::load(MODEL, "main").expect("Model should load");
        let embedding = provider.vectorize("Hello world").expect("Vectorize should succeed");
        assert_eq!(embedding.len(), 384);
        assert!((embedding.norm() - 1.0).abs() < 1e-4);
    }

    #[test]
    #[ignore] // Requires model download
    fn test_paraphrases_are_closer_than_unrelated_text() {
        let provider = BertProvider::load(MODEL, "main").expect("Model should load");
        let hello = provider.vectorize("hello there").unwrap();
        let hi = provider.vectorize("hi, how are you").unwrap();
        let weather = provider.vectorize("the invoice is overdue by three weeks").unwrap();
        assert!(provider.similarity(&hello, &hi) > provider.similarity(&hello, &weather));
    }

    #[test]
    #[ignore] // Requires model download
    fn test_empty_text_is_accepted() {
        let provider = BertProvider::load(MODEL, "main").expect("Model should load");
        assert_eq!(provider.vectorize("").unwrap().len(), 384);
    }
}
