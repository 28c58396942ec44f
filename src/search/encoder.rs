//! Text encoder trait and implementations
//!
//! Provides abstraction over the two encoding strategies:
//! - EmbeddingEncoder: dense Model2Vec embeddings (requires model download)
//! - TfidfEncoder: sparse lexical weighting (built-in, no model file)

use anyhow::{Context, Result};
use model2vec::Model2Vec;
use std::path::Path;

use crate::core::config::{Config, Strategy};
use crate::core::error::MatchError;
use crate::core::record::normalize;

use super::tfidf::TfidfEncoder;

/// A query encoded against one corpus column.
pub struct QueryEncoding {
    pub query: Vec<f32>,
    /// Corpus vectors refit for this query. Present for strategies whose
    /// vocabulary depends on the query itself (lexical); the engine must
    /// use these over any cached column. Absent for strategies with stable
    /// corpus vectors (embedding).
    pub refit_corpus: Option<Vec<Vec<f32>>>,
}

/// Encoding strategy abstraction.
///
/// Inputs are upper-cased before encoding. The empty string encodes to the
/// zero vector, which scores 0 against everything and so never matches.
pub trait TextEncoder: Send + Sync {
    /// Encode a corpus column for caching. Index-aligned with the input.
    fn encode_corpus(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Encode a query field against its corpus column context.
    fn encode_query(&self, text: &str, corpus: &[String]) -> Result<QueryEncoding>;

    /// Strategy name/identifier
    fn name(&self) -> &str;
}

// ============================================================================
// Embedding Encoder (Model2Vec)
// ============================================================================

/// Embedding dimension for potion-multilingual-128M
pub const EMBEDDING_DIM: usize = 256;

/// Dense neural encoder backed by Model2Vec static sentence embeddings.
pub struct EmbeddingEncoder {
    model: Model2Vec,
}

impl EmbeddingEncoder {
    /// Load model from local path
    pub fn from_path(path: &Path) -> Result<Self> {
        let model = Model2Vec::from_pretrained(path.to_string_lossy().as_ref(), None, None)
            .with_context(|| format!("Failed to load Model2Vec from: {}", path.display()))?;

        Ok(Self { model })
    }

    /// Load model from HuggingFace Hub
    pub fn from_pretrained(model_id: &str) -> Result<Self> {
        let model = Model2Vec::from_pretrained(model_id, None, None)
            .with_context(|| format!("Failed to load Model2Vec: {}", model_id))?;

        Ok(Self { model })
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let text = normalize(text);
        if text.is_empty() {
            return Ok(vec![0.0; EMBEDDING_DIM]);
        }

        let texts = [text.as_str()];
        let embeddings = self.model.encode(&texts).context("Failed to encode text")?;
        Ok(embeddings.row(0).to_vec())
    }
}

impl TextEncoder for EmbeddingEncoder {
    fn encode_corpus(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let normalized: Vec<String> = texts.iter().map(|t| normalize(t)).collect();
        let refs: Vec<&str> = normalized.iter().map(|s| s.as_str()).collect();

        let embeddings = self
            .model
            .encode(&refs)
            .context("Failed to encode corpus column")?;
        let mut vectors: Vec<Vec<f32>> = embeddings
            .rows()
            .into_iter()
            .map(|r| r.to_vec())
            .collect();

        // empty fields get the never-matching sentinel
        for (i, text) in normalized.iter().enumerate() {
            if text.is_empty() {
                vectors[i] = vec![0.0; EMBEDDING_DIM];
            }
        }

        Ok(vectors)
    }

    fn encode_query(&self, text: &str, _corpus: &[String]) -> Result<QueryEncoding> {
        Ok(QueryEncoding {
            query: self.embed(text)?,
            refit_corpus: None,
        })
    }

    fn name(&self) -> &str {
        "model2vec-256"
    }
}

// ============================================================================
// Factory function
// ============================================================================

/// Create the configured encoder.
///
/// Backend initialization failure is fatal for the session and reported as
/// `MatchError::EncodingUnavailable` before any search or registration runs.
pub fn create_encoder(config: &Config) -> Result<Box<dyn TextEncoder>> {
    match config.matching.strategy {
        Strategy::Lexical => Ok(Box::new(TfidfEncoder::new())),
        Strategy::Embedding => {
            let encoder = match &config.model.model_path {
                Some(path) => EmbeddingEncoder::from_path(Path::new(path)),
                None => EmbeddingEncoder::from_pretrained(&config.model.model_id),
            }
            .map_err(|e| MatchError::EncodingUnavailable(format!("{e:#}")))?;
            Ok(Box::new(encoder))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_encoder_lexical() {
        let mut config = Config::default();
        config.matching.strategy = Strategy::Lexical;

        let encoder = create_encoder(&config).unwrap();
        assert_eq!(encoder.name(), "tfidf");
    }
}
