//! Lexical TF-IDF encoder
//!
//! The vectorizer is fit jointly over {query} ∪ corpus on every query: the
//! vocabulary and IDF weights depend on the query term itself, so corpus
//! vectors are not stable across queries and scores from different queries
//! are not directly comparable. This mirrors the reference behavior and is
//! deliberate; see DESIGN.md.

use anyhow::Result;
use std::collections::{HashMap, HashSet};

use super::encoder::{QueryEncoding, TextEncoder};

/// Upper-case and split on non-alphanumeric boundaries.
///
/// No minimum token length: course titles like "ALGEBRA 1" carry meaning in
/// single-character tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_uppercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Term index and smooth IDF weights fit over a document set.
struct Vocabulary {
    terms: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// Fit over tokenized documents. Term indices follow first-seen order,
    /// so fitting the same documents twice yields identical vectors.
    fn fit(docs: &[Vec<String>]) -> Self {
        let mut terms: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for doc in docs {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in doc {
                if !seen.insert(term.as_str()) {
                    continue;
                }
                match terms.get(term.as_str()) {
                    Some(&idx) => doc_freq[idx] += 1,
                    None => {
                        terms.insert(term.clone(), terms.len());
                        doc_freq.push(1);
                    }
                }
            }
        }

        // smooth idf: ln((1 + n) / (1 + df)) + 1
        let n = docs.len() as f32;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        Self { terms, idf }
    }

    /// L2-normalized tf-idf vector over this vocabulary.
    fn vectorize(&self, tokens: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.terms.len()];
        for token in tokens {
            if let Some(&idx) = self.terms.get(token) {
                vector[idx] += self.idf[idx];
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }
}

/// Sparse lexical encoder. Stateless; all fitting happens per call.
pub struct TfidfEncoder;

impl TfidfEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TfidfEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEncoder for TfidfEncoder {
    /// Corpus-only fit, kept index-aligned for the cache invariant. These
    /// vectors are superseded by the per-query refit in `encode_query`.
    fn encode_corpus(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let docs: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t)).collect();
        let vocab = Vocabulary::fit(&docs);
        Ok(docs.iter().map(|doc| vocab.vectorize(doc)).collect())
    }

    fn encode_query(&self, text: &str, corpus: &[String]) -> Result<QueryEncoding> {
        let query_tokens = tokenize(text);
        let corpus_docs: Vec<Vec<String>> = corpus.iter().map(|t| tokenize(t)).collect();

        let mut docs = Vec::with_capacity(corpus_docs.len() + 1);
        docs.push(query_tokens.clone());
        docs.extend(corpus_docs.iter().cloned());
        let vocab = Vocabulary::fit(&docs);

        Ok(QueryEncoding {
            query: vocab.vectorize(&query_tokens),
            refit_corpus: Some(corpus_docs.iter().map(|doc| vocab.vectorize(doc)).collect()),
        })
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::similarity::cosine_similarity;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Algebra I"), vec!["ALGEBRA", "I"]);
        assert_eq!(tokenize("algebra-1 (2021)"), vec!["ALGEBRA", "1", "2021"]);
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_identical_text_scores_one() {
        let encoder = TfidfEncoder::new();
        let column = corpus(&["LINEAR ALGEBRA", "QUANTUM PHYSICS"]);

        let enc = encoder.encode_query("linear algebra", &column).unwrap();
        let vectors = enc.refit_corpus.unwrap();
        let sim = cosine_similarity(&enc.query, &vectors[0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        let encoder = TfidfEncoder::new();
        let column = corpus(&["LINEAR ALGEBRA"]);

        let enc = encoder.encode_query("ORGANIC CHEMISTRY", &column).unwrap();
        let vectors = enc.refit_corpus.unwrap();
        assert_eq!(cosine_similarity(&enc.query, &vectors[0]), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let encoder = TfidfEncoder::new();
        let column = corpus(&["Linear Algebra"]);

        let lower = encoder.encode_query("linear algebra", &column).unwrap();
        let upper = encoder.encode_query("LINEAR ALGEBRA", &column).unwrap();
        assert_eq!(lower.query, upper.query);
    }

    #[test]
    fn test_empty_query_is_zero_vector() {
        let encoder = TfidfEncoder::new();
        let column = corpus(&["LINEAR ALGEBRA"]);

        let enc = encoder.encode_query("", &column).unwrap();
        assert!(enc.query.iter().all(|&x| x == 0.0));
        let vectors = enc.refit_corpus.unwrap();
        assert_eq!(cosine_similarity(&enc.query, &vectors[0]), 0.0);
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let encoder = TfidfEncoder::new();
        let column = corpus(&["LINEAR ALGEBRA", "ALGEBRA II", "STATISTICS"]);

        let first = encoder.encode_query("algebra", &column).unwrap();
        let second = encoder.encode_query("algebra", &column).unwrap();
        assert_eq!(first.query, second.query);
        assert_eq!(first.refit_corpus, second.refit_corpus);
    }

    #[test]
    fn test_refit_corpus_is_index_aligned() {
        let encoder = TfidfEncoder::new();
        let column = corpus(&["A", "B", "C", "D"]);

        let enc = encoder.encode_query("B", &column).unwrap();
        let vectors = enc.refit_corpus.unwrap();
        assert_eq!(vectors.len(), column.len());
        // only the matching row scores 1.0
        let scores: Vec<f32> = vectors
            .iter()
            .map(|v| cosine_similarity(&enc.query, v))
            .collect();
        assert!((scores[1] - 1.0).abs() < 1e-6);
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_partial_overlap_between_thresholds() {
        let encoder = TfidfEncoder::new();
        let column = corpus(&["ALGEBRA I"]);

        // one shared token out of two on each side
        let enc = encoder.encode_query("ALGEBRA 1", &column).unwrap();
        let vectors = enc.refit_corpus.unwrap();
        let sim = cosine_similarity(&enc.query, &vectors[0]);
        assert!(sim > 0.3, "shared-token similarity {sim} should pass 0.3");
        assert!(sim < 1.0);
    }
}
