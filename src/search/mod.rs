//! Multi-field fuzzy matching for credit-recognition precedents
//!
//! Three free-text fields (program, institution, course) are encoded into
//! comparable vectors, scored with cosine similarity against every
//! historical record, aggregated into an admission decision and ranked.

pub mod encoder;
pub mod engine;
pub mod similarity;
pub mod tfidf;

pub use encoder::{create_encoder, EmbeddingEncoder, QueryEncoding, TextEncoder};
pub use engine::{CorpusCache, FieldMatch, FieldScores, MatchEngine, SearchReport};
pub use similarity::cosine_similarity;
pub use tfidf::TfidfEncoder;
