//! Match engine - scoring, aggregation, filtering and ranking
//!
//! Scores every historical record against the query on three independent
//! axes (program, institution, course), admits records where at least
//! `min_field_matches` axes strictly exceed the threshold, applies the
//! optional exact academic-year filter, and ranks survivors.

use anyhow::Result;
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::core::config::Config;
use crate::core::error::MatchError;
use crate::core::record::{Query, Recognition};

use super::encoder::{create_encoder, TextEncoder};
use super::similarity::cosine_similarity;

/// Per-field similarity scores for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldScores {
    pub program: f32,
    pub institution: f32,
    pub course: f32,
}

impl FieldScores {
    /// Number of fields strictly exceeding the threshold. Always in 0..=3.
    pub fn coincidences(&self, threshold: f32) -> usize {
        [self.program, self.institution, self.course]
            .iter()
            .filter(|&&score| score > threshold)
            .count()
    }
}

/// One retained record with its scores. Computed fresh per query, never
/// persisted.
#[derive(Debug, Clone)]
pub struct FieldMatch {
    pub record: Recognition,
    pub scores: FieldScores,
    pub coincidences: usize,
}

/// Ordered result of one search.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub matches: Vec<FieldMatch>,
    /// Distinct recognized courses over retained records, as a percentage.
    /// Absent when nothing was retained: no statistic is produced for an
    /// empty result set.
    pub recognized_ratio: Option<f64>,
}

/// Encoded corpus columns, index-aligned with the record sequence.
///
/// Owned by the caller and explicitly invalidated: any registry append must
/// call `invalidate()` before the next search, which then re-encodes all
/// columns including the new row. Under the lexical strategy the cached
/// vectors are additionally superseded by a per-query refit.
#[derive(Default)]
pub struct CorpusCache {
    encoded: Option<EncodedColumns>,
}

struct EncodedColumns {
    programs: Vec<Vec<f32>>,
    institutions: Vec<Vec<f32>>,
    courses: Vec<Vec<f32>>,
}

impl CorpusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the encoded columns. The next search rebuilds them.
    pub fn invalidate(&mut self) {
        self.encoded = None;
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.encoded.is_none()
    }

    fn is_valid_for(&self, record_count: usize) -> bool {
        self.encoded
            .as_ref()
            .map(|cols| cols.programs.len() == record_count)
            .unwrap_or(false)
    }
}

/// Match engine combining the configured encoder with the admission rule.
pub struct MatchEngine {
    encoder: Box<dyn TextEncoder>,
    threshold: f32,
    min_field_matches: usize,
}

impl MatchEngine {
    pub fn new(encoder: Box<dyn TextEncoder>, threshold: f32, min_field_matches: usize) -> Self {
        Self {
            encoder,
            threshold,
            min_field_matches,
        }
    }

    /// Build from configuration. Fails fast when the encoding backend
    /// cannot initialize, before any search or registration is attempted.
    pub fn from_config(config: &Config) -> Result<Self> {
        let encoder = create_encoder(config)?;
        Ok(Self::new(
            encoder,
            config.matching.threshold(),
            config.matching.min_field_matches,
        ))
    }

    #[allow(dead_code)]
    pub fn encoder_name(&self) -> &str {
        self.encoder.name()
    }

    #[allow(dead_code)]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Search the registry snapshot for prior recognitions similar to the
    /// query.
    ///
    /// An empty result is a valid terminal outcome ("no sufficiently
    /// similar precedent"), distinct from the `MissingRequiredField` error
    /// raised when the query course text is empty.
    pub fn search(
        &self,
        query: &Query,
        records: &[Recognition],
        cache: &mut CorpusCache,
    ) -> Result<SearchReport> {
        if query.course.is_empty() {
            return Err(MatchError::MissingRequiredField("source_course").into());
        }

        let programs: Vec<String> = records.iter().map(|r| r.source_program.clone()).collect();
        let institutions: Vec<String> = records
            .iter()
            .map(|r| r.source_institution.clone())
            .collect();
        let courses: Vec<String> = records.iter().map(|r| r.source_course.clone()).collect();

        if !cache.is_valid_for(records.len()) {
            cache.encoded = Some(EncodedColumns {
                programs: self.encoder.encode_corpus(&programs)?,
                institutions: self.encoder.encode_corpus(&institutions)?,
                courses: self.encoder.encode_corpus(&courses)?,
            });
        }
        let columns = cache.encoded.as_ref().unwrap();

        let program_scores = self.field_scores(&query.program, &programs, &columns.programs)?;
        let institution_scores =
            self.field_scores(&query.institution, &institutions, &columns.institutions)?;
        let course_scores = self.field_scores(&query.course, &courses, &columns.courses)?;

        let mut matches: Vec<FieldMatch> = records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| {
                let scores = FieldScores {
                    program: program_scores[i],
                    institution: institution_scores[i],
                    course: course_scores[i],
                };
                let coincidences = scores.coincidences(self.threshold);
                if coincidences < self.min_field_matches {
                    return None;
                }
                if query.has_year_filter() && record.academic_year != query.academic_year {
                    return None;
                }
                Some(FieldMatch {
                    record: record.clone(),
                    scores,
                    coincidences,
                })
            })
            .collect();

        // stable sort keeps registry order for ties
        matches.sort_by(|a, b| {
            descending(a.scores.program, b.scores.program)
                .then(descending(a.scores.institution, b.scores.institution))
                .then(descending(a.scores.course, b.scores.course))
        });

        let recognized_ratio = recognized_ratio(&matches);

        Ok(SearchReport {
            matches,
            recognized_ratio,
        })
    }

    /// Score one query field against every record on that axis.
    fn field_scores(
        &self,
        query_text: &str,
        column: &[String],
        cached: &[Vec<f32>],
    ) -> Result<Vec<f32>> {
        let encoding = self.encoder.encode_query(query_text, column)?;
        let vectors = encoding.refit_corpus.as_deref().unwrap_or(cached);
        Ok(vectors
            .iter()
            .map(|v| cosine_similarity(&encoding.query, v))
            .collect())
    }
}

fn descending(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// `distinct(recognized_course) / count` over retained records, as a
/// percentage. None when nothing was retained (no division by zero).
fn recognized_ratio(matches: &[FieldMatch]) -> Option<f64> {
    if matches.is_empty() {
        return None;
    }
    let distinct: HashSet<&str> = matches
        .iter()
        .map(|m| m.record.recognized_course.as_str())
        .collect();
    Some(distinct.len() as f64 / matches.len() as f64 * 100.0)
}
