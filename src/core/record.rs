use serde::{Deserialize, Serialize};

use super::error::MatchError;

/// Normalize a free-text field: trim and upper-case.
///
/// All text is stored and compared upper-cased so that matching is
/// case-insensitive without the caller having to normalize anything.
pub fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}

/// One prior credit-recognition decision.
///
/// Field order matches the registry file column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub source_program: String,
    pub academic_year: String,
    pub source_institution: String,
    pub source_course: String,
    pub recognized_course: String,
}

impl Recognition {
    /// Build a normalized record from raw user input.
    ///
    /// All five fields are mandatory for an authoritative record.
    pub fn new(
        program: &str,
        year: &str,
        institution: &str,
        course: &str,
        recognized: &str,
    ) -> Result<Self, MatchError> {
        let record = Self {
            source_program: normalize(program),
            academic_year: normalize(year),
            source_institution: normalize(institution),
            source_course: normalize(course),
            recognized_course: normalize(recognized),
        };
        record.validate()?;
        Ok(record)
    }

    /// Check that every field is non-empty, naming the first one that isn't.
    pub fn validate(&self) -> Result<(), MatchError> {
        let fields: [(&'static str, &str); 5] = [
            ("source_program", &self.source_program),
            ("academic_year", &self.academic_year),
            ("source_institution", &self.source_institution),
            ("source_course", &self.source_course),
            ("recognized_course", &self.recognized_course),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(MatchError::MissingRequiredField(name));
            }
        }
        Ok(())
    }
}

/// A transient search request. Normalized on construction; never persisted.
///
/// `course` is the one mandatory field. The others are optional: an empty
/// program or institution simply never exceeds its similarity threshold,
/// and an empty `academic_year` disables the exact year filter.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub program: String,
    pub institution: String,
    pub academic_year: String,
    pub course: String,
}

impl Query {
    pub fn new(program: &str, institution: &str, year: &str, course: &str) -> Self {
        Self {
            program: normalize(program),
            institution: normalize(institution),
            academic_year: normalize(year),
            course: normalize(course),
        }
    }

    pub fn has_year_filter(&self) -> bool {
        !self.academic_year.is_empty()
    }
}
