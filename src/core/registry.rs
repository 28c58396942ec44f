//! Registry storage - the historical table of recognition decisions
//!
//! A CSV file with a fixed five-column header, read in full on load and
//! rewritten in full on append. Append-only from the caller's perspective:
//! no update or delete path. Duplicate rows are accepted by design; the
//! registry is a historical log, not a deduplicated index.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::record::Recognition;

pub struct Registry {
    path: PathBuf,
}

impl Registry {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full registry. A missing file is an empty registry.
    pub fn load(&self) -> Result<Vec<Recognition>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open registry: {}", self.path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: Recognition = row
                .with_context(|| format!("Malformed registry row in {}", self.path.display()))?;
            records.push(record);
        }

        Ok(records)
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Append exactly one row.
    ///
    /// The record is validated and fully constructed before any write, then
    /// the whole file is rewritten (not streamed). Returns the new row count.
    /// Callers holding an encoded corpus cache must invalidate it afterwards.
    pub fn append(&self, record: &Recognition) -> Result<usize> {
        record.validate()?;

        let mut records = self.load()?;
        records.push(record.clone());
        self.write_all(&records)?;

        Ok(records.len())
    }

    fn write_all(&self, records: &[Recognition]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to write registry: {}", self.path.display()))?;

        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Dump the registry in storage format (full content, unmodified).
    pub fn export_to(&self, out: &mut dyn Write) -> Result<()> {
        let content = fs::read(&self.path)
            .with_context(|| format!("Failed to read registry: {}", self.path.display()))?;
        out.write_all(&content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MatchError;
    use tempfile::TempDir;

    fn sample_record() -> Recognition {
        Recognition::new("master x", "2021", "uni a", "algebra i", "linear algebra").unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_registry() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::open(dir.path().join("recognitions.csv"));
        assert!(registry.load().unwrap().is_empty());
        assert_eq!(registry.count().unwrap(), 0);
    }

    #[test]
    fn test_append_round_trip_upper_cased() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::open(dir.path().join("recognitions.csv"));

        let total = registry.append(&sample_record()).unwrap();
        assert_eq!(total, 1);

        let records = registry.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_program, "MASTER X");
        assert_eq!(records[0].recognized_course, "LINEAR ALGEBRA");
    }

    #[test]
    fn test_header_and_column_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recognitions.csv");
        let registry = Registry::open(&path);
        registry.append(&sample_record()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "source_program,academic_year,source_institution,source_course,recognized_course"
        );
    }

    #[test]
    fn test_duplicates_accepted_as_separate_rows() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::open(dir.path().join("recognitions.csv"));

        registry.append(&sample_record()).unwrap();
        let total = registry.append(&sample_record()).unwrap();
        assert_eq!(total, 2);
        assert_eq!(registry.load().unwrap().len(), 2);
    }

    #[test]
    fn test_append_rejects_incomplete_record() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::open(dir.path().join("recognitions.csv"));

        let mut record = sample_record();
        record.academic_year = String::new();
        let err = registry.append(&record).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MatchError>(),
            Some(MatchError::MissingRequiredField("academic_year"))
        ));

        // nothing was written
        assert_eq!(registry.count().unwrap(), 0);
    }

    #[test]
    fn test_export_matches_storage_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recognitions.csv");
        let registry = Registry::open(&path);
        registry.append(&sample_record()).unwrap();

        let mut dump = Vec::new();
        registry.export_to(&mut dump).unwrap();
        assert_eq!(dump, fs::read(&path).unwrap());
    }
}
