//! Import of previously persisted certificates from a CSV export.

mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::workflows::certificates::domain::ExistingRecord;

#[derive(Debug)]
pub enum RecordImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RecordImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordImportError::Io(err) => write!(f, "failed to read certificate export: {}", err),
            RecordImportError::Csv(err) => write!(f, "invalid certificate CSV data: {}", err),
        }
    }
}

impl std::error::Error for RecordImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordImportError::Io(err) => Some(err),
            RecordImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RecordImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RecordImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ExistingRecordImporter;

impl ExistingRecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ExistingRecord>, RecordImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows without an `id` or `company_id` are skipped; a repeated `id` keeps the first row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ExistingRecord>, RecordImportError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            if row.id.is_empty() || row.company_id.is_empty() {
                warn!(row = index + 1, "skipping certificate row without id or company");
                continue;
            }
            if !seen.insert(row.id.clone()) {
                debug!(id = %row.id, "skipping repeated certificate id");
                continue;
            }
            records.push(row.into_record());
        }

        Ok(records)
    }
}
