//! # sq-store — The Store of SALESQ
//!
//! Loads the sales dataset from a delimited file exactly once and holds it
//! read-only for the lifetime of the process. Queries borrow the records; the
//! store is never mutated after construction, so it can be shared behind an
//! `Arc` without locks.

mod error;

pub use error::{Result, StoreError};

use sq_core::{evaluate, QueryOptions, QueryResult, Record};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BOM: char = '\u{feff}';

/// Immutable in-memory sales dataset.
#[derive(Debug, Clone, Default)]
pub struct Store {
    records: Vec<Record>,
}

impl Store {
    /// Load a CSV file with a header row.
    ///
    /// Blank rows are skipped. An unreadable file, a missing header or a file
    /// without any data row is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} sales records from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse CSV from any reader. Columns keep header order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = csv
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches(BOM).to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(StoreError::MissingHeader);
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in csv.records() {
            let row = row?;
            if row.iter().all(|v| v.trim().is_empty()) {
                skipped += 1;
                continue;
            }
            records.push(Record::from_columns(
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), row.get(i).unwrap_or_default().to_string())),
            ));
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} blank rows", skipped);
        }
        if records.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn query(&self, options: &QueryOptions) -> QueryResult {
        evaluate(&self.records, options)
    }
}
