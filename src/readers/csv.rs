use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder};

use crate::coerce::is_missing;
use crate::types::{RawRecord, Result, REQUIRED_COLUMNS};

use super::SourceLoader;

/// CSV/TSV source table loader
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvSource {
    /// Create a new CSV loader
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b',',
        })
    }

    /// Create a new TSV loader
    pub fn new_tsv(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b'\t',
        })
    }

    fn create_reader(&self) -> Result<Reader<BufReader<File>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Ok(csv_reader)
    }
}

impl SourceLoader for CsvSource {
    fn load(&mut self) -> Result<Vec<RawRecord>> {
        let mut reader = self.create_reader()?;

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        // A structurally absent column is a schema error and aborts the
        // run; it is not imputable data.
        let indices = column_indices(&headers)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;

            // A short row leaves trailing fields missing; that is a
            // data-quality problem, handled downstream.
            let field = |idx: usize| -> Option<String> {
                record
                    .get(idx)
                    .filter(|v| !is_missing(v))
                    .map(|v| v.to_string())
            };

            records.push(RawRecord {
                id: field(indices[0]),
                first_name: field(indices[1]),
                last_name: field(indices[2]),
                email: field(indices[3]),
                phone: field(indices[4]),
                birth_date: field(indices[5]),
                created_at: field(indices[6]),
                status: field(indices[7]),
            });
        }

        Ok(records)
    }
}

/// Resolve each required column to its header position, in
/// `REQUIRED_COLUMNS` order
fn column_indices(headers: &[String]) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut missing = Vec::new();

    for name in REQUIRED_COLUMNS {
        match headers.iter().position(|h| h.trim() == *name) {
            Some(idx) => indices.push(idx),
            None => missing.push(*name),
        }
    }

    if !missing.is_empty() {
        return Err(crate::error::Error::Schema(format!(
            "source table is missing required column(s): {}",
            missing.join(", ")
        )));
    }

    Ok(indices)
}
