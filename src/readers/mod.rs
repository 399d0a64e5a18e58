pub mod csv;

use std::path::Path;

use crate::types::{RawRecord, Result};

/// Source loader contract: return every row of the named source table,
/// as-is, with string-typed fields.
pub trait SourceLoader {
    fn load(&mut self) -> Result<Vec<RawRecord>>;
}

/// Supported source table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(TableFormat::Csv),
            "tsv" | "tab" => Some(TableFormat::Tsv),
            _ => None,
        }
    }
}

/// Create a loader for the given file path
pub fn create_loader(path: &Path) -> Result<Box<dyn SourceLoader>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let format = TableFormat::from_extension(ext).ok_or_else(|| {
        crate::error::Error::UnsupportedFormat(format!("Unsupported file extension: .{}", ext))
    })?;

    match format {
        TableFormat::Csv => Ok(Box::new(csv::CsvSource::new(path)?)),
        TableFormat::Tsv => Ok(Box::new(csv::CsvSource::new_tsv(path)?)),
    }
}
