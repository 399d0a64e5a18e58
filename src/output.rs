use std::io::Write;
use std::path::Path;

use crate::pipeline::RunReport;
use crate::types::{AuditEntry, CleanedRecord, Result};

/// Materialize the cleaned table as CSV, replacing any prior contents
pub fn write_cleaned_csv(records: &[CleanedRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_cleaned(records, writer)
}

/// Write the cleaned table as CSV to stdout
pub fn write_cleaned_stdout(records: &[CleanedRecord]) -> Result<()> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    write_cleaned(records, handle)
}

fn write_cleaned<W: Write>(records: &[CleanedRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the audit log to a JSON file
pub fn write_audit_file(entries: &[AuditEntry], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, entries)?;
    Ok(())
}

/// Write the audit log to stdout
pub fn write_audit_stdout(entries: &[AuditEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json)?;
    Ok(())
}

/// Render the run report as JSON
pub fn report_to_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
