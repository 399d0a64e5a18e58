use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::audit::project_anomalies;
use crate::coerce::coerce_record;
use crate::readers::create_loader;
use crate::remediate::remediate;
use crate::rules::classify;
use crate::types::{
    AuditEntry, CleanedRecord, DateFormat, FlaggedRecord, RawRecord, Result,
};

/// Options for a pipeline run
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Parse format for birth_date and created_at; must be pinned per
    /// deployment of the source data
    pub date_format: DateFormat,
    /// Whether to hash the source file into the run report
    pub hash_file: bool,
}

/// Anomaly counts for one run
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    pub row_count: usize,
    pub anomalous_count: usize,
    pub age_anomaly_count: usize,
    pub identifier_anomaly_count: usize,
    pub status_anomaly_count: usize,
}

impl RunSummary {
    fn from_flagged(records: &[FlaggedRecord]) -> Self {
        Self {
            row_count: records.len(),
            anomalous_count: records.iter().filter(|r| r.is_anomalous()).count(),
            age_anomaly_count: records.iter().filter(|r| r.flags.age).count(),
            identifier_anomaly_count: records.iter().filter(|r| r.flags.identifier).count(),
            status_anomaly_count: records.iter().filter(|r| r.flags.status).count(),
        }
    }
}

/// Report describing a completed run of the pipeline over one source file
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub version: String,
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    pub date_format: DateFormat,
    pub summary: RunSummary,
}

/// All layers produced by the pure core for one record set
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub flagged: Vec<FlaggedRecord>,
    pub audit: Vec<AuditEntry>,
    pub cleaned: Vec<CleanedRecord>,
    pub summary: RunSummary,
}

/// Result of running the pipeline against a source file
#[derive(Debug, Clone)]
pub struct CleanRun {
    pub report: RunReport,
    pub audit: Vec<AuditEntry>,
    pub cleaned: Vec<CleanedRecord>,
}

/// The pure core: coerce, classify, then project the audit log and the
/// remediated table. Total over any record set; data-quality problems
/// come out as flags and sentinels, never as errors.
pub fn run(raw: Vec<RawRecord>, date_format: DateFormat) -> PipelineOutput {
    let flagged: Vec<FlaggedRecord> = raw
        .into_iter()
        .map(|record| {
            let typed = coerce_record(record, date_format);
            let flags = classify(&typed);
            FlaggedRecord { typed, flags }
        })
        .collect();

    let audit = project_anomalies(&flagged);
    let cleaned = remediate(&flagged);
    let summary = RunSummary::from_flagged(&flagged);

    PipelineOutput {
        flagged,
        audit,
        cleaned,
        summary,
    }
}

/// Load a source table from disk and run the full pipeline over it
pub fn clean_file(path: &Path, options: &PipelineOptions) -> Result<CleanRun> {
    let mut loader = create_loader(path)?;
    let raw = loader.load()?;
    info!(rows = raw.len(), source = %path.display(), "loaded source table");

    let output = run(raw, options.date_format);
    info!(
        anomalous = output.summary.anomalous_count,
        age = output.summary.age_anomaly_count,
        identifier = output.summary.identifier_anomaly_count,
        status = output.summary.status_anomaly_count,
        "classification complete"
    );

    let source_hash = if options.hash_file {
        Some(compute_file_hash(path)?)
    } else {
        None
    };

    let source_file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let report = RunReport {
        version: "1.0.0".to_string(),
        source_file,
        source_hash,
        date_format: options.date_format,
        summary: output.summary,
    };

    Ok(CleanRun {
        report,
        audit: output.audit,
        cleaned: output.cleaned,
    })
}

/// Compute SHA-256 hash of a file (streaming to handle large files)
fn compute_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
