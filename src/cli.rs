use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Anomaly detection and remediation for a user enrollment dataset
#[derive(Parser, Debug)]
#[command(name = "enroll-clean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: flag anomalies, remediate, write the cleaned table
    Clean {
        /// Source table path (CSV or TSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Date/timestamp parse format: 'mdy' or 'iso'
        #[arg(short, long)]
        format: String,

        /// Cleaned table output path (stdout if not specified)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Audit log output path (JSON); skipped if not specified
        #[arg(short, long)]
        audit: Option<PathBuf>,

        /// Record a SHA-256 hash of the source file in the run report
        #[arg(long, default_value_t = true)]
        hash_file: bool,
    },

    /// Project the anomaly audit log only
    Audit {
        /// Source table path (CSV or TSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Date/timestamp parse format: 'mdy' or 'iso'
        #[arg(short, long)]
        format: String,

        /// Audit log output path (stdout if not specified)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
