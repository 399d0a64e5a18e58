mod audit;
mod cli;
mod coerce;
mod error;
mod logging;
mod output;
mod pipeline;
mod readers;
mod remediate;
mod rules;
mod types;

use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use pipeline::PipelineOptions;
use types::{DateFormat, Result};

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            input,
            format,
            out,
            audit,
            hash_file,
        } => {
            let options = PipelineOptions {
                date_format: DateFormat::from_name(&format)?,
                hash_file,
            };

            let run = pipeline::clean_file(&input, &options)?;
            info!(report = %output::report_to_json(&run.report)?, "run complete");

            if let Some(audit_path) = audit {
                output::write_audit_file(&run.audit, &audit_path)?;
                info!(path = %audit_path.display(), entries = run.audit.len(), "audit log written");
            }

            match out {
                Some(out_path) => {
                    output::write_cleaned_csv(&run.cleaned, &out_path)?;
                    info!(path = %out_path.display(), rows = run.cleaned.len(), "cleaned table written");
                }
                None => output::write_cleaned_stdout(&run.cleaned)?,
            }
        }
        Commands::Audit { input, format, out } => {
            let options = PipelineOptions {
                date_format: DateFormat::from_name(&format)?,
                hash_file: false,
            };

            let run = pipeline::clean_file(&input, &options)?;

            match out {
                Some(out_path) => {
                    output::write_audit_file(&run.audit, &out_path)?;
                    info!(path = %out_path.display(), entries = run.audit.len(), "audit log written");
                }
                None => output::write_audit_stdout(&run.audit)?,
            }
        }
    }

    Ok(())
}
