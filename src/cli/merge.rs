//! Merge command handler.
//!
//! Implements the `merge` subcommand, folding several port sources into one
//! collection. Conflicts go to the log; the collection goes to the output.

use super::ensure_valid;
use crate::config::MergeConfig;
use crate::pipeline::{exit_codes, merge_sources, output_collection, parse_inputs};
use crate::reports::{ReportFormat, ReportSubject};
use anyhow::Result;

/// Run the merge command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_merge(config: MergeConfig) -> Result<i32> {
    ensure_valid(&config)?;

    let quiet = config.behavior.quiet;
    let collections = parse_inputs(&config.paths, &config.parsing.to_options(), quiet)?;
    let outcome = merge_sources(&collections, quiet);

    for conflict in &outcome.conflicts {
        tracing::warn!("Conflict: {conflict}");
    }

    let format = merge_output_format(&config);
    output_collection(&outcome.collection, &config.output, format, quiet)?;

    if config.behavior.fail_on_conflict && outcome.has_conflicts() {
        return Ok(exit_codes::CONFLICTS_DETECTED);
    }
    Ok(exit_codes::SUCCESS)
}

/// Merged collections default to the JSON snapshot so they can be re-read
fn merge_output_format(config: &MergeConfig) -> ReportFormat {
    let requested = config.output.format;
    match requested.resolve(config.output.file.as_deref(), ReportSubject::Collection) {
        ReportFormat::Table if requested == ReportFormat::Auto => ReportFormat::Json,
        resolved => resolved,
    }
}
