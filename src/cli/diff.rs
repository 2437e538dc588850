//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two sets of port sources.

use super::ensure_valid;
use crate::config::DiffConfig;
use crate::diff::DiffReport;
use crate::pipeline::{compute_diff, exit_codes, load_side, output_diff_report};
use anyhow::Result;
use std::path::PathBuf;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    ensure_valid(&config)?;
    warn_on_shared_file_names(&config.paths.base, &config.paths.candidate);

    let quiet = config.behavior.quiet;
    let options = config.parsing.to_options();

    let base = load_side(&config.paths.base, &options, quiet)?;
    let candidate = load_side(&config.paths.candidate, &options, quiet)?;

    if !quiet {
        tracing::info!(
            "Loaded {} base ports, {} candidate ports",
            base.collection.len(),
            candidate.collection.len()
        );
    }

    let report = compute_diff(&config, &base.collection, &candidate.collection)?;
    output_diff_report(&config, &report)?;

    Ok(determine_exit_code(&config, &report))
}

/// Determine the appropriate exit code based on diff results and config flags.
fn determine_exit_code(config: &DiffConfig, report: &DiffReport) -> i32 {
    if config.behavior.fail_on_change && report.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

/// Same file name on both sides usually means two exports of one source
fn warn_on_shared_file_names(base: &[PathBuf], candidate: &[PathBuf]) {
    for b in base {
        let Some(name) = b.file_name() else {
            continue;
        };
        for c in candidate {
            if c.file_name() == Some(name) {
                tracing::warn!(
                    "{} and {} share a file name; check that the intended files are compared",
                    b.display(),
                    c.display()
                );
            }
        }
    }
}
