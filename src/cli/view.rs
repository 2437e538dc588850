//! View command handler.
//!
//! Implements the `view` subcommand for listing the ports of a single source.

use super::ensure_valid;
use crate::config::ViewConfig;
use crate::pipeline::{exit_codes, output_collection, parse_port_source};
use crate::reports::ReportSubject;
use anyhow::Result;

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(config: ViewConfig) -> Result<i32> {
    ensure_valid(&config)?;

    let collection = parse_port_source(&config.path, &config.parsing.to_options(), config.quiet)?;

    let collection = match config.swc_filter.as_deref() {
        Some(swc) => {
            let restricted = collection.restricted_to_owner(swc);
            if restricted.is_empty() {
                tracing::warn!("SWC '{swc}' has no ports in {}", collection.label());
            } else if !config.quiet {
                tracing::info!("{} ports belong to SWC '{swc}'", restricted.len());
            }
            restricted
        }
        None => collection,
    };

    let format = config
        .output
        .format
        .resolve(config.output.file.as_deref(), ReportSubject::Collection);
    output_collection(&collection, &config.output, format, config.quiet)?;

    Ok(exit_codes::SUCCESS)
}
