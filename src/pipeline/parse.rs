//! Port source parsing stage.

use super::PipelineError;
use crate::model::PortCollection;
use crate::parsers::{parse_port_file_with, ParseOptions};
use std::path::{Path, PathBuf};

/// Parse one port source, logging what was read
pub fn parse_port_source(
    path: &Path,
    options: &ParseOptions,
    quiet: bool,
) -> Result<PortCollection, PipelineError> {
    if !quiet {
        tracing::info!("Parsing port source: {}", path.display());
    }

    let collection =
        parse_port_file_with(path, options).map_err(|e| PipelineError::ParseFailed {
            path: path.display().to_string(),
            source: e.into(),
        })?;

    if !quiet {
        tracing::info!(
            "Parsed {} ports in {} SWCs from {}",
            collection.len(),
            collection.owners().len(),
            collection.label()
        );
    }
    collection.log_duplicate_summary();

    Ok(collection)
}

/// Parse every input in order, stopping at the first failure
pub fn parse_inputs(
    paths: &[PathBuf],
    options: &ParseOptions,
    quiet: bool,
) -> Result<Vec<PortCollection>, PipelineError> {
    paths
        .iter()
        .map(|path| parse_port_source(path, options, quiet))
        .collect()
}
