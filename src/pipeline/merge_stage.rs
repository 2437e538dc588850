//! Merge stage: fold several parsed sources into one collection.

use super::{parse_inputs, PipelineError};
use crate::merge::{merge_all, MergeOutcome};
use crate::model::PortCollection;
use crate::parsers::ParseOptions;
use std::path::PathBuf;

/// Merge parsed collections in order, logging any conflicts.
///
/// Later collections win on conflicting payloads.
#[must_use]
pub fn merge_sources(collections: &[PortCollection], quiet: bool) -> MergeOutcome {
    let outcome = merge_all(collections);

    if collections.len() > 1 && !quiet {
        tracing::info!(
            "Merged {} sources into {} ports ({} conflicts)",
            collections.len(),
            outcome.collection.len(),
            outcome.conflicts.len()
        );
    }
    outcome.conflicts.log_summary();

    outcome
}

/// Parse and merge the files for one side of a comparison
pub fn load_side(
    paths: &[PathBuf],
    options: &ParseOptions,
    quiet: bool,
) -> Result<MergeOutcome, PipelineError> {
    let collections = parse_inputs(paths, options, quiet)?;
    Ok(merge_sources(&collections, quiet))
}
