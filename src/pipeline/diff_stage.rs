//! Diff computation stage.
//!
//! Builds the engine from the configured options, runs the diff and applies
//! the optional single-SWC restriction.

use super::PipelineError;
use crate::config::DiffConfig;
use crate::diff::DiffReport;
use crate::model::PortCollection;

/// Run the core diff computation between two collections.
pub fn compute_diff(
    config: &DiffConfig,
    base: &PortCollection,
    candidate: &PortCollection,
) -> Result<DiffReport, PipelineError> {
    let quiet = config.behavior.quiet;
    let engine = config.diff.to_engine();

    if !quiet {
        tracing::info!(
            "Comparing {} base ports against {} candidate ports...",
            base.len(),
            candidate.len()
        );
    }
    if !engine.compares_source_id() {
        tracing::debug!("Item IDs excluded from comparison");
    }

    let mut report = engine
        .diff(base, candidate)
        .map_err(|source| PipelineError::DiffFailed { source })?;

    if let Some(ref swc) = config.swc_filter {
        if base.ports_of(swc).is_empty() && candidate.ports_of(swc).is_empty() {
            tracing::warn!("SWC '{swc}' has no ports in either input");
        }
        report = report.restricted_to_owner(swc);
        if !quiet {
            tracing::info!("Restricted report to SWC '{swc}'");
        }
    }

    if !quiet {
        let summary = &report.summary;
        tracing::info!(
            "Diff complete: {} added, {} removed, {} modified, {} unchanged",
            summary.added,
            summary.removed,
            summary.modified,
            summary.unchanged
        );
    }

    Ok(report)
}
