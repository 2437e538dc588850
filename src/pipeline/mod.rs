//! Pipeline orchestration for port operations.
//!
//! This module provides shared orchestration logic for parse → merge → diff → report
//! workflows, reducing duplication across CLI command handlers.

mod diff_stage;
mod merge_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use merge_stage::{load_side, merge_sources};
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{parse_inputs, parse_port_source};
pub use report_stage::{build_report_config, output_collection, output_diff_report};

use crate::error::SwcDiffError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a port source file
    #[error("Parse failed for {path}")]
    ParseFailed { path: String, source: SwcDiffError },

    /// Diff computation failed
    #[error("Diff failed")]
    DiffFailed {
        #[source]
        source: SwcDiffError,
    },

    /// Report generation or output failed
    #[error("Report failed")]
    ReportFailed {
        #[source]
        source: SwcDiffError,
    },
}

impl From<PipelineError> for SwcDiffError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ParseFailed { source, .. }
            | PipelineError::DiffFailed { source }
            | PipelineError::ReportFailed { source } => source,
        }
    }
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no failure flag set)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected with `--fail-on-change`
    pub const CHANGES_DETECTED: i32 = 1;
    /// Merge conflicts were found with `--fail-on-conflict`
    pub const CONFLICTS_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
