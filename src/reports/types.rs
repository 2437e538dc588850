//! Report type definitions.

use super::AssembleOptions;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Pick by output file extension, else summary (diff) or table (view)
    #[default]
    Auto,
    /// Brief summary output
    Summary,
    /// Aligned table for terminal (colored)
    Table,
    /// Structured JSON output
    Json,
    /// CSV for spreadsheet import
    Csv,
}

/// What a report describes, used to resolve [`ReportFormat::Auto`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSubject {
    Diff,
    Collection,
}

impl ReportFormat {
    /// Resolve `Auto` to a concrete format.
    ///
    /// A `.csv` or `.json` output file selects that format; anything else
    /// falls back to summary for diffs and table for collections.
    #[must_use]
    pub fn resolve(self, output_file: Option<&Path>, subject: ReportSubject) -> Self {
        if self != Self::Auto {
            return self;
        }
        let extension = output_file
            .and_then(Path::extension)
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match (extension.as_deref(), subject) {
            (Some("csv"), _) => Self::Csv,
            (Some("json"), _) => Self::Json,
            (_, ReportSubject::Diff) => Self::Summary,
            (_, ReportSubject::Collection) => Self::Table,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Where summary rows go in an assembled report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPosition {
    #[default]
    Top,
    Bottom,
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Placement of the summary rows
    pub summary_position: SummaryPosition,
    /// Drop unchanged entries from row-based output
    pub only_changes: bool,
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    /// Options handed to the row assembler
    #[must_use]
    pub const fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            summary_position: self.summary_position,
            only_changes: self.only_changes,
        }
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Base input file paths
    pub base_paths: Vec<String>,
    /// Candidate input file paths
    pub candidate_paths: Vec<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
