//! Report generation for diff results and port collections.
//!
//! This module provides multiple output formats:
//! - CSV: spreadsheet import, one row per assembled report row
//! - JSON: structured data for programmatic integration
//! - Summary: compact shell-friendly output
//! - Table: aligned tabular terminal output
//!
//! Row-based formats are built on the [`assemble`] step, which flattens a
//! [`DiffReport`] into ordered presentation rows.

mod assembler;
mod csv;
mod json;
mod summary;
mod types;

pub use assembler::{assemble, AssembleOptions, ReportRow, ROW_HEADERS, SUMMARY_KIND};
pub use csv::{CsvReporter, COLLECTION_HEADERS};
pub use json::JsonReporter;
pub use summary::{SummaryReporter, TableReporter};
pub use types::{ReportConfig, ReportFormat, ReportMetadata, ReportSubject, SummaryPosition};

use crate::diff::DiffReport;
use crate::model::PortCollection;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Malformed diff report: {0}")]
    MalformedReport(String),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a diff result
    fn generate_diff_report(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Generate a report for a single collection (view and merge modes)
    fn generate_collection_report(
        &self,
        collection: &PortCollection,
        config: &ReportConfig,
    ) -> Result<String, ReportError>;

    /// Write a diff report to a writer
    fn write_diff_report(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let output = self.generate_diff_report(report, config)?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control.
///
/// `Auto` should be resolved with [`ReportFormat::resolve`] first; if it is
/// not, it behaves like `Summary`.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_formats() {
        for format in [
            ReportFormat::Summary,
            ReportFormat::Table,
            ReportFormat::Json,
            ReportFormat::Csv,
        ] {
            assert_eq!(create_reporter_with_options(format, false).format(), format);
        }
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Summary);
    }

    #[test]
    fn test_write_diff_report() {
        let report = DiffReport::new("a", "b", Vec::new());
        let mut buffer = Vec::new();
        CsvReporter::new()
            .write_diff_report(&report, &ReportConfig::default(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("owner,name,change_kind"));
    }
}
