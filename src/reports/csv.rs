//! CSV report generator.
//!
//! Generates comma-separated reports for diff and view modes, suitable for
//! spreadsheet import. Fields are quoted per RFC 4180 when needed.

use super::assembler::{assemble, ROW_HEADERS};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::DiffReport;
use crate::model::PortCollection;

/// Column headers of a collection export
pub const COLLECTION_HEADERS: [&str; 4] = ["owner", "name", "direction", "source_id"];

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate_diff_report(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let rows = assemble(report, &config.assemble_options())?;

        let mut content = String::new();
        write_line(&mut content, ROW_HEADERS);
        for row in &rows {
            write_line(&mut content, row.cells());
        }
        Ok(content)
    }

    fn generate_collection_report(
        &self,
        collection: &PortCollection,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        write_line(&mut content, COLLECTION_HEADERS);
        for record in collection.records() {
            write_line(
                &mut content,
                [
                    record.owner().as_str(),
                    record.name(),
                    record.direction().as_str(),
                    record.source_id().unwrap_or_default(),
                ],
            );
        }
        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn write_line<'a>(content: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    let line: Vec<String> = cells.into_iter().map(escape_csv).collect();
    content.push_str(&line.join(","));
    content.push_str("\r\n");
}

/// Quote a field if it contains a delimiter, quote or line break.
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
