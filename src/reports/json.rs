//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffEntry, DiffReport, DiffSummary, OwnerBreakdown};
use crate::model::PortCollection;
use crate::parsers::PortSnapshot;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_diff_report(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        report
            .check_well_formed()
            .map_err(ReportError::MalformedReport)?;

        let entries: Vec<&DiffEntry> = report
            .entries
            .iter()
            .filter(|e| !config.only_changes || e.kind.is_change())
            .collect();

        let json = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo::current(),
                generated_at: Utc::now().to_rfc3339(),
                title: config.title.as_deref(),
                base: InputInfo {
                    label: &report.base_label,
                    paths: &config.metadata.base_paths,
                },
                candidate: InputInfo {
                    label: &report.candidate_label,
                    paths: &config.metadata.candidate_paths,
                },
            },
            summary: report.summary,
            owners: report.owner_breakdown(),
            entries,
        };
        self.to_json(&json)
    }

    fn generate_collection_report(
        &self,
        collection: &PortCollection,
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.to_json(&PortSnapshot::from_collection(collection))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    summary: DiffSummary,
    owners: Vec<OwnerBreakdown>,
    entries: Vec<&'a DiffEntry>,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    base: InputInfo<'a>,
    candidate: InputInfo<'a>,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

impl ToolInfo {
    const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Serialize)]
struct InputInfo<'a> {
    label: &'a str,
    #[serde(skip_serializing_if = "no_paths")]
    paths: &'a [String],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_paths(paths: &&[String]) -> bool {
    paths.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use crate::model::{PortDirection, PortRecord};

    fn report() -> DiffReport {
        let base = PortCollection::builder("v1")
            .with_record(PortRecord::new("Diag", "PortA").unwrap())
            .with_record(
                PortRecord::new("Diag", "PortB")
                    .unwrap()
                    .with_direction(PortDirection::Provided),
            )
            .build();
        let candidate = PortCollection::builder("v2")
            .with_record(PortRecord::new("Diag", "PortA").unwrap())
            .with_record(
                PortRecord::new("Diag", "PortB")
                    .unwrap()
                    .with_direction(PortDirection::Required),
            )
            .build();
        DiffEngine::new().diff(&base, &candidate).unwrap()
    }

    #[test]
    fn test_diff_json_shape() {
        let output = JsonReporter::new()
            .generate_diff_report(&report(), &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["metadata"]["tool"]["name"], "swc-port-tools");
        assert_eq!(value["metadata"]["base"]["label"], "v1");
        assert_eq!(value["summary"]["modified"], 1);
        assert_eq!(value["owners"][0]["owner"], "Diag");
        assert_eq!(value["owners"][0]["unchanged"], 1);
        assert_eq!(value["entries"].as_array().unwrap().len(), 2);
        assert_eq!(value["entries"][1]["kind"], "MODIFIED");
        assert_eq!(value["entries"][1]["field_changes"][0]["field"], "direction");
    }

    #[test]
    fn test_diff_json_only_changes() {
        let config = ReportConfig {
            only_changes: true,
            ..Default::default()
        };
        let output = JsonReporter::new()
            .pretty(false)
            .generate_diff_report(&report(), &config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["entries"].as_array().unwrap().len(), 1);
        assert_eq!(value["summary"]["unchanged"], 1);
    }
}
