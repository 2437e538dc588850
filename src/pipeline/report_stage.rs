//! Report output stage.
//!
//! Resolves the output format, renders the report and writes it to the
//! configured destination.

use super::{should_use_color, write_output, OutputTarget, PipelineError};
use crate::config::{DiffConfig, OutputConfig};
use crate::diff::DiffReport;
use crate::error::{ErrorContext, SwcDiffError};
use crate::model::PortCollection;
use crate::reports::{
    create_reporter_with_options, ReportConfig, ReportFormat, ReportMetadata, ReportSubject,
};
use std::path::PathBuf;

/// Report configuration for a diff run
#[must_use]
pub fn build_report_config(config: &DiffConfig) -> ReportConfig {
    ReportConfig {
        summary_position: config.report.summary_position,
        only_changes: config.report.only_changes,
        title: config
            .swc_filter
            .as_ref()
            .map(|swc| format!("SWC Port Diff: {swc}")),
        metadata: ReportMetadata {
            base_paths: display_paths(&config.paths.base),
            candidate_paths: display_paths(&config.paths.candidate),
            ..ReportMetadata::new()
        },
    }
}

/// Output a diff report to the configured destination.
pub fn output_diff_report(config: &DiffConfig, report: &DiffReport) -> Result<(), PipelineError> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let format = config
        .output
        .format
        .resolve(target.path(), ReportSubject::Diff);
    tracing::debug!("Rendering diff report as {format}");

    let reporter = create_reporter_with_options(
        format,
        should_use_color(config.output.no_color, &target),
    );
    let rendered = reporter
        .generate_diff_report(report, &build_report_config(config))
        .with_context(|| format!("rendering {format} diff report"))
        .map_err(report_failed)?;

    write_output(&rendered, &target, config.behavior.quiet).map_err(report_failed)
}

/// Output a single collection in an already resolved format.
pub fn output_collection(
    collection: &PortCollection,
    output: &OutputConfig,
    format: ReportFormat,
    quiet: bool,
) -> Result<(), PipelineError> {
    let target = OutputTarget::from_option(output.file.clone());
    tracing::debug!("Rendering {} as {format}", collection.label());

    let reporter = create_reporter_with_options(format, should_use_color(output.no_color, &target));
    let report_config = ReportConfig {
        metadata: ReportMetadata::new(),
        ..ReportConfig::default()
    };
    let rendered = reporter
        .generate_collection_report(collection, &report_config)
        .with_context(|| format!("rendering {format} port list"))
        .map_err(report_failed)?;

    write_output(&rendered, &target, quiet).map_err(report_failed)
}

fn report_failed(source: SwcDiffError) -> PipelineError {
    PipelineError::ReportFailed { source }
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfigBuilder;
    use crate::model::PortRecord;
    use crate::reports::SummaryPosition;
    use tempfile::TempDir;

    #[test]
    fn test_build_report_config() {
        let config = DiffConfigBuilder::new()
            .base_path("xml/dids.xml")
            .base_path("xml/rids.xml")
            .candidate_path("new.xml")
            .summary_position(SummaryPosition::Bottom)
            .only_changes(true)
            .swc_filter(Some("Diag".to_string()))
            .build()
            .unwrap();

        let report_config = build_report_config(&config);
        assert_eq!(report_config.summary_position, SummaryPosition::Bottom);
        assert!(report_config.only_changes);
        assert_eq!(report_config.title.as_deref(), Some("SWC Port Diff: Diag"));
        assert_eq!(report_config.metadata.base_paths.len(), 2);
        assert_eq!(report_config.metadata.tool_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_output_diff_report_csv_by_extension() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("diff.csv");
        let config = DiffConfigBuilder::new()
            .base_path("a.xml")
            .candidate_path("b.xml")
            .output_file(Some(out.clone()))
            .quiet(true)
            .build()
            .unwrap();
        let report = DiffReport::new("a.xml", "b.xml", Vec::new());

        output_diff_report(&config, &report).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("owner,name,change_kind,field,old_value,new_value\r\n"));
    }

    #[test]
    fn test_output_collection_json() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("merged.json");
        let collection = PortCollection::builder("merged")
            .with_record(PortRecord::new("Diag", "PortA").unwrap())
            .build();
        let output = OutputConfig {
            file: Some(out.clone()),
            ..OutputConfig::default()
        };

        output_collection(&collection, &output, ReportFormat::Json, true).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["label"], "merged");
        assert_eq!(written["ports"][0]["owner"], "Diag");
    }
}
