//! Configuration type definitions.

use crate::reports::{ReportFormat, SummaryPosition};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration.
///
/// This is the top-level configuration that can be loaded from a YAML file
/// and layered under command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings
    pub output: OutputConfig,
    /// Report layout settings
    pub report: ReportLayoutConfig,
    /// Diff engine settings
    pub diff: DiffEngineConfig,
    /// Port source parsing settings
    pub parsing: ParsingConfig,
    /// Exit-code and verbosity behavior
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for customizing configuration.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for `AppConfig`.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Set where summary rows are placed.
    pub const fn summary_position(mut self, position: SummaryPosition) -> Self {
        self.config.report.summary_position = position;
        self
    }

    /// Drop unchanged entries from row-based reports.
    pub const fn only_changes(mut self, only: bool) -> Self {
        self.config.report.only_changes = only;
        self
    }

    /// Compare the originating item ID when diffing.
    pub const fn compare_source_id(mut self, compare: bool) -> Self {
        self.config.diff.compare_source_id = compare;
        self
    }

    /// Enable the identity scheme consistency check.
    pub const fn consistency_check(mut self, enabled: bool) -> Self {
        self.config.diff.consistency_check = enabled;
        self
    }

    /// Skip malformed port records instead of failing.
    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.config.parsing.lenient = lenient;
        self
    }

    /// Exit with code 1 when changes are detected.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Exit with code 1 when a merge produced conflicts.
    pub const fn fail_on_conflict(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_conflict = fail;
        self
    }

    /// Suppress non-essential output.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Layout of assembled report rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportLayoutConfig {
    /// Place the per-kind summary rows at the top or bottom
    pub summary_position: SummaryPosition,
    /// Only show ports with changes
    pub only_changes: bool,
}

/// Diff engine options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffEngineConfig {
    /// Treat a changed item ID as a modification
    pub compare_source_id: bool,
    /// Refuse to compare collections with mismatched identity schemes
    pub consistency_check: bool,
}

impl Default for DiffEngineConfig {
    fn default() -> Self {
        Self {
            compare_source_id: true,
            consistency_check: true,
        }
    }
}

impl DiffEngineConfig {
    /// Build a diff engine with these options
    #[must_use]
    pub const fn to_engine(&self) -> crate::diff::DiffEngine {
        crate::diff::DiffEngine::new()
            .compare_source_id(self.compare_source_id)
            .consistency_check(self.consistency_check)
    }
}

/// Port source parsing options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParsingConfig {
    /// Skip malformed port records with a warning instead of failing the file
    pub lenient: bool,
}

impl ParsingConfig {
    #[must_use]
    pub const fn to_options(&self) -> crate::parsers::ParseOptions {
        if self.lenient {
            crate::parsers::ParseOptions::lenient()
        } else {
            crate::parsers::ParseOptions::strict()
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any changes detected
    pub fail_on_change: bool,
    /// Exit with code 1 if merging produced conflicts
    pub fail_on_conflict: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

impl BehaviorConfig {
    /// Default tracing filter for this behavior; `verbose` wins over `quiet`
    #[must_use]
    pub const fn log_level(&self, verbose: bool) -> &'static str {
        if verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for diff operations
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Input files for both sides
    pub paths: DiffPaths,
    /// Output configuration
    pub output: OutputConfig,
    /// Report layout
    pub report: ReportLayoutConfig,
    /// Engine options
    pub diff: DiffEngineConfig,
    /// Parsing options
    pub parsing: ParsingConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Restrict the report to a single SWC
    pub swc_filter: Option<String>,
}

/// Paths for diff operation. Each side lists one or more files, merged in order.
#[derive(Debug, Clone, Default)]
pub struct DiffPaths {
    /// Baseline files
    pub base: Vec<PathBuf>,
    /// Candidate files
    pub candidate: Vec<PathBuf>,
}

/// Configuration for merge operations
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Files to merge, in precedence order (later wins)
    pub paths: Vec<PathBuf>,
    /// Output configuration
    pub output: OutputConfig,
    /// Parsing options
    pub parsing: ParsingConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Configuration for view operations
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Port source file
    pub path: PathBuf,
    /// Output configuration
    pub output: OutputConfig,
    /// Parsing options
    pub parsing: ParsingConfig,
    /// Only list ports of this SWC
    pub swc_filter: Option<String>,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Builder for DiffConfig
// ============================================================================

/// Builder for `DiffConfig`.
///
/// Starts from an [`AppConfig`] so that file settings act as defaults.
#[derive(Debug, Default)]
#[must_use]
pub struct DiffConfigBuilder {
    base: Vec<PathBuf>,
    candidate: Vec<PathBuf>,
    app: AppConfig,
    swc_filter: Option<String>,
}

impl DiffConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed all settings from an application config
    pub fn from_app_config(app: AppConfig) -> Self {
        Self {
            app,
            ..Self::default()
        }
    }

    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base.push(path.into());
        self
    }

    pub fn base_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.base = paths;
        self
    }

    pub fn candidate_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidate.push(path.into());
        self
    }

    pub fn candidate_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.candidate = paths;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.app.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.app.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.app.output.no_color = no_color;
        self
    }

    pub const fn summary_position(mut self, position: SummaryPosition) -> Self {
        self.app.report.summary_position = position;
        self
    }

    pub const fn only_changes(mut self, only: bool) -> Self {
        self.app.report.only_changes = only;
        self
    }

    pub const fn compare_source_id(mut self, compare: bool) -> Self {
        self.app.diff.compare_source_id = compare;
        self
    }

    pub const fn consistency_check(mut self, enabled: bool) -> Self {
        self.app.diff.consistency_check = enabled;
        self
    }

    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.app.parsing.lenient = lenient;
        self
    }

    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.app.behavior.fail_on_change = fail;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.app.behavior.quiet = quiet;
        self
    }

    pub fn swc_filter(mut self, swc: Option<String>) -> Self {
        self.swc_filter = swc;
        self
    }

    /// Build the config, checking that both sides have inputs.
    pub fn build(self) -> anyhow::Result<DiffConfig> {
        if self.base.is_empty() {
            anyhow::bail!("at least one base file is required");
        }
        if self.candidate.is_empty() {
            anyhow::bail!("at least one candidate file is required");
        }

        Ok(DiffConfig {
            paths: DiffPaths {
                base: self.base,
                candidate: self.candidate,
            },
            output: self.app.output,
            report: self.app.report,
            diff: self.app.diff,
            parsing: self.app.parsing,
            behavior: self.app.behavior,
            swc_filter: self.swc_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.output.format, ReportFormat::Auto);
        assert!(config.diff.compare_source_id);
        assert!(config.diff.consistency_check);
        assert!(!config.parsing.lenient);
        assert_eq!(config.report.summary_position, SummaryPosition::Top);
    }

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::builder()
            .output_format(ReportFormat::Csv)
            .summary_position(SummaryPosition::Bottom)
            .compare_source_id(false)
            .lenient(true)
            .fail_on_conflict(true)
            .build();

        assert_eq!(config.output.format, ReportFormat::Csv);
        assert_eq!(config.report.summary_position, SummaryPosition::Bottom);
        assert!(!config.diff.compare_source_id);
        assert!(config.parsing.lenient);
        assert!(config.behavior.fail_on_conflict);
    }

    #[test]
    fn test_diff_config_builder_requires_both_sides() {
        assert!(DiffConfigBuilder::new().base_path("a.xml").build().is_err());
        assert!(DiffConfigBuilder::new().candidate_path("b.xml").build().is_err());

        let config = DiffConfigBuilder::new()
            .base_path("a.xml")
            .base_path("a2.xml")
            .candidate_path("b.xml")
            .swc_filter(Some("Diag".to_string()))
            .build()
            .unwrap();
        assert_eq!(config.paths.base.len(), 2);
        assert_eq!(config.swc_filter.as_deref(), Some("Diag"));
    }

    #[test]
    fn test_diff_config_builder_seeded_from_app_config() {
        let app = AppConfig::builder().only_changes(true).consistency_check(false).build();
        let config = DiffConfigBuilder::from_app_config(app)
            .base_path("a.xml")
            .candidate_path("b.xml")
            .build()
            .unwrap();
        assert!(config.report.only_changes);
        assert!(!config.diff.consistency_check);
    }

    #[test]
    fn test_engine_and_parse_options_from_config() {
        let engine = DiffEngineConfig {
            compare_source_id: false,
            consistency_check: true,
        }
        .to_engine();
        assert!(!engine.compares_source_id());
        assert!(engine.checks_consistency());

        assert!(ParsingConfig { lenient: true }.to_options().lenient);
        assert!(!ParsingConfig::default().to_options().lenient);
    }

    #[test]
    fn test_log_level_follows_quiet_setting() {
        let quiet = BehaviorConfig {
            quiet: true,
            ..BehaviorConfig::default()
        };
        assert_eq!(quiet.log_level(false), "warn");
        assert_eq!(quiet.log_level(true), "debug");
        assert_eq!(BehaviorConfig::default().log_level(false), "info");
    }
}
