//! Configuration module for swc-port-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for configuration values and command inputs
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use swc_port_tools::config::AppConfig;
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .summary_position(SummaryPosition::Bottom)
//!     .compare_source_id(false)
//!     .fail_on_change(true)
//!     .build();
//!
//! // Load from file
//! use swc_port_tools::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.swc-port-tools.yaml` file in your project root or
//! `~/.config/swc-port-tools/`:
//!
//! ```yaml
//! report:
//!   summary_position: bottom
//!   only_changes: true
//! parsing:
//!   lenient: true
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffConfigBuilder, DiffEngineConfig,
    DiffPaths, MergeConfig, OutputConfig, ParsingConfig, ReportLayoutConfig, ViewConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, search_paths, ConfigFileError, ConfigOverrides, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.swc-port-tools.yaml` config files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["output", "report", "diff", "parsing", "behavior"] {
            assert!(schema.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }
}
