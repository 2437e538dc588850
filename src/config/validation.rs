//! Configuration validation for swc-port-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, DiffConfig, MergeConfig, OutputConfig, ViewConfig};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.output.validate()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check_inputs_exist("paths.base", &self.paths.base, &mut errors);
        check_inputs_exist("paths.candidate", &self.paths.candidate, &mut errors);

        for path in &self.paths.base {
            if self.paths.candidate.iter().any(|c| same_file(path, c)) {
                errors.push(ConfigError::new(
                    "paths",
                    format!(
                        "{} is listed as both base and candidate",
                        path.display()
                    ),
                ));
            }
        }

        if let Some(ref swc) = self.swc_filter {
            if swc.trim().is_empty() {
                errors.push(ConfigError::new("swc", "SWC filter must not be empty"));
            }
        }

        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for MergeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.paths.len() < 2 {
            errors.push(ConfigError::new(
                "paths",
                format!("merge needs at least two files, got {}", self.paths.len()),
            ));
        }
        check_inputs_exist("paths", &self.paths, &mut errors);

        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ViewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_inputs_exist("path", std::slice::from_ref(&self.path), &mut errors);
        errors.extend(self.output.validate());
        errors
    }
}

fn check_inputs_exist(field: &str, paths: &[PathBuf], errors: &mut Vec<ConfigError>) {
    if paths.is_empty() {
        errors.push(ConfigError::new(field, "no input files given"));
    }
    for path in paths {
        if !path.exists() {
            errors.push(ConfigError::new(
                field,
                format!("File not found: {}", path.display()),
            ));
        }
    }
}

/// Compare canonical paths when both resolve, else the paths as given
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
