//! Unified error types for swc-port-tools.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and messages that name the offending SWC/port pair.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for swc-port-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SwcDiffError {
    /// Errors while reading a port source
    #[error("Failed to parse port source{}", with_colon(.context))]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// A record could not be constructed from adapter-supplied fields
    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecordError),

    /// Two collections were built from different identity schemes
    #[error(transparent)]
    Incomparable(#[from] IncomparableInputError),

    /// Errors during report assembly or rendering
    #[error("Report generation failed{}", with_colon(.context))]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context; the underlying error is the source
    #[error("{message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid XML structure: {0}")]
    InvalidXml(String),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    Io(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("Malformed diff report: {0}")]
    MalformedReport(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// A port record whose identity fields are missing or empty.
///
/// Carries whatever parts of the `(owner, name)` pair were known so the
/// message points at the offending entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed port record (owner: {}, name: {}{}): {reason}",
    display_part(.owner.as_deref()),
    display_part(.name.as_deref()),
    .source_id.as_deref().map(|id| format!(", item {id}")).unwrap_or_default())]
pub struct MalformedRecordError {
    /// Owner as supplied by the adapter, if any
    pub owner: Option<String>,
    /// Port name as supplied by the adapter, if any
    pub name: Option<String>,
    /// Originating item ID, if known
    pub source_id: Option<String>,
    /// What was wrong with the record
    pub reason: String,
}

impl MalformedRecordError {
    pub fn new(
        owner: Option<&str>,
        name: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.map(str::to_string),
            name: name.map(str::to_string),
            source_id: None,
            reason: reason.into(),
        }
    }

    /// Attach the originating item ID.
    #[must_use]
    pub fn with_source_id(mut self, source_id: Option<&str>) -> Self {
        self.source_id = source_id.map(str::to_string);
        self
    }
}

/// `": context"`, or nothing when there is no context
fn with_colon(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!(": {context}")
    }
}

fn display_part(part: Option<&str>) -> String {
    match part {
        Some(s) if !s.trim().is_empty() => format!("'{s}'"),
        _ => "<missing>".to_string(),
    }
}

/// Two collections cannot be meaningfully compared.
///
/// Raised by the diff engine's best-effort consistency check when the inputs
/// appear to use different identity schemes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Incomparable inputs '{base_label}' and '{candidate_label}': {reason}")]
pub struct IncomparableInputError {
    pub base_label: String,
    pub candidate_label: String,
    pub reason: String,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for swc-port-tools operations
pub type Result<T> = std::result::Result<T, SwcDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl SwcDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("IO error at {}", path.display());
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for SwcDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: "IO error".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SwcDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<crate::parsers::ParseError> for SwcDiffError {
    fn from(err: crate::parsers::ParseError) -> Self {
        use crate::parsers::ParseError;
        match err {
            ParseError::MalformedRecord(e) => Self::MalformedRecord(e),
            ParseError::XmlError(msg) => Self::parse("", ParseErrorKind::InvalidXml(msg)),
            ParseError::JsonError(msg) => Self::parse("", ParseErrorKind::InvalidJson(msg)),
            ParseError::UnsupportedFileType(ext) => {
                Self::parse("", ParseErrorKind::UnsupportedFileType(ext))
            }
            ParseError::IoError(msg) => Self::parse("", ParseErrorKind::Io(msg)),
        }
    }
}

impl From<crate::reports::ReportError> for SwcDiffError {
    fn from(err: crate::reports::ReportError) -> Self {
        use crate::reports::ReportError;
        match err {
            ReportError::MalformedReport(msg) => {
                Self::report("", ReportErrorKind::MalformedReport(msg))
            }
            ReportError::SerializationError(msg) => {
                Self::report("", ReportErrorKind::Serialization(msg))
            }
            ReportError::IoError(e) => e.into(),
        }
    }
}

impl From<crate::config::ConfigFileError> for SwcDiffError {
    fn from(err: crate::config::ConfigFileError) -> Self {
        use crate::config::ConfigFileError;
        match err {
            ConfigFileError::NotFound(path) => Self::Io {
                message: format!("Config file not found: {}", path.display()),
                source: std::io::ErrorKind::NotFound.into(),
                path: Some(path),
            },
            other => Self::config(other.to_string()),
        }
    }
}

impl From<crate::config::ConfigError> for SwcDiffError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::validation(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// This trait provides methods to add context information to errors,
/// creating a chain of context that helps trace the source of problems.
///
/// # Example
///
/// ```ignore
/// use swc_port_tools::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<PortCollection> {
///     parse_port_file(path)
///         .with_context(|| format!("loading ports from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context,
    /// creating a chain that shows the path through the code.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SwcDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Record and comparability errors carry their own identifying detail and
/// are passed through unchanged.
fn add_context_to_error(err: SwcDiffError, new_ctx: &str) -> SwcDiffError {
    match err {
        SwcDiffError::Parse {
            context: existing,
            source,
        } => SwcDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SwcDiffError::Report {
            context: existing,
            source,
        } => SwcDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SwcDiffError::Io {
            path,
            message,
            source,
        } => SwcDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SwcDiffError::Config(msg) => SwcDiffError::Config(chain_context(new_ctx, &msg)),
        SwcDiffError::Validation(msg) => SwcDiffError::Validation(chain_context(new_ctx, &msg)),
        other @ (SwcDiffError::MalformedRecord(_) | SwcDiffError::Incomparable(_)) => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| SwcDiffError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| SwcDiffError::Validation(f().into()))
    }
}
