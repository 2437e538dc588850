//! Parser trait definitions and error types.

use crate::error::MalformedRecordError;
use crate::model::{PortCollection, PortCollectionBuilder, PortRecord, RawPortRecord};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading a port source
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("XML parse error: {0}")]
    XmlError(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecordError),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

/// How to treat records that fail validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip malformed records with a warning instead of failing the source
    pub lenient: bool,
}

impl ParseOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self { lenient: false }
    }

    #[must_use]
    pub const fn lenient() -> Self {
        Self { lenient: true }
    }

    /// Validate a raw record and add it to the builder.
    ///
    /// In lenient mode a malformed record is logged and skipped; returns
    /// `Ok(false)` in that case.
    pub(crate) fn accept(
        &self,
        builder: &mut PortCollectionBuilder,
        raw: RawPortRecord,
        label: &str,
    ) -> Result<bool, ParseError> {
        match PortRecord::from_raw(raw) {
            Ok(record) => {
                builder.push(record);
                Ok(true)
            }
            Err(err) if self.lenient => {
                tracing::warn!("{label}: skipping record: {err}");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Trait for port source parsers
pub trait PortParser {
    /// Parse a file, labelling the collection with its file name
    fn parse(&self, path: &Path) -> Result<PortCollection, ParseError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content, &source_label(path))
    }

    /// Parse string content
    fn parse_str(&self, content: &str, label: &str) -> Result<PortCollection, ParseError>;

    /// Get format name
    fn format_name(&self) -> &str;
}

/// Label for a collection read from `path`: its file name, or the full path
#[must_use]
pub fn source_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
