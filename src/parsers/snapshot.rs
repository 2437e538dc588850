//! JSON snapshot of a port collection.
//!
//! Written by the JSON renderer for collection reports and read back as a
//! port source, so merged results can be diffed later.

use super::{ParseError, ParseOptions, PortParser};
use crate::model::{PortCollection, RawPortRecord};
use serde::{Deserialize, Serialize};

/// Serialized form of a [`PortCollection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSnapshot {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_scheme: Option<String>,
    #[serde(default)]
    pub ports: Vec<SnapshotPort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPort {
    pub owner: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

impl PortSnapshot {
    /// Snapshot a collection, keeping its insertion order
    #[must_use]
    pub fn from_collection(collection: &PortCollection) -> Self {
        Self {
            label: collection.label().to_string(),
            identity_scheme: collection.explicit_identity_scheme().map(str::to_string),
            ports: collection
                .records()
                .map(|r| SnapshotPort {
                    owner: Some(r.owner().to_string()),
                    name: Some(r.name().to_string()),
                    direction: Some(r.direction().to_string()),
                    source_id: r.source_id().map(str::to_string),
                })
                .collect(),
        }
    }

    /// Rebuild a collection, validating every record.
    pub fn into_collection(self, options: &ParseOptions) -> Result<PortCollection, ParseError> {
        let mut builder = PortCollection::builder(self.label.clone());
        if let Some(scheme) = self.identity_scheme {
            builder = builder.identity_scheme(scheme);
        }
        for port in self.ports {
            let raw = RawPortRecord {
                owner: port.owner,
                name: port.name,
                direction: port.direction,
                source_id: port.source_id,
            };
            options.accept(&mut builder, raw, &self.label)?;
        }
        Ok(builder.build())
    }
}

/// Parser for JSON collection snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotParser {
    options: ParseOptions,
}

impl SnapshotParser {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: ParseOptions::strict(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }
}

impl PortParser for SnapshotParser {
    /// The label stored in the snapshot wins over the file name
    fn parse_str(&self, content: &str, label: &str) -> Result<PortCollection, ParseError> {
        let mut snapshot: PortSnapshot = serde_json::from_str(content)?;
        if snapshot.label.trim().is_empty() {
            snapshot.label = label.to_string();
        }
        snapshot.into_collection(&self.options)
    }

    fn format_name(&self) -> &str {
        "JSON collection snapshot"
    }
}
