//! Port records and their payload comparison.

use super::{PortKey, SwcIdentifier};
use crate::error::MalformedRecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortDirection {
    /// Provider port (P-PORT)
    Provided,
    /// Requirer port (R-PORT)
    Required,
    /// Direction not declared in the source
    #[default]
    Unspecified,
}

impl PortDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Provided => "PROVIDED",
            Self::Required => "REQUIRED",
            Self::Unspecified => "UNSPECIFIED",
        }
    }

    /// Parse an optional direction value as found in a source document.
    ///
    /// Absent or blank text means [`PortDirection::Unspecified`].
    pub fn from_source(text: Option<&str>) -> Result<Self, String> {
        match text.map(str::trim) {
            None | Some("") => Ok(Self::Unspecified),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for PortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P-PORT" | "P" | "PROVIDED" | "PROVIDER" | "P-PORT-PROTOTYPE" => Ok(Self::Provided),
            "R-PORT" | "R" | "REQUIRED" | "REQUIRER" | "R-PORT-PROTOTYPE" => Ok(Self::Required),
            "UNSPECIFIED" => Ok(Self::Unspecified),
            _ => Err(format!("unknown port direction '{s}'")),
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive fields of a port as supplied by an extraction adapter.
///
/// Nothing here has been validated yet; see [`PortRecord::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawPortRecord {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub direction: Option<String>,
    pub source_id: Option<String>,
}

/// One declared port.
///
/// Identity is `(owner, name)`; `direction` and `source_id` are payload.
/// Deserialized records go through the same validation as [`PortRecord::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPortRecord")]
pub struct PortRecord {
    owner: SwcIdentifier,
    name: String,
    #[serde(default)]
    direction: PortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_id: Option<String>,
}

/// Payload fields compared between records sharing an identity
pub const PAYLOAD_FIELDS: [&str; 2] = ["direction", "source_id"];

impl PortRecord {
    /// Create a record with unspecified direction and no source ID.
    ///
    /// Fails if either part of the identity is empty or whitespace-only.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, MalformedRecordError> {
        let (owner, name) = validate_identity(Some(owner.into()), Some(name.into()), None)?;
        Ok(Self {
            owner: SwcIdentifier::new(owner),
            name,
            direction: PortDirection::Unspecified,
            source_id: None,
        })
    }

    /// Validate adapter-supplied fields and build a record.
    pub fn from_raw(raw: RawPortRecord) -> Result<Self, MalformedRecordError> {
        let RawPortRecord {
            owner,
            name,
            direction,
            source_id,
        } = raw;
        let (owner, name) = validate_identity(owner, name, source_id.as_deref())?;
        let direction = PortDirection::from_source(direction.as_deref()).map_err(|reason| {
            MalformedRecordError::new(Some(&owner), Some(&name), reason)
                .with_source_id(source_id.as_deref())
        })?;

        Ok(Self {
            owner: SwcIdentifier::new(owner),
            name,
            direction,
            source_id: source_id.filter(|id| !id.trim().is_empty()),
        })
    }

    /// Set the direction
    #[must_use]
    pub const fn with_direction(mut self, direction: PortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the originating item ID
    #[must_use]
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    #[must_use]
    pub const fn owner(&self) -> &SwcIdentifier {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn direction(&self) -> PortDirection {
        self.direction
    }

    #[must_use]
    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    /// The identity key shared by merge and diff
    #[must_use]
    pub fn key(&self) -> PortKey {
        PortKey {
            owner: self.owner.clone(),
            name: self.name.clone(),
        }
    }

    /// Value of a payload field by name, as text.
    #[must_use]
    pub fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "direction" => Some(self.direction.to_string()),
            "source_id" => self.source_id.clone(),
            _ => None,
        }
    }

    /// Compare the non-identity fields against another record.
    ///
    /// Fields are reported in the fixed order `direction`, `source_id`.
    #[must_use]
    pub fn payload_differences(&self, other: &Self) -> Vec<FieldChange> {
        PAYLOAD_FIELDS
            .iter()
            .filter_map(|field| {
                let old_value = self.field_value(field);
                let new_value = other.field_value(field);
                (old_value != new_value).then(|| FieldChange {
                    field: (*field).to_string(),
                    old_value,
                    new_value,
                })
            })
            .collect()
    }

    /// True if both records carry the same payload
    #[must_use]
    pub fn same_payload(&self, other: &Self) -> bool {
        self.direction == other.direction && self.source_id == other.source_id
    }
}

impl TryFrom<RawPortRecord> for PortRecord {
    type Error = MalformedRecordError;

    fn try_from(raw: RawPortRecord) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

fn validate_identity(
    owner: Option<String>,
    name: Option<String>,
    source_id: Option<&str>,
) -> Result<(String, String), MalformedRecordError> {
    match (owner, name) {
        (Some(owner), Some(name)) if !owner.trim().is_empty() && !name.trim().is_empty() => {
            Ok((owner, name))
        }
        (owner, name) => {
            let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
            let reason = match (blank(&owner), blank(&name)) {
                (true, true) => "owner and port name are empty",
                (true, false) => "owner is empty",
                _ => "port name is empty",
            };
            Err(MalformedRecordError::new(owner.as_deref(), name.as_deref(), reason)
                .with_source_id(source_id))
        }
    }
}

/// One changed payload attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}
