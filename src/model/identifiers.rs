//! Identifiers for software components and their ports.
//!
//! A port's identity is the pair `(owner, name)`. Both parts are compared
//! exactly, byte for byte; no trimming or case folding is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque name of a software component (SWC).
///
/// Equality is exact string match and ordering is byte-wise lexicographic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwcIdentifier(String);

impl SwcIdentifier {
    /// Wrap a component name without normalization
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the raw component name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name after trimming and ASCII case folding.
    ///
    /// Only used to detect inputs that spell the same SWC differently.
    #[must_use]
    pub(crate) fn folded(&self) -> String {
        self.0.trim().to_ascii_lowercase()
    }
}

impl fmt::Display for SwcIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SwcIdentifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SwcIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SwcIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identity key of a port: the owning SWC and the port name.
///
/// Ordered by owner, then name. This is the order of every sorted view
/// and of diff output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortKey {
    pub owner: SwcIdentifier,
    pub name: String,
}

impl PortKey {
    pub fn new(owner: impl Into<SwcIdentifier>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for PortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Render an XML item ID for display.
///
/// Decimal IDs become upper-case hexadecimal, zero-padded to at least four
/// digits and prefixed with `0x` (`4049` becomes `0x0FD1`). IDs that are
/// not decimal numbers are returned verbatim.
#[must_use]
pub fn format_item_id(raw: &str) -> String {
    match raw.trim().parse::<u64>() {
        Ok(value) => format!("0x{value:04X}"),
        Err(_) => raw.to_string(),
    }
}
