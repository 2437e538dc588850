//! Parser for AUTOSAR SWC port-mapping XML.
//!
//! Expected layout (the root element name is not checked):
//!
//! ```xml
//! <SWC-PORT-MAPPING identity-scheme="swc-name/port-name">
//!   <ITEM>
//!     <ID>4049</ID>
//!     <PORTS>
//!       <PORT>
//!         <NAME>DataServices_DID_F190</NAME>
//!         <SWC>Diag</SWC>
//!         <DIRECTION>P-PORT</DIRECTION>
//!       </PORT>
//!     </PORTS>
//!   </ITEM>
//! </SWC-PORT-MAPPING>
//! ```
//!
//! Unknown siblings may sit between `ITEM`s, and an item may carry more than
//! one `PORTS` block. Decimal item IDs are rendered as `0x`-prefixed
//! hexadecimal.

use super::{ParseError, ParseOptions, PortParser};
use crate::model::{format_item_id, PortCollection, RawPortRecord};
use serde::Deserialize;

/// AUTOSAR port-mapping XML parser
#[derive(Debug, Clone, Copy, Default)]
pub struct AutosarXmlParser {
    options: ParseOptions,
}

impl AutosarXmlParser {
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

impl PortParser for AutosarXmlParser {
    fn parse_str(&self, content: &str, label: &str) -> Result<PortCollection, ParseError> {
        let mapping: XmlMapping =
            quick_xml::de::from_str(content).map_err(|e| ParseError::XmlError(e.to_string()))?;

        let mut builder = PortCollection::builder(label);
        if let Some(scheme) = mapping.identity_scheme {
            builder = builder.identity_scheme(scheme);
        }

        let mut skipped = 0usize;
        for item in mapping.items {
            let source_id = item
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(format_item_id);
            for port in item.ports.into_iter().flat_map(|block| block.ports) {
                let raw = RawPortRecord {
                    owner: port.swc,
                    name: port.name,
                    direction: port.direction,
                    source_id: source_id.clone(),
                };
                if !self.options.accept(&mut builder, raw, label)? {
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("{label}: {skipped} malformed port records skipped");
        }
        Ok(builder.build())
    }

    fn format_name(&self) -> &str {
        "AUTOSAR port-mapping XML"
    }
}

// XML structures

#[derive(Debug, Deserialize)]
struct XmlMapping {
    #[serde(rename = "@identity-scheme", default)]
    identity_scheme: Option<String>,
    #[serde(rename = "ITEM", default)]
    items: Vec<XmlItem>,
}

#[derive(Debug, Deserialize)]
struct XmlItem {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "PORTS", default)]
    ports: Vec<XmlPorts>,
}

#[derive(Debug, Deserialize)]
struct XmlPorts {
    #[serde(rename = "PORT", default)]
    ports: Vec<XmlPort>,
}

#[derive(Debug, Deserialize)]
struct XmlPort {
    #[serde(rename = "NAME", default)]
    name: Option<String>,
    #[serde(rename = "SWC", default)]
    swc: Option<String>,
    #[serde(rename = "DIRECTION", default)]
    direction: Option<String>,
}
