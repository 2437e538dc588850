//! Port source parsers.
//!
//! This module reads AUTOSAR port-mapping XML and previously exported JSON
//! collection snapshots into [`PortCollection`]s. Malformed records are
//! rejected here, before they reach the merge and diff engines.
//!
//! ## Usage
//!
//! ```no_run
//! use swc_port_tools::parsers::{parse_port_file_with, ParseOptions};
//! use std::path::Path;
//!
//! let ports = parse_port_file_with(Path::new("dids.xml"), &ParseOptions::lenient()).unwrap();
//! println!("{} ports in {} SWCs", ports.len(), ports.owners().len());
//! ```

mod autosar;
mod snapshot;
mod traits;

pub use autosar::AutosarXmlParser;
pub use snapshot::{PortSnapshot, SnapshotParser, SnapshotPort};
pub use traits::{source_label, ParseError, ParseOptions, PortParser};

use crate::model::PortCollection;
use std::path::Path;

/// Maximum port source file size (64 MB)
const MAX_PORT_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Parse a port source file in strict mode.
///
/// See [`parse_port_file_with`].
pub fn parse_port_file(path: &Path) -> Result<PortCollection, ParseError> {
    parse_port_file_with(path, &ParseOptions::strict())
}

/// Parse a port source file, choosing the parser by extension.
///
/// `.xml` files use the AUTOSAR port-mapping layout and `.json` files are
/// collection snapshots. The collection is labelled with the file name.
pub fn parse_port_file_with(
    path: &Path,
    options: &ParseOptions,
) -> Result<PortCollection, ParseError> {
    let parser = parser_for(path, options)?;

    let metadata = std::fs::metadata(path).map_err(|e| ParseError::IoError(e.to_string()))?;
    if metadata.len() > MAX_PORT_FILE_SIZE {
        return Err(ParseError::IoError(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_PORT_FILE_SIZE / (1024 * 1024),
        )));
    }

    tracing::debug!("Parsing {} as {}", path.display(), parser.format_name());
    parser.parse(path)
}

/// Parse AUTOSAR port-mapping XML from string content
pub fn parse_port_str(content: &str, label: &str) -> Result<PortCollection, ParseError> {
    AutosarXmlParser::new().parse_str(content, label)
}

fn parser_for(path: &Path, options: &ParseOptions) -> Result<Box<dyn PortParser>, ParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("xml") => Ok(Box::new(AutosarXmlParser::new().with_options(*options))),
        Some("json") => Ok(Box::new(SnapshotParser::new().with_options(*options))),
        _ => Err(ParseError::UnsupportedFileType(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = parse_port_file(Path::new("ports.xlsx")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFileType(_)));

        let err = parse_port_file(Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_port_file(Path::new("definitely/missing/ports.xml")).unwrap_err();
        assert!(matches!(err, ParseError::IoError(_)));
    }

    #[test]
    fn test_parse_port_str() {
        let xml = "<ROOT><ITEM><ID>1</ID><PORTS><PORT><NAME>A</NAME><SWC>Diag</SWC></PORT>\
                   </PORTS></ITEM></ROOT>";
        let collection = parse_port_str(xml, "inline").unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.label(), "inline");
    }

    #[test]
    fn test_source_label() {
        assert_eq!(source_label(Path::new("/tmp/xml/dids.xml")), "dids.xml");
    }
}
