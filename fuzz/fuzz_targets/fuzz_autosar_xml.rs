#![no_main]
use libfuzzer_sys::fuzz_target;
use swc_port_tools::parsers::{AutosarXmlParser, ParseOptions, PortParser};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the port-mapping XML parser in strict and lenient mode.
///
/// Input is also wrapped in an ITEM/PORTS envelope so that mutations reach
/// record validation rather than failing at the root element.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let strict = AutosarXmlParser::new();
        let lenient = AutosarXmlParser::new().with_options(ParseOptions::lenient());

        let _ = strict.parse_str(s, "fuzz.xml");
        let _ = lenient.parse_str(s, "fuzz.xml");

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!("<ROOT><ITEM><ID>1</ID><PORTS>{s}</PORTS></ITEM></ROOT>");
            if let Ok(collection) = lenient.parse_str(&wrapped, "fuzz.xml") {
                let _ = collection.sorted_records();
            }
        }
    }
});
