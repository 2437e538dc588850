#![no_main]
use libfuzzer_sys::fuzz_target;
use swc_port_tools::parsers::{ParseOptions, PortParser, SnapshotParser};

// Any snapshot that parses must diff cleanly against itself.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = SnapshotParser::new().with_options(ParseOptions::lenient());
        if let Ok(collection) = parser.parse_str(s, "fuzz.json") {
            let report = swc_port_tools::diff::diff(&collection, &collection)
                .expect("self-diff must succeed");
            assert!(!report.has_changes());
        }
    }
});
