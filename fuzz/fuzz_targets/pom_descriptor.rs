#![no_main]

use libfuzzer_sys::fuzz_target;
use mkbom_builder::types::{BomIdentity, Coordinate};
use mkbom_builder::{aggregate, parse_descriptor, render, xml};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let Ok(coordinate) = parse_descriptor(content, "fuzz/input.pom", Some("fuzz-1")) else {
            return;
        };

        // 추출된 값이 무엇이든 출력 문서는 다시 읽을 수 있어야 한다
        let identity = BomIdentity {
            coordinate: Coordinate::new("fuzz", "bom", "1"),
            name: None,
        };
        let doc = aggregate(&identity, &[coordinate]);
        let rendered = render(&doc).expect("render must not fail on parsed coordinates");
        xml::parse(&rendered).expect("rendered BOM must be well-formed");
    }
});
