#![allow(dead_code)]

use requirements_txt::{Line, Package, Requirement, format, parse_str};

/// Parse `input` and return its only package line.
pub fn single_package(input: &str) -> Package {
    let req = parse_str(input)
        .unwrap_or_else(|e| panic!("parse failed: {e}\n--- input ---\n{input}"));
    assert_eq!(req.lines.len(), 1, "expected one line from {input:?}");
    match req.lines.into_iter().next() {
        Some(Line::Package(package)) => package,
        other => panic!("expected package line, got {other:?}"),
    }
}

/// Helper: format a document, parse it back, assert structural equality.
pub fn assert_roundtrip(original: &Requirement) {
    let formatted = format(original);
    let parsed = parse_str(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e}\n\
             --- formatted ---\n{formatted}"
        )
    });

    assert_eq!(
        original, &parsed,
        "round-trip mismatch\n--- formatted ---\n{formatted}"
    );
}
