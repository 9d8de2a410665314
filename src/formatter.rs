//! Serializes a `Requirement` back into canonical requirements.txt text.
//!
//! One line per entry, no comments or blank lines, and a trailing
//! newline after every entry.

use std::fmt::Write as _;

use crate::ast::{Command, EnvironMarker, Line, Package, Requirement, VersionConstraint};

/// Format a `Requirement` into requirements.txt text.
///
/// The output parses back to an equal `Requirement` as long as every
/// name, URL, and version is itself lexically valid.
#[must_use]
pub fn format(requirement: &Requirement) -> String {
    let mut out = String::new();
    for line in &requirement.lines {
        format_line(&mut out, line);
        out.push('\n');
    }
    out
}

fn format_line(out: &mut String, line: &Line) {
    match line {
        Line::Package(package) => format_package(out, package),
        Line::Command(command) => format_command(out, command),
        Line::BareDownload(url) => out.push_str(url),
    }
}

fn format_package(out: &mut String, package: &Package) {
    out.push_str(&package.name);

    if !package.extras.is_empty() {
        out.push('[');
        out.push_str(&package.extras.join(", "));
        out.push(']');
    }

    if let Some(url) = &package.download {
        out.push_str(" @ ");
        out.push_str(url);
    }

    // a URL ends at whitespace
    if !package.versions.is_empty() {
        out.push(' ');
        format_versions(out, &package.versions);
    }

    if !package.environs.is_empty() {
        out.push_str("; ");
        format_environs(out, &package.environs);
    }
}

fn format_versions(out: &mut String, versions: &[VersionConstraint]) {
    for (i, version) in versions.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(version.operator.as_str());
        out.push_str(&version.value);
    }
}

fn format_environs(out: &mut String, environs: &[EnvironMarker]) {
    for (i, environ) in environs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {} ", environ.name, environ.operator);
        push_quoted(out, &environ.value);
    }
}

fn format_command(out: &mut String, command: &Command) {
    let dashes = match command {
        Command::LongOption { .. } => "--",
        Command::ShortOption { .. } => "-",
    };
    out.push_str(dashes);
    out.push_str(command.name());
    if let Some(argument) = command.argument() {
        out.push(' ');
        out.push_str(argument);
    }
}

/// Write `value` in double quotes, escaping what the parser unescapes.
fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
