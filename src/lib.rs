//! pip requirements.txt lexer, parser, formatter, and builder.
//!
//! A typed document model for the requirements.txt format: package
//! specifiers with extras, version bounds, environment markers and
//! direct URLs, pip option lines, and bare download URLs.
//!
//! # Quick start
//!
//! ## Parse a requirements file
//!
//! ```
//! use requirements_txt::{Line, parse_str};
//!
//! let input = "numpy[all] >=1.23.5, <2; python_version >= \"3.9\"\n-r dev.txt\n";
//! let requirement = parse_str(input).unwrap();
//! assert_eq!(requirement.lines.len(), 2);
//! assert!(matches!(requirement.lines[0], Line::Package(_)));
//!
//! let names: Vec<_> = requirement.package_names().collect();
//! assert_eq!(names, vec!["numpy"]);
//! ```
//!
//! ## Build and format
//!
//! ```
//! use requirements_txt::{Command, Operator, Package, Requirement, format};
//!
//! let requirement = Requirement::new()
//!     .command(Command::long("no-binary"))
//!     .package(Package::new("scipy").version(Operator::Equal, "1.9.3"));
//!
//! assert_eq!(format(&requirement), "--no-binary\nscipy ==1.9.3\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod deps;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{
    Command, EnvironMarker, Line, Operator, Package, Requirement, UnknownOperator,
    VersionConstraint,
};
pub use deps::PackageNames;
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, elide, tokenize};
pub use parser::{SyntaxError, SyntaxErrorKind, parse};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// Location of the offending input.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Lex(e) => &e.span,
            Self::Syntax(e) => &e.span,
        }
    }
}

/// Tokenize, elide, and parse requirements.txt source in one step.
pub fn parse_str(input: &str) -> Result<Requirement, Error> {
    let tokens = elide(tokenize(input)?);
    Ok(parse(&tokens)?)
}
