use std::fmt;

use crate::ast::{Command, EnvironMarker, Line, Operator, Package, Requirement, VersionConstraint};
use crate::token::{Span, Token, TokenKind};

/// Classifies a parser error.
///
/// `found: None` means the source line ended early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// Line is neither a package, an option, nor a lone URL.
    ExpectedLine { found: String },
    /// Expected a package, extra, marker, or option name.
    ExpectedIdentifier { found: Option<String> },
    /// Expected `]` closing the extras list.
    ExpectedCloseBracket { found: Option<String> },
    /// Expected a URL after `@`.
    ExpectedDownloadUrl { found: Option<String> },
    /// Expected a comparison operator.
    ExpectedOperator { found: Option<String> },
    /// Expected a version after a comparison operator.
    ExpectedVersion { found: Option<String> },
    /// Expected a quoted marker value.
    ExpectedQuotedString { found: Option<String> },
    /// Line continues past a complete entry.
    ExpectedEndOfLine { found: String },
}

impl SyntaxErrorKind {
    /// The grammar alternatives a line may start with.
    pub const LINE_ALTERNATIVES: [&'static str; 3] = ["package", "option", "download URL"];
}

fn write_expected(f: &mut fmt::Formatter<'_>, what: &str, found: Option<&str>) -> fmt::Result {
    match found {
        Some(t) => write!(f, "expected {what}, got '{t}'"),
        None => write!(f, "expected {what}, got end of line"),
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedLine { found } => {
                let alternatives = Self::LINE_ALTERNATIVES.join(" or ");
                write!(f, "expected {alternatives}, got '{found}'")
            }
            Self::ExpectedIdentifier { found } => write_expected(f, "name", found.as_deref()),
            Self::ExpectedCloseBracket { found } => write_expected(f, "']'", found.as_deref()),
            Self::ExpectedDownloadUrl { found } => {
                write_expected(f, "download URL", found.as_deref())
            }
            Self::ExpectedOperator { found } => {
                write_expected(f, "comparison operator", found.as_deref())
            }
            Self::ExpectedVersion { found } => write_expected(f, "version", found.as_deref()),
            Self::ExpectedQuotedString { found } => {
                write_expected(f, "quoted string", found.as_deref())
            }
            Self::ExpectedEndOfLine { found } => {
                write!(f, "expected end of line, got '{found}'")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

/// Parse an elided token stream into a `Requirement`.
///
/// Whitespace and comment tokens must already be removed with
/// [`crate::lexer::elide`]; any left in the stream are rejected.
///
/// Each source line yields one `Line`. A quoted string that spans
/// a newline is the exception: its line continues onto the next.
///
/// # Errors
///
/// Returns `SyntaxError` for the first line that matches no
/// grammar alternative. Nothing is returned for the other lines.
pub fn parse(tokens: &[Token]) -> Result<Requirement, SyntaxError> {
    Parser::new(tokens).parse()
}

/// Maximum number of tokens inspected before committing to an
/// alternative.
const LOOKAHEAD: usize = 2;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// One past the last token of the current source line.
    end: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            end: 0,
        }
    }

    fn parse(mut self) -> Result<Requirement, SyntaxError> {
        let mut lines = Vec::new();

        while self.pos < self.tokens.len() {
            self.end = self.line_end();
            let line = self.parse_line()?;
            self.expect_end_of_line()?;
            log::trace!("parsed line {}: {line:?}", self.tokens[self.end - 1].span.line);
            lines.push(line);
        }

        log::debug!("parsed {} requirement lines", lines.len());
        Ok(Requirement { lines })
    }

    /// Find where the source line starting at `pos` ends. A token
    /// belongs to the line if it starts where the previous one ended.
    fn line_end(&self) -> usize {
        let mut end = self.pos + 1;
        while end < self.tokens.len()
            && self.tokens[end].span.line == self.tokens[end - 1].end_line()
        {
            end += 1;
        }
        end
    }

    fn parse_line(&mut self) -> Result<Line, SyntaxError> {
        let tokens = self.tokens;
        let first = &tokens[self.pos];
        let second = self.peek_nth(1);

        match (first.kind, second.map(|t| t.kind)) {
            (TokenKind::Identifier, _) => Ok(Line::Package(self.parse_package()?)),
            (TokenKind::CommandMarker, Some(TokenKind::Identifier)) => {
                Ok(Line::Command(self.parse_command()))
            }
            (TokenKind::DownloadUrl, _) => {
                self.pos += 1;
                Ok(Line::BareDownload(first.text.clone()))
            }
            _ => Err(SyntaxError {
                kind: SyntaxErrorKind::ExpectedLine {
                    found: first.text.clone(),
                },
                span: first.span.clone(),
            }),
        }
    }

    /// Parse `-name [arg]` or `--name [arg]`. The caller has seen
    /// the marker followed by an identifier.
    fn parse_command(&mut self) -> Command {
        let tokens = self.tokens;
        let marker = &tokens[self.pos];
        let name = tokens[self.pos + 1].text.clone();
        self.pos += 2;

        let argument = match self.peek() {
            Some(token)
                if matches!(token.kind, TokenKind::Identifier | TokenKind::DownloadUrl) =>
            {
                self.pos += 1;
                Some(token.text.clone())
            }
            _ => None,
        };

        if marker.text == "--" {
            Command::LongOption { name, argument }
        } else {
            Command::ShortOption { name, argument }
        }
    }

    fn parse_package(&mut self) -> Result<Package, SyntaxError> {
        let name = self.expect_identifier()?;

        let extras = if self.eat_punct('[') {
            self.parse_extras()?
        } else {
            Vec::new()
        };

        let download = if self.eat_punct('@') {
            let url = self.expect(TokenKind::DownloadUrl, |found| {
                SyntaxErrorKind::ExpectedDownloadUrl { found }
            })?;
            Some(url.text.clone())
        } else {
            None
        };

        let versions = if self.at(TokenKind::ComparisonOperator) {
            self.parse_versions()?
        } else {
            Vec::new()
        };

        let environs = if self.eat_punct(';') {
            self.parse_environs()?
        } else {
            Vec::new()
        };

        Ok(Package {
            name,
            extras,
            download,
            versions,
            environs,
        })
    }

    /// Parse `a, b]` after the opening bracket.
    fn parse_extras(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut extras = vec![self.expect_identifier()?];
        while self.eat_punct(',') {
            extras.push(self.expect_identifier()?);
        }

        if !self.eat_punct(']') {
            return Err(self.error_here(|found| SyntaxErrorKind::ExpectedCloseBracket { found }));
        }
        Ok(extras)
    }

    fn parse_versions(&mut self) -> Result<Vec<VersionConstraint>, SyntaxError> {
        let mut versions = vec![self.parse_version()?];
        while self.eat_punct(',') {
            versions.push(self.parse_version()?);
        }
        Ok(versions)
    }

    fn parse_version(&mut self) -> Result<VersionConstraint, SyntaxError> {
        let operator = self.expect_operator()?;
        let value = self.expect(TokenKind::VersionLiteral, |found| {
            SyntaxErrorKind::ExpectedVersion { found }
        })?;
        Ok(VersionConstraint {
            operator,
            value: value.text.clone(),
        })
    }

    fn parse_environs(&mut self) -> Result<Vec<EnvironMarker>, SyntaxError> {
        let mut environs = vec![self.parse_environ()?];
        while self.eat_punct(',') {
            environs.push(self.parse_environ()?);
        }
        Ok(environs)
    }

    fn parse_environ(&mut self) -> Result<EnvironMarker, SyntaxError> {
        let name = self.expect_identifier()?;
        let operator = self.expect_operator()?;
        let value = self.expect(TokenKind::QuotedString, |found| {
            SyntaxErrorKind::ExpectedQuotedString { found }
        })?;
        Ok(EnvironMarker {
            name,
            operator,
            value: unquote(&value.text),
        })
    }

    fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        debug_assert!(n < LOOKAHEAD, "lookahead is bounded to {LOOKAHEAD} tokens");
        let tokens = self.tokens;
        let index = self.pos + n;
        if index < self.end {
            Some(&tokens[index])
        } else {
            None
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.peek_nth(0)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    fn eat_punct(&mut self, ch: char) -> bool {
        if self.peek().is_some_and(|token| token.is_punct(ch)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        error: impl FnOnce(Option<String>) -> SyntaxErrorKind,
    ) -> Result<&'a Token, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.error_here(error)),
        }
    }

    fn expect_identifier(&mut self) -> Result<String, SyntaxError> {
        let token = self.expect(TokenKind::Identifier, |found| {
            SyntaxErrorKind::ExpectedIdentifier { found }
        })?;
        Ok(token.text.clone())
    }

    fn expect_operator(&mut self) -> Result<Operator, SyntaxError> {
        let token = self.expect(TokenKind::ComparisonOperator, |found| {
            SyntaxErrorKind::ExpectedOperator { found }
        })?;
        token.text.parse::<Operator>().map_err(|_| SyntaxError {
            kind: SyntaxErrorKind::ExpectedOperator {
                found: Some(token.text.clone()),
            },
            span: token.span.clone(),
        })
    }

    fn expect_end_of_line(&mut self) -> Result<(), SyntaxError> {
        if let Some(token) = self.peek() {
            return Err(SyntaxError {
                kind: SyntaxErrorKind::ExpectedEndOfLine {
                    found: token.text.clone(),
                },
                span: token.span.clone(),
            });
        }
        self.pos = self.end;
        Ok(())
    }

    /// Build an error at the current token, or just past the line's
    /// last token when the line has run out.
    fn error_here(&self, kind: impl FnOnce(Option<String>) -> SyntaxErrorKind) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError {
                kind: kind(Some(token.text.clone())),
                span: token.span.clone(),
            },
            None => SyntaxError {
                kind: kind(None),
                span: self.end_of_line_span(),
            },
        }
    }

    fn end_of_line_span(&self) -> Span {
        let last = &self.tokens[self.end - 1];
        if last.end_line() == last.span.line {
            Span {
                line: last.span.line,
                column: last.span.column + last.text.chars().count(),
            }
        } else {
            last.span.clone()
        }
    }
}

/// Strip the quotes from a quoted-string token and resolve escapes.
/// Unknown escapes are kept as written.
fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix(['"', '\''])
        .and_then(|rest| rest.strip_suffix(['"', '\'']))
        .unwrap_or(text);

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some(c @ ('"' | '\'' | '\\')) => value.push(c),
            Some(c) => {
                value.push('\\');
                value.push(c);
            }
            None => value.push('\\'),
        }
    }
    value
}
