use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Quote that is never closed.
    UnterminatedString,
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated quoted string")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch}")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Token patterns in priority order. At every position the first
/// pattern that matches wins, even when a later one would match more.
const RULE_PATTERNS: [(TokenKind, &str); 9] = [
    (TokenKind::Comment, r"#.*"),
    (TokenKind::CommandMarker, r"--|-"),
    (
        TokenKind::DownloadUrl,
        concat!(
            r"(?:[A-Za-z]{3,9}:(?://)?(?:[-;:&=+$,A-Za-z0-9_]+@)?[A-Za-z0-9.-]+",
            r"|(?:www.|[-;:&=+$,A-Za-z0-9_]+@)[A-Za-z0-9.-]+)",
            r"(?:(?:/[+~%/.A-Za-z0-9_-]*)?\??[-+=&%@.A-Za-z0-9_]*#?[.!/\\w]*)?",
        ),
    ),
    (TokenKind::Identifier, r"[A-Za-z_][A-Za-z0-9_.-]*"),
    (TokenKind::ComparisonOperator, r"==|!=|~=|>=|>|<=|<"),
    (TokenKind::VersionLiteral, r"[0-9.*]+"),
    (
        TokenKind::QuotedString,
        r#"'(?:\\(?s:.)|[^'\\])*'|"(?:\\(?s:.)|[^"\\])*""#,
    ),
    (TokenKind::Punctuation, r"\[|\]|[-!()+*=,;@]"),
    (TokenKind::Whitespace, r"[ \t\n\r\x0C]+"),
];

struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    RULE_PATTERNS
        .iter()
        .map(|&(kind, pattern)| Rule {
            kind,
            // patterns are compile-time constants
            pattern: Regex::new(&format!(r"\A(?:{pattern})")).expect("token pattern is valid"),
        })
        .collect()
});

/// Tokenize requirements.txt source into a sequence of tokens.
///
/// The result covers the whole input, whitespace and comments
/// included. Pass it through [`elide`] before parsing.
///
/// # Errors
///
/// Returns `LexError` at the first position no rule matches.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(input).tokenize()?;
    log::debug!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
    Ok(tokens)
}

/// Drop whitespace and comment tokens, keeping the rest in order.
#[must_use]
pub fn elide(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !token.kind.is_elided())
        .collect()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.strip_prefix('\u{FEFF}').unwrap_or(input),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            let Some((kind, len)) = match_rule(rest) else {
                return Err(self.unmatched(rest));
            };

            let text = &rest[..len];
            tokens.push(Token {
                kind,
                text: text.to_string(),
                span: self.span(),
            });
            self.advance(text);
        }

        Ok(tokens)
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos += text.len();
    }

    fn unmatched(&self, rest: &str) -> LexError {
        let kind = match rest.chars().next() {
            Some('"' | '\'') => LexErrorKind::UnterminatedString,
            Some(ch) => LexErrorKind::UnexpectedCharacter(ch),
            None => LexErrorKind::UnexpectedCharacter('\0'),
        };
        LexError {
            kind,
            span: self.span(),
        }
    }
}

/// Find the first rule matching at the start of `rest`.
fn match_rule(rest: &str) -> Option<(TokenKind, usize)> {
    RULES.iter().find_map(|rule| {
        rule.pattern
            .find(rest)
            .filter(|m| !m.is_empty())
            .map(|m| (rule.kind, m.end()))
    })
}
