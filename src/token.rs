/// Source location for error reporting. Both fields are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer, listed in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Comment (`# ...`).
    Comment,
    /// Option prefix `--` or `-`.
    CommandMarker,
    /// URL such as `https://example.com/pkg.zip`.
    DownloadUrl,
    /// Package, extra, marker, or option name.
    Identifier,
    /// One of `==`, `!=`, `~=`, `>=`, `>`, `<=`, `<`.
    ComparisonOperator,
    /// Version number such as `1.0.6` or `2.*`.
    VersionLiteral,
    /// Single- or double-quoted string, quotes included.
    QuotedString,
    /// Single punctuation character (`[`, `]`, `,`, `;`, `@`, ...).
    Punctuation,
    /// Spaces, tabs, and newlines.
    Whitespace,
}

impl TokenKind {
    /// Whether the kind is dropped before parsing.
    #[must_use]
    pub const fn is_elided(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }
}

/// A single token with its kind, matched text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Whether this is a punctuation token with the given character.
    #[must_use]
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punctuation && self.text.chars().eq(std::iter::once(ch))
    }

    /// Line on which the token's last character sits.
    ///
    /// Only quoted strings can span lines.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.span.line + self.text.matches('\n').count()
    }
}
