//! Lexer edge cases and error tests.

use requirements_txt::{LexErrorKind, TokenKind, elide, tokenize};

fn kinds(input: &str) -> Vec<TokenKind> {
    elide(tokenize(input).expect("tokenize"))
        .iter()
        .map(|t| t.kind)
        .collect()
}

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    let tokens = tokenize("").expect("tokenize");
    assert!(tokens.is_empty());
}

#[test]
fn lex_only_whitespace() {
    let tokens = tokenize("   \t  \n\n  ").expect("tokenize");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Whitespace);
}

#[test]
fn lex_covers_whole_input() {
    let input = "numpy [all] >= 1.0 # note\n--no-binary\n";
    let tokens = tokenize(input).expect("tokenize");
    let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(rebuilt, input);
}

#[test]
fn lex_multiple_comments() {
    let tokens = tokenize("# comment 1\n# comment 2\n").expect("tokenize");
    let count = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .count();
    assert_eq!(count, 2);
    assert!(elide(tokens).is_empty());
}

#[test]
fn lex_full_package_line() {
    assert_eq!(
        kinds(r#"contourpy [bold, mega] >1.0.6, <=1.1.2; python_version >= "3.6" # c"#),
        vec![
            TokenKind::Identifier,
            TokenKind::Punctuation,
            TokenKind::Identifier,
            TokenKind::Punctuation,
            TokenKind::Identifier,
            TokenKind::Punctuation,
            TokenKind::ComparisonOperator,
            TokenKind::VersionLiteral,
            TokenKind::Punctuation,
            TokenKind::ComparisonOperator,
            TokenKind::VersionLiteral,
            TokenKind::Punctuation,
            TokenKind::Identifier,
            TokenKind::ComparisonOperator,
            TokenKind::QuotedString,
        ]
    );
}

// -----------------------------------------------------------
// Rule priority.
// -----------------------------------------------------------

#[test]
fn lex_url_is_one_token() {
    let url = "https://github.com/urllib3/urllib3/archive/refs/tags/1.26.8.zip";
    let tokens = tokenize(url).expect("tokenize");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::DownloadUrl);
    assert_eq!(tokens[0].text, url);
}

#[test]
fn lex_url_with_query() {
    let url = "https://example.com/pkg.tar.gz?sha=abc&x=1";
    let tokens = tokenize(url).expect("tokenize");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::DownloadUrl);
}

#[test]
fn lex_git_url_with_userinfo() {
    let tokens = tokenize("git+https://user@host.org/repo").expect("tokenize");
    // A scheme needs a colon right after its letters, so `git`
    // falls through to the identifier rule.
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "git");
    assert!(tokens[1].is_punct('+'));
    assert_eq!(tokens[2].kind, TokenKind::DownloadUrl);
}

#[test]
fn lex_fragment_keeps_only_listed_characters() {
    let tokens = tokenize("https://example.com/a.zip#egg").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::DownloadUrl);
    assert_eq!(tokens[0].text, "https://example.com/a.zip#");
    assert_eq!(tokens[1].text, "egg");
}

#[test]
fn lex_www_prefix_is_a_url() {
    // Anything starting with `www` and one more character reads as a host.
    let tokens = tokenize("wwwhat").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::DownloadUrl);
}

#[test]
fn lex_dashes_are_command_markers() {
    let tokens = tokenize("--pre -e").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::CommandMarker);
    assert_eq!(tokens[0].text, "--");
    assert_eq!(tokens[3].kind, TokenKind::CommandMarker);
    assert_eq!(tokens[3].text, "-");
}

#[test]
fn lex_identifier_keeps_inner_dashes_and_dots() {
    let tokens = tokenize("python-dateutil zope.interface").expect("tokenize");
    assert_eq!(tokens[0].text, "python-dateutil");
    assert_eq!(tokens[2].text, "zope.interface");
}

#[test]
fn lex_version_is_not_an_identifier() {
    let tokens = tokenize("==2022.6").expect("tokenize");
    assert_eq!(tokens[1].kind, TokenKind::VersionLiteral);
    assert_eq!(tokens[1].text, "2022.6");
}

#[test]
fn lex_prerelease_suffix_splits() {
    let tokens = tokenize("1.0rc1").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::VersionLiteral);
    assert_eq!(tokens[0].text, "1.0");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text, "rc1");
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn lex_error_unterminated_double_quote() {
    let err = tokenize("x; a == \"b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn lex_error_unterminated_single_quote() {
    let err = tokenize("x; a == 'b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn lex_error_line_continuation_is_rejected() {
    let err = tokenize("numpy \\\n>=1.0").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('\\'));
    assert_eq!(err.span.line, 1);
    assert_eq!(err.span.column, 7);
}

#[test]
fn lex_error_reports_first_position() {
    let err = tokenize("numpy\nscipy ^ $").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('^'));
    assert_eq!(err.span.line, 2);
    assert_eq!(err.span.column, 7);
}

#[test]
fn lex_columns_count_characters() {
    let tokens = tokenize("x; a == \"é\" \nb").expect("tokenize");
    let last = tokens.last().expect("token");
    assert_eq!(last.text, "b");
    assert_eq!(last.span.line, 2);
    assert_eq!(last.span.column, 1);
    let space = &tokens[tokens.len() - 2];
    assert_eq!(space.span.column, 12);
}

#[test]
fn display_error() {
    let err = tokenize("a == \"b").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unterminated quoted string"));
    assert!(msg.contains("line 1"));
    assert!(msg.contains("column 6"));
}
