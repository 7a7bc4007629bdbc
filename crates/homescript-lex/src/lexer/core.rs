//! The `Lexer` struct and its top-level dispatch.

use homescript_util::diagnostic::{Diagnostic, DiagnosticCode};
use homescript_util::span::{Location, Span};
use homescript_util::symbol::Symbol;

use crate::charclass::{is_digit, is_ident_start};
use crate::cursor::Cursor;
use crate::{Token, TokenKind};

use super::comment;
use super::identifier;
use super::number;
use super::operator;
use super::string;

/// Scans a source string into a stream of [`Token`]s, one at a time.
///
/// A `Lexer` is a stateful value object: it owns a [`Cursor`] over the
/// source text and the interned filename attached to every span it
/// produces. Callers (the parser) drive it with repeated calls to
/// [`Lexer::next_token`] until it returns [`TokenKind::Eof`].
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    filename: Symbol,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`, attributing every span it produces to
    /// `filename`.
    ///
    /// # Example
    ///
    /// ```
    /// use homescript_lex::Lexer;
    ///
    /// let mut lexer = Lexer::new("let x = 1;", "main.hms");
    /// let (_tok, diag) = lexer.next_token();
    /// assert!(diag.is_none());
    /// ```
    pub fn new(source: &'a str, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self { cursor: Cursor::new(source), filename: Symbol::intern(&filename) }
    }

    #[inline]
    pub fn filename(&self) -> Symbol {
        self.filename
    }

    fn span_from(&self, start: Location) -> Span {
        Span::new(start, self.cursor.location(), self.filename)
    }

    fn point_span(&self) -> Span {
        Span::point(self.cursor.location(), self.filename)
    }

    /// Scans and returns the next token.
    ///
    /// Skips whitespace and comments first. A lexer failure (illegal
    /// character, unterminated string) is always a hard error: the returned
    /// token still carries a best-effort span and kind ([`TokenKind::Unknown`]
    /// or the start of the malformed token) so the parser can keep a
    /// consistent cursor, but the caller must treat a `Some` diagnostic as
    /// fatal to the parse.
    pub fn next_token(&mut self) -> (Token, Option<Diagnostic>) {
        loop {
            self.cursor.skip_whitespace();
            match comment::try_skip_comment(&mut self.cursor) {
                comment::CommentSkip::None => break,
                comment::CommentSkip::Skipped => continue,
            }
        }

        let start = self.cursor.location();

        if self.cursor.is_at_end() {
            return (Token::new(TokenKind::Eof, "", self.point_span()), None);
        }

        let ch = self.cursor.current_char();

        if is_ident_start(ch) {
            return identifier::lex_identifier(&mut self.cursor, start, self.filename);
        }
        if is_digit(ch) {
            return number::lex_number(&mut self.cursor, start, self.filename);
        }
        if ch == '\'' || ch == '"' {
            return string::lex_string(&mut self.cursor, start, self.filename);
        }

        if let Some((kind, len)) = operator::match_operator(&self.cursor) {
            self.cursor.advance_n(len);
            let span = self.span_from(start);
            let text = operator::canonical_text(kind);
            return (Token::new(kind, text, span), None);
        }

        self.cursor.advance();
        let span = self.span_from(start);
        let diag = Diagnostic::syntax_error(format!("Unexpected character '{ch}'"), span)
            .with_code(DiagnosticCode::E_LEXER_UNEXPECTED_CHAR);
        (Token::new(TokenKind::Unknown, ch.to_string(), span), Some(diag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source, "t.hms");
        let mut out = Vec::new();
        loop {
            let (tok, diag) = lexer.next_token();
            assert!(diag.is_none(), "unexpected diagnostic for {source:?}: {diag:?}");
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn skips_whitespace_and_comments() {
        assert_eq!(
            kinds("  let // comment\n x /* block */ = 1;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn range_does_not_swallow_into_float() {
        assert_eq!(
            kinds("1..2"),
            vec![TokenKind::Int, TokenKind::DotDot, TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn unknown_character_is_hard_error() {
        let mut lexer = Lexer::new("`", "t.hms");
        let (tok, diag) = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Unknown);
        assert!(diag.is_some());
    }

    #[test]
    fn eof_is_a_point_span() {
        let mut lexer = Lexer::new("", "t.hms");
        let (tok, _) = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Eof);
        assert!(tok.span.is_point());
    }
}
