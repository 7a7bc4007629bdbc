//! Identifier and keyword lexing.

use homescript_util::diagnostic::Diagnostic;
use homescript_util::span::{Location, Span};
use homescript_util::symbol::Symbol;

use crate::charclass::is_ident_continue;
use crate::cursor::Cursor;
use crate::{Token, TokenKind};

/// Scans `[A-Za-z_][A-Za-z0-9_]*` starting at the cursor (which must sit on
/// a valid identifier-start character) and classifies it as a keyword, a
/// bare `_` ([`TokenKind::Underscore`]), or a plain identifier.
pub fn lex_identifier(
    cursor: &mut Cursor<'_>,
    start: Location,
    filename: Symbol,
) -> (Token, Option<Diagnostic>) {
    let start_byte = cursor.position();
    while is_ident_continue(cursor.current_char()) {
        cursor.advance();
    }
    let lexeme = &cursor_source(cursor)[start_byte..cursor.position()];
    let span = Span::new(start, cursor.location(), filename);

    if lexeme == "_" {
        return (Token::new(TokenKind::Underscore, lexeme, span), None);
    }
    if let Some(kind) = TokenKind::keyword(lexeme) {
        return (Token::new(kind, lexeme, span), None);
    }
    (Token::new(TokenKind::Identifier, lexeme, span), None)
}

/// Exposes the cursor's underlying source for slicing the scanned lexeme.
/// `Cursor` keeps `source` private; this helper mirrors the accessor the
/// other lexer submodules need in the same way.
fn cursor_source<'a>(cursor: &Cursor<'a>) -> &'a str {
    cursor.source_str()
}
