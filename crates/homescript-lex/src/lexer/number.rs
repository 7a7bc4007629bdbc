//! Number literal lexing.
//!
//! The lexeme is preserved verbatim (underscores included); the parser
//! strips underscores when it turns the literal into an `i64`/`f64`.

use homescript_util::diagnostic::Diagnostic;
use homescript_util::span::{Location, Span};
use homescript_util::symbol::Symbol;

use crate::charclass::is_digit;
use crate::cursor::Cursor;
use crate::{Token, TokenKind};

fn consume_digits(cursor: &mut Cursor<'_>) {
    while is_digit(cursor.current_char()) || cursor.current_char() == '_' {
        cursor.advance();
    }
}

/// Scans a numeric literal starting at a decimal digit.
///
/// `.` only upgrades the literal to a float when followed by a digit — this
/// is what keeps `1..2` tokenising as `Int, DotDot, Int` rather than
/// swallowing the first `.` into a float.
pub fn lex_number(
    cursor: &mut Cursor<'_>,
    start: Location,
    filename: Symbol,
) -> (Token, Option<Diagnostic>) {
    let start_byte = cursor.position();
    consume_digits(cursor);

    let mut is_float = false;
    if cursor.current_char() == '.' && is_digit(cursor.peek_char()) {
        is_float = true;
        cursor.advance();
        consume_digits(cursor);
    }
    if cursor.current_char() == 'f' {
        is_float = true;
        cursor.advance();
    }

    let lexeme = &cursor.source_str()[start_byte..cursor.position()];
    let span = Span::new(start, cursor.location(), filename);
    let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
    (Token::new(kind, lexeme, span), None)
}
