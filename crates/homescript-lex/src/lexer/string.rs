//! String literal lexing.
//!
//! Strings are delimited by `'` or `"` (the closing delimiter must match the
//! opener) and decoded eagerly: `Token::value` holds the decoded text, with
//! escapes already resolved and the surrounding quotes stripped.

use homescript_util::diagnostic::{Diagnostic, DiagnosticCode};
use homescript_util::span::{Location, Span};
use homescript_util::symbol::Symbol;

use crate::charclass::is_octal_digit;
use crate::cursor::Cursor;
use crate::{Token, TokenKind};

/// Scans a string literal starting at the opening quote (`'` or `"`).
///
/// An unterminated string (EOF reached before the closing quote) is a hard
/// error: `"String literal never closed"`, spanned from the opening quote to
/// EOF.
pub fn lex_string(
    cursor: &mut Cursor<'_>,
    start: Location,
    filename: Symbol,
) -> (Token, Option<Diagnostic>) {
    let quote = cursor.advance();
    let mut value = String::new();

    loop {
        if cursor.is_at_end() {
            let span = Span::new(start, cursor.location(), filename);
            let diag = Diagnostic::syntax_error("String literal never closed", span)
                .with_code(DiagnosticCode::E_LEXER_UNTERMINATED_STRING);
            return (Token::new(TokenKind::String, value, span), Some(diag));
        }
        let ch = cursor.current_char();
        if ch == quote {
            cursor.advance();
            break;
        }
        if ch == '\\' {
            cursor.advance();
            match decode_escape(cursor) {
                Some(decoded) => value.push(decoded),
                None => {
                    let span = Span::new(start, cursor.location(), filename);
                    let diag = Diagnostic::syntax_error("String literal never closed", span)
                        .with_code(DiagnosticCode::E_LEXER_UNTERMINATED_STRING);
                    return (Token::new(TokenKind::String, value, span), Some(diag));
                }
            }
            continue;
        }
        value.push(ch);
        cursor.advance();
    }

    let span = Span::new(start, cursor.location(), filename);
    (Token::new(TokenKind::String, value, span), None)
}

/// Decodes the escape body immediately after a consumed `\`. Returns `None`
/// only when EOF cuts the escape short (treated by the caller as part of an
/// unterminated string).
fn decode_escape(cursor: &mut Cursor<'_>) -> Option<char> {
    if cursor.is_at_end() {
        return None;
    }
    let ch = cursor.advance();
    match ch {
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        'b' => Some('\u{8}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'x' => read_hex_escape(cursor, 2),
        'u' => read_hex_escape(cursor, 4),
        'U' => read_hex_escape(cursor, 8),
        c if is_octal_digit(c) => read_octal_escape(cursor, c),
        other => Some(other),
    }
}

fn read_hex_escape(cursor: &mut Cursor<'_>, digits: usize) -> Option<char> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        if cursor.is_at_end() {
            return None;
        }
        let d = cursor.advance().to_digit(16)?;
        value = value.checked_mul(16)?.checked_add(d)?;
    }
    char::from_u32(value)
}

/// Reads an octal escape. The leading digit has already been consumed
/// (passed in as `first`); one more octal digit is read, for two total —
/// preserving the lexer's observed (if ambiguous) behavior rather than
/// guessing at a three-digit octal escape.
fn read_octal_escape(cursor: &mut Cursor<'_>, first: char) -> Option<char> {
    let mut value = first.to_digit(8).unwrap();
    if is_octal_digit(cursor.current_char()) {
        let d = cursor.advance().to_digit(8).unwrap();
        value = value * 8 + d;
    }
    char::from_u32(value)
}
