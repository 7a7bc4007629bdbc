//! Character-class predicates used throughout the lexer.
//!
//! Homescript identifiers are ASCII-only (`[A-Za-z_][A-Za-z0-9_]*`), so these
//! predicates don't consult Unicode categories the way a general-purpose
//! language's lexer would — they're plain byte-range checks, kept here so
//! the cursor and token scanners don't repeat the ranges inline.
//!
//! # Examples
//!
//! ```
//! use homescript_lex::charclass::{is_ident_start, is_ident_continue};
//!
//! assert!(is_ident_start('_'));
//! assert!(is_ident_start('a'));
//! assert!(!is_ident_start('1'));
//! assert!(is_ident_continue('9'));
//! ```

/// Valid first character of an identifier: `[A-Za-z_]`.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Valid continuation character of an identifier: `[A-Za-z0-9_]`.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// A decimal digit, `0-9`.
#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// A hexadecimal digit, `0-9a-fA-F`.
#[inline]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// An octal digit, `0-7`.
#[inline]
pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}

/// Whitespace the lexer skips between tokens: space, tab, CR, LF.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
