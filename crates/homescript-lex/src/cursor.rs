//! Character cursor for traversing source text.
//!
//! `Cursor` owns the rune buffer for the duration of a lex: it tracks a byte
//! position plus the running [`Location`] (line/column) and exposes
//! lookahead by character offset. ASCII source (the overwhelming majority of
//! Homescript programs) is indexed directly into the byte string; only when
//! a non-ASCII byte is seen does lookahead fall back to `char_indices`.

use homescript_util::span::Location;

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    loc: Location,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor positioned at the start of `source`.
    ///
    /// # Example
    ///
    /// ```
    /// use homescript_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("let x = 42;");
    /// assert_eq!(cursor.current_char(), 'l');
    /// ```
    pub fn new(source: &'a str) -> Self {
        Self { source, position: 0, loc: Location::START }
    }

    /// The current byte offset into the source.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The full source text, for slicing out a lexeme once its end byte
    /// offset is known.
    #[inline]
    pub fn source_str(&self) -> &'a str {
        self.source
    }

    /// The location of the current character (not yet consumed).
    #[inline]
    pub fn location(&self) -> Location {
        self.loc
    }

    /// The character at the current position, or `'\0'` at end of input.
    ///
    /// # Example
    ///
    /// ```
    /// use homescript_lex::cursor::Cursor;
    ///
    /// let cursor = Cursor::new("abc");
    /// assert_eq!(cursor.current_char(), 'a');
    /// ```
    #[inline]
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// The character `offset` positions ahead of the current one (`0` is
    /// [`Self::current_char`]), or `'\0'` past the end of input.
    pub fn char_at(&self, offset: usize) -> char {
        let bytes = self.source.as_bytes();
        if offset == 0 {
            return match bytes.get(self.position) {
                None => '\0',
                Some(&b) if b.is_ascii() => b as char,
                Some(_) => self.source[self.position..].chars().next().unwrap_or('\0'),
            };
        }
        self.source[self.position..].chars().nth(offset).unwrap_or('\0')
    }

    /// Equivalent to `char_at(1)`, the one-character lookahead used by most
    /// multi-character operator checks.
    #[inline]
    pub fn peek_char(&self) -> char {
        self.char_at(1)
    }

    /// Consumes and returns the current character, advancing the cursor.
    ///
    /// # Example
    ///
    /// ```
    /// use homescript_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("ab");
    /// assert_eq!(cursor.advance(), 'a');
    /// assert_eq!(cursor.current_char(), 'b');
    /// ```
    pub fn advance(&mut self) -> char {
        let ch = self.current_char();
        if ch != '\0' {
            self.position += ch.len_utf8();
            self.loc = self.loc.advance(ch);
        }
        ch
    }

    /// Advances past `count` characters, stopping early at end of input.
    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// `true` once the cursor has consumed the entire source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Consumes and returns `true` if the current character is `expected`;
    /// otherwise leaves the cursor untouched and returns `false`.
    ///
    /// # Example
    ///
    /// ```
    /// use homescript_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new("==");
    /// assert!(cursor.match_char('='));
    /// assert!(cursor.match_char('='));
    /// assert!(cursor.is_at_end());
    /// ```
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace (space, tab, CR, LF) between tokens.
    pub fn skip_whitespace(&mut self) {
        use crate::charclass::is_whitespace;
        while is_whitespace(self.current_char()) {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_line_and_column() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_n(3);
        assert_eq!(cursor.location().line, 2);
        assert_eq!(cursor.location().column, 1);
    }

    #[test]
    fn char_at_handles_unicode_without_panicking() {
        let cursor = Cursor::new("\"héllo\"");
        assert_eq!(cursor.char_at(2), 'é');
    }

    #[test]
    fn match_char_only_advances_on_match() {
        let mut cursor = Cursor::new("=x");
        assert!(!cursor.match_char('x'));
        assert!(cursor.match_char('='));
        assert_eq!(cursor.current_char(), 'x');
    }

    #[test]
    fn is_at_end_true_past_last_char() {
        let mut cursor = Cursor::new("a");
        assert!(!cursor.is_at_end());
        cursor.advance();
        assert!(cursor.is_at_end());
    }
}
