//! Comment skipping.
//!
//! Comments carry no token of their own; the lexer discards them entirely
//! (source preservation is explicitly out of scope).

use crate::cursor::Cursor;

pub enum CommentSkip {
    /// No comment opener found at the cursor.
    None,
    /// A comment was consumed; the caller should re-check for whitespace and
    /// further comments before scanning the next real token.
    Skipped,
}

/// If the cursor sits at `//` or `/*`, consumes the whole comment and
/// returns `Skipped`; otherwise leaves the cursor untouched.
///
/// A line comment ends at the newline (not consumed) or at EOF. A block
/// comment ends at `*/`; an unterminated block comment silently runs to
/// EOF rather than raising a diagnostic.
pub fn try_skip_comment(cursor: &mut Cursor<'_>) -> CommentSkip {
    if cursor.current_char() != '/' {
        return CommentSkip::None;
    }
    match cursor.peek_char() {
        '/' => {
            cursor.advance_n(2);
            while !cursor.is_at_end() && cursor.current_char() != '\n' {
                cursor.advance();
            }
            CommentSkip::Skipped
        }
        '*' => {
            cursor.advance_n(2);
            while !cursor.is_at_end() {
                if cursor.current_char() == '*' && cursor.peek_char() == '/' {
                    cursor.advance_n(2);
                    break;
                }
                cursor.advance();
            }
            CommentSkip::Skipped
        }
        _ => CommentSkip::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comment_stops_before_newline() {
        let mut cursor = Cursor::new("// hi\nx");
        assert!(matches!(try_skip_comment(&mut cursor), CommentSkip::Skipped));
        assert_eq!(cursor.current_char(), '\n');
    }

    #[test]
    fn block_comment_consumes_closer() {
        let mut cursor = Cursor::new("/* hi */x");
        assert!(matches!(try_skip_comment(&mut cursor), CommentSkip::Skipped));
        assert_eq!(cursor.current_char(), 'x');
    }

    #[test]
    fn unterminated_block_comment_runs_to_eof() {
        let mut cursor = Cursor::new("/* never closes");
        assert!(matches!(try_skip_comment(&mut cursor), CommentSkip::Skipped));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn bare_slash_is_not_a_comment() {
        let mut cursor = Cursor::new("/x");
        assert!(matches!(try_skip_comment(&mut cursor), CommentSkip::None));
        assert_eq!(cursor.current_char(), '/');
    }
}
