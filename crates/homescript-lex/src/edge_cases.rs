//! Regression tests for lexer edge cases called out directly in the token
//! rules: the `1..2` vs float-upgrade ambiguity, keyword aliasing, and the
//! escape-sequence corner cases.

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenKind};

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source, "edge.hms");
        let mut out = Vec::new();
        loop {
            let (tok, _) = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn range_after_int_does_not_become_float() {
        assert_eq!(
            kinds("1..2"),
            vec![TokenKind::Int, TokenKind::DotDot, TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn inclusive_range_is_dotdot_then_assign() {
        assert_eq!(
            kinds("0..=10"),
            vec![
                TokenKind::Int,
                TokenKind::DotDot,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn chained_range_tokenises_two_dotdots() {
        assert_eq!(
            kinds("x..y..z"),
            vec![
                TokenKind::Identifier,
                TokenKind::DotDot,
                TokenKind::Identifier,
                TokenKind::DotDot,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn member_operators_are_distinct_tokens() {
        assert_eq!(
            kinds("a.b->c~>d"),
            vec![
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::TildeArrow,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn singleton_and_annotation_prefixes() {
        assert_eq!(
            kinds("$Light @deprecated"),
            vec![
                TokenKind::Dollar,
                TokenKind::Identifier,
                TokenKind::At,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_assignment_operators() {
        assert_eq!(
            kinds("a **= 2"),
            vec![
                TokenKind::Identifier,
                TokenKind::StarStarEq,
                TokenKind::Int,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn underscore_vs_identifier_starting_with_underscore() {
        assert_eq!(kinds("_"), vec![TokenKind::Underscore, TokenKind::Eof]);
        assert_eq!(kinds("_foo"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn trigger_and_templ_are_keywords() {
        assert_eq!(kinds("trigger"), vec![TokenKind::Trigger, TokenKind::Eof]);
        assert_eq!(kinds("templ"), vec![TokenKind::Templ, TokenKind::Eof]);
    }
}
