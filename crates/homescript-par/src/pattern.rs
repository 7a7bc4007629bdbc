//! Match-arm pattern parsing.
//!
//! A pattern is `_` (the default), or a literal optionally wrapped in one of
//! the prefix operators (`!`, `-`, `?`) — restricted to literals, not full
//! expressions, so a pattern can never itself contain a call or a block.

use homescript_lex::TokenKind;
use homescript_util::diagnostic::Diagnostic;

use crate::ast::{Pattern, PatternLiteral, PrefixOp};
use crate::{expr, Parser};

pub(crate) fn parse_pattern(p: &mut Parser) -> Result<Pattern, Diagnostic> {
    if p.at(TokenKind::Underscore) {
        p.next()?;
        return Ok(Pattern::Default);
    }

    let prefix = match p.current.kind {
        TokenKind::Bang => {
            p.next()?;
            Some(PrefixOp::Not)
        }
        TokenKind::Minus => {
            p.next()?;
            Some(PrefixOp::Neg)
        }
        TokenKind::Question => {
            p.next()?;
            Some(PrefixOp::Try)
        }
        _ => None,
    };

    let value = expr::parse_literal(p)?;
    Ok(Pattern::Literal(PatternLiteral { prefix, value: Box::new(value) }))
}

/// One or more patterns joined by `|`.
pub(crate) fn parse_pattern_list(p: &mut Parser) -> Result<Vec<Pattern>, Diagnostic> {
    let mut patterns = vec![parse_pattern(p)?];
    while p.at(TokenKind::Pipe) {
        p.next()?;
        patterns.push(parse_pattern(p)?);
    }
    Ok(patterns)
}
