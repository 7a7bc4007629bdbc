//! Statement parsing: `let`, `return`, `break`, `continue`, `loop`, `while`,
//! `for`, `trigger`, `type`, and the expression-statement fallback. Also
//! owns block parsing ([`parse_block`]), shared with `expr.rs` for the
//! block/if/match/try with-block forms.

use homescript_util::diagnostic::{Diagnostic, DiagnosticCode};
use homescript_util::symbol::Symbol;

use crate::ast::*;
use crate::{expr, types, Parser};
use homescript_lex::TokenKind;

/// `{ statements* trailing_expr? }`.
///
/// The first parsed item that is an expression statement whose expression
/// did *not* consume a trailing `;` and sits immediately before the closing
/// `}` becomes the block's trailing expression; everything before it is a
/// plain statement.
pub(crate) fn parse_block(p: &mut Parser) -> Result<Block, Diagnostic> {
    let start = p.expect(TokenKind::LBrace)?.span;
    let mut stmts = Vec::new();
    let mut trailing = None;

    while !p.at(TokenKind::RBrace) && !p.at(TokenKind::Eof) {
        match parse_statement_or_trailing(p)? {
            StmtOrTrailing::Stmt(s) => stmts.push(s),
            StmtOrTrailing::Trailing(e) => {
                trailing = Some(Box::new(e));
                break;
            }
        }
    }

    let end = p.expect(TokenKind::RBrace)?;
    let span = start.until(end.span);
    Ok(Block { stmts, trailing, span })
}

enum StmtOrTrailing {
    Stmt(Stmt),
    Trailing(Expr),
}

/// Dispatches on the current token kind. Keyword-led statements always
/// produce a [`Stmt`]; everything else falls through to
/// [`parse_expression_statement`], which is the only production that can
/// yield a block's trailing expression.
fn parse_statement_or_trailing(p: &mut Parser) -> Result<StmtOrTrailing, Diagnostic> {
    match p.current.kind {
        TokenKind::Type => Ok(StmtOrTrailing::Stmt(parse_type_definition(p)?)),
        TokenKind::Let => Ok(StmtOrTrailing::Stmt(parse_let(p)?)),
        TokenKind::Return => Ok(StmtOrTrailing::Stmt(parse_return(p)?)),
        TokenKind::Break => Ok(StmtOrTrailing::Stmt(parse_break(p)?)),
        TokenKind::Continue => Ok(StmtOrTrailing::Stmt(parse_continue(p)?)),
        TokenKind::Loop => Ok(StmtOrTrailing::Stmt(parse_loop(p)?)),
        TokenKind::While => Ok(StmtOrTrailing::Stmt(parse_while(p)?)),
        TokenKind::For => Ok(StmtOrTrailing::Stmt(parse_for(p)?)),
        TokenKind::Trigger => Ok(StmtOrTrailing::Stmt(parse_trigger(p)?)),
        _ => parse_expression_statement(p),
    }
}

/// A statement is parsed the same way at top level and inside a block;
/// top-level callers (`items::parse_program`'s fallthrough is an error, not
/// a statement) never hit this, but `impl`/function bodies share it via
/// `parse_block`.
pub(crate) fn parse_statement(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    match parse_statement_or_trailing(p)? {
        StmtOrTrailing::Stmt(s) => Ok(s),
        StmtOrTrailing::Trailing(e) => {
            let span = e.span;
            Ok(Stmt::new(StmtKind::ExpressionStatement(e), span))
        }
    }
}

fn parse_type_definition(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::Type)?.span;
    let name_tok = p.expect(TokenKind::Identifier)?;
    p.expect(TokenKind::Assign)?;
    let ty = types::parse_type(p)?;
    let end = p.previous.span;
    p.expect_recoverable(TokenKind::Semicolon)?;
    let span = start.until(end);
    Ok(Stmt::new(
        StmtKind::TypeDefinition(TypeDefinition { name: Symbol::intern(&name_tok.value), ty }),
        span,
    ))
}

fn parse_let(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::Let)?.span;
    let name_tok = p.expect(TokenKind::Identifier)?;
    let ty = if p.at(TokenKind::Colon) {
        p.next()?;
        Some(types::parse_type(p)?)
    } else {
        None
    };
    p.expect(TokenKind::Assign)?;
    let (value, _) = expr::parse_expression(p, 0)?;
    let end = p.previous.span;
    p.expect_recoverable(TokenKind::Semicolon)?;
    let span = start.until(end);
    Ok(Stmt::new(StmtKind::Let(LetStmt { name: Symbol::intern(&name_tok.value), ty, value }), span))
}

fn parse_return(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::Return)?.span;
    let value = if matches!(p.current.kind, TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof) {
        None
    } else {
        let (e, _) = expr::parse_expression(p, 0)?;
        Some(e)
    };
    let end = p.previous.span;
    p.expect_recoverable(TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Return(value), start.until(end)))
}

fn parse_break(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::Break)?.span;
    p.expect_recoverable(TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Break, start))
}

fn parse_continue(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::Continue)?.span;
    p.expect_recoverable(TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Continue, start))
}

fn parse_loop(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::Loop)?.span;
    let body = parse_block(p)?;
    let span = start.until(body.span);
    Ok(Stmt::new(StmtKind::Loop(body), span))
}

fn parse_while(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::While)?.span;
    let (cond, _) = expr::parse_expression(p, 0)?;
    let body = parse_block(p)?;
    let span = start.until(body.span);
    Ok(Stmt::new(StmtKind::While(WhileStmt { cond, body }), span))
}

fn parse_for(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::For)?.span;
    let binding_tok = p.expect(TokenKind::Identifier)?;
    p.expect(TokenKind::In)?;
    let (iterable, _) = expr::parse_expression(p, 0)?;
    let body = parse_block(p)?;
    let span = start.until(body.span);
    Ok(Stmt::new(
        StmtKind::For(ForStmt { binding: Symbol::intern(&binding_tok.value), iterable, body }),
        span,
    ))
}

/// `trigger fnIdent (on|at|in) eventIdent(args) ;`
fn parse_trigger(p: &mut Parser) -> Result<Stmt, Diagnostic> {
    let start = p.expect(TokenKind::Trigger)?.span;
    let trigger_stmt = parse_trigger_body(p)?;
    let end = p.previous.span;
    p.expect_recoverable(TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Trigger(trigger_stmt), start.until(end)))
}

/// Shared by the statement form (`trigger fnIdent on eventIdent(args);`) and
/// the function-annotation form (`#[trigger on eventIdent(args)]`), which
/// differ only in whether a leading function identifier precedes the
/// connective.
pub(crate) fn parse_trigger_body(p: &mut Parser) -> Result<TriggerStmt, Diagnostic> {
    let fn_tok = p.expect(TokenKind::Identifier)?;
    let connective = parse_connective(p)?;
    let source_tok = p.expect(TokenKind::Identifier)?;
    let args = parse_call_args(p)?;
    Ok(TriggerStmt {
        fn_ident: Symbol::intern(&fn_tok.value),
        connective,
        source_ident: Symbol::intern(&source_tok.value),
        args,
    })
}

/// `on`/`at`/`in` are the three connectives; `on` collides with the
/// `true`/`on` boolean-literal alias in the keyword table, so it lexes as
/// [`TokenKind::True`], not an identifier — only `at` comes through as a
/// plain identifier.
pub(crate) fn parse_connective(p: &mut Parser) -> Result<TriggerConnective, Diagnostic> {
    match p.current.kind {
        TokenKind::In => {
            p.next()?;
            Ok(TriggerConnective::In)
        }
        TokenKind::True if p.current.value == "on" => {
            p.next()?;
            Ok(TriggerConnective::On)
        }
        TokenKind::Identifier if p.current.value == "at" => {
            p.next()?;
            Ok(TriggerConnective::At)
        }
        _ => Err(p.unexpected_token_error(&[TokenKind::In, TokenKind::True, TokenKind::Identifier])),
    }
}

pub(crate) fn parse_call_args(p: &mut Parser) -> Result<Vec<Expr>, Diagnostic> {
    p.expect(TokenKind::LParen)?;
    let mut args = Vec::new();
    while !p.at(TokenKind::RParen) {
        let (arg, _) = expr::parse_expression(p, 0)?;
        args.push(arg);
        if p.at(TokenKind::Comma) {
            p.next()?;
        } else {
            break;
        }
    }
    p.expect(TokenKind::RParen)?;
    Ok(args)
}

/// Parses an expression, then resolves the statement-terminator rule: a
/// with-block expression (block/if/match/try) may omit the trailing `;`;
/// any other expression either consumes one or — if it sits right before
/// the closing `}` of its enclosing block — becomes that block's trailing
/// expression.
fn parse_expression_statement(p: &mut Parser) -> Result<StmtOrTrailing, Diagnostic> {
    let (value, is_with_block) = expr::parse_expression(p, 0)?;

    if p.at(TokenKind::Semicolon) {
        p.next()?;
        let span = value.span;
        return Ok(StmtOrTrailing::Stmt(Stmt::new(StmtKind::ExpressionStatement(value), span)));
    }

    if p.at(TokenKind::RBrace) || p.at(TokenKind::Eof) {
        return Ok(StmtOrTrailing::Trailing(value));
    }

    if !is_with_block {
        p.soft_errors.push(
            Diagnostic::syntax_error("Missing semicolon after statemtent", value.span)
                .with_code(DiagnosticCode::E_PARSER_MISSING_TERMINATOR),
        );
    }
    let span = value.span;
    Ok(StmtOrTrailing::Stmt(Stmt::new(StmtKind::ExpressionStatement(value), span)))
}
