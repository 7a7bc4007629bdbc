//! Top-level item parsing: imports, singleton type definitions, impl blocks,
//! function annotations, and the `[pub|event] (type|let|fn)` top-level forms.
//!
//! [`parse_program`] is the sole entry point, called once by [`crate::parse`]
//! and looping until EOF.

use homescript_util::diagnostic::{Diagnostic, DiagnosticCode};
use homescript_util::span::Span;
use homescript_util::symbol::Symbol;

use crate::ast::*;
use crate::{stmt, types, Parser};
use homescript_lex::TokenKind;

const BUILTIN_TYPE_NAMES: &[&str] = &["null", "int", "float", "bool", "str", "range"];

pub(crate) fn parse_program(p: &mut Parser) -> Result<Program, Diagnostic> {
    let filename = p.filename;
    let mut program = Program::new(filename);

    while !p.at(TokenKind::Eof) {
        match p.current.kind {
            TokenKind::Import => {
                let item = parse_import(p)?;
                program.imports.push(item);
            }
            TokenKind::Dollar => {
                let item = parse_singleton_type_definition(p)?;
                program.singletons.push(item);
            }
            TokenKind::Impl => {
                let item = parse_impl_block(p)?;
                program.impl_blocks.push(item);
            }
            TokenKind::Hash => {
                let annotations = parse_annotation_list(p)?;
                let modifier = parse_leading_modifier(p)?;
                let func = parse_function_definition(p, modifier, annotations)?;
                program.functions.push(func);
            }
            TokenKind::Pub | TokenKind::Event => {
                let modifier = parse_leading_modifier(p)?;
                parse_modified_top_level(p, modifier, &mut program)?;
            }
            TokenKind::Type => {
                let item = parse_type_item(p)?;
                program.types.push(item);
            }
            TokenKind::Let => {
                let item = parse_let_item(p)?;
                program.globals.push(item);
            }
            TokenKind::Fn => {
                let func = parse_function_definition(p, FnModifier::None, Vec::new())?;
                program.functions.push(func);
            }
            _ => {
                return Err(Diagnostic::syntax_error(
                    "Expected one of {import, type, pub, event, let, fn, $}",
                    p.current.span,
                )
                .with_code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN));
            }
        }
    }

    Ok(program)
}

/// Consumes a leading `pub` or `event` keyword, if present; bare items carry
/// [`FnModifier::None`].
fn parse_leading_modifier(p: &mut Parser) -> Result<FnModifier, Diagnostic> {
    match p.current.kind {
        TokenKind::Pub => {
            p.next()?;
            Ok(FnModifier::Pub)
        }
        TokenKind::Event => {
            p.next()?;
            Ok(FnModifier::Event)
        }
        _ => Ok(FnModifier::None),
    }
}

/// After consuming `pub`/`event`, one of `type`, `let`, or `fn` must follow.
/// The modifier is only meaningful on a function definition; a modified
/// `type`/`let` is accepted (the modifier is part of the surface grammar
/// the host's resolver consumes) but the AST nodes for those two forms carry
/// no modifier field of their own.
fn parse_modified_top_level(
    p: &mut Parser,
    modifier: FnModifier,
    program: &mut Program,
) -> Result<(), Diagnostic> {
    match p.current.kind {
        TokenKind::Type => program.types.push(parse_type_item(p)?),
        TokenKind::Let => program.globals.push(parse_let_item(p)?),
        TokenKind::Fn => program.functions.push(parse_function_definition(p, modifier, Vec::new())?),
        _ => {
            return Err(p.unexpected_token_error(&[TokenKind::Type, TokenKind::Let, TokenKind::Fn]));
        }
    }
    Ok(())
}

fn parse_type_item(p: &mut Parser) -> Result<TypeDefinition, Diagnostic> {
    p.expect(TokenKind::Type)?;
    let name_tok = p.expect(TokenKind::Identifier)?;
    let name = Symbol::intern(&name_tok.value);
    if BUILTIN_TYPE_NAMES.contains(&name_tok.value.as_str()) {
        p.soft_errors.push(
            Diagnostic::syntax_error(
                format!("Cannot redeclare builtin type '{}'", name_tok.value),
                name_tok.span,
            )
            .with_code(DiagnosticCode::E_PARSER_REDECLARED_BUILTIN),
        );
    }
    p.expect(TokenKind::Assign)?;
    let ty = types::parse_type(p)?;
    p.expect_recoverable(TokenKind::Semicolon)?;
    Ok(TypeDefinition { name, ty })
}

fn parse_let_item(p: &mut Parser) -> Result<LetStmt, Diagnostic> {
    p.expect(TokenKind::Let)?;
    let name_tok = p.expect(TokenKind::Identifier)?;
    let ty = if p.at(TokenKind::Colon) {
        p.next()?;
        Some(types::parse_type(p)?)
    } else {
        None
    };
    p.expect(TokenKind::Assign)?;
    let (value, _) = crate::expr::parse_expression(p, 0)?;
    p.expect_recoverable(TokenKind::Semicolon)?;
    Ok(LetStmt { name: Symbol::intern(&name_tok.value), ty, value })
}

/// `import (kind? ident | '{' (kind? ident (',' kind? ident)* ','? )? '}') 'from' ident ';'`
fn parse_import(p: &mut Parser) -> Result<ImportItem, Diagnostic> {
    let start = p.expect(TokenKind::Import)?.span;

    let items = if p.at(TokenKind::LBrace) {
        p.next()?;
        let mut specs = Vec::new();
        while !p.at(TokenKind::RBrace) {
            specs.push(parse_import_spec(p)?);
            if p.at(TokenKind::Comma) {
                p.next()?;
            } else {
                break;
            }
        }
        p.expect(TokenKind::RBrace)?;
        specs
    } else {
        vec![parse_import_spec(p)?]
    };

    p.expect(TokenKind::From)?;
    let from_tok = p.expect(TokenKind::Identifier)?;
    let end = p.previous.span;
    p.expect_recoverable(TokenKind::Semicolon)?;

    Ok(ImportItem { items, from: Symbol::intern(&from_tok.value), span: start.until(end) })
}

fn parse_import_spec(p: &mut Parser) -> Result<ImportSpec, Diagnostic> {
    let kind = match p.current.kind {
        TokenKind::Type => {
            p.next()?;
            Some(ImportKind::Type)
        }
        TokenKind::Templ => {
            p.next()?;
            Some(ImportKind::Templ)
        }
        TokenKind::Trigger => {
            p.next()?;
            Some(ImportKind::Trigger)
        }
        _ => None,
    };
    let name_tok = p.expect(TokenKind::Identifier)?;
    Ok(ImportSpec { kind, name: Symbol::intern(&name_tok.value) })
}

/// `$Name = T ;`
fn parse_singleton_type_definition(p: &mut Parser) -> Result<SingletonTypeDefinition, Diagnostic> {
    let start = p.expect(TokenKind::Dollar)?.span;
    let name_tok = p.expect(TokenKind::Identifier)?;
    p.expect(TokenKind::Assign)?;
    let ty = types::parse_type(p)?;
    let end = p.previous.span;
    p.expect_recoverable(TokenKind::Semicolon)?;
    Ok(SingletonTypeDefinition { name: Symbol::intern(&name_tok.value), ty, span: start.until(end) })
}

/// `impl Template? (with '{' cap (',' cap)* ','? '}')? for '$' Name '{' fn* '}'`
fn parse_impl_block(p: &mut Parser) -> Result<ImplBlock, Diagnostic> {
    let start = p.expect(TokenKind::Impl)?.span;

    let template = if p.at(TokenKind::Identifier) {
        let tok = p.current.clone();
        p.next()?;
        Some(Symbol::intern(&tok.value))
    } else {
        None
    };

    let mut capabilities = Vec::new();
    if p.at(TokenKind::With) {
        p.next()?;
        p.expect(TokenKind::LBrace)?;
        while !p.at(TokenKind::RBrace) {
            let cap_tok = p.expect(TokenKind::Identifier)?;
            capabilities.push(Symbol::intern(&cap_tok.value));
            if p.at(TokenKind::Comma) {
                p.next()?;
            } else {
                break;
            }
        }
        p.expect(TokenKind::RBrace)?;
    }

    p.expect(TokenKind::For)?;
    p.expect(TokenKind::Dollar)?;
    let singleton_tok = p.expect(TokenKind::Identifier)?;
    let singleton = Symbol::intern(&singleton_tok.value);

    p.expect(TokenKind::LBrace)?;
    let mut methods = Vec::new();
    while !p.at(TokenKind::RBrace) {
        let annotations = if p.at(TokenKind::Hash) { parse_annotation_list(p)? } else { Vec::new() };
        let modifier = parse_leading_modifier(p)?;
        if !p.at(TokenKind::Fn) {
            let diag = p.unexpected_token_error(&[TokenKind::Fn]);
            p.soft_errors.push(diag);
            p.next()?;
            continue;
        }
        methods.push(parse_function_definition(p, modifier, annotations)?);
    }
    let end = p.expect(TokenKind::RBrace)?;

    Ok(ImplBlock { template, capabilities, singleton, methods, span: start.until(end.span) })
}

/// `#[ item (',' item)* ','? ]`, where an item is an identifier or
/// `trigger <connective> <source_ident>(args)`.
fn parse_annotation_list(p: &mut Parser) -> Result<Vec<AnnotationItem>, Diagnostic> {
    p.expect(TokenKind::Hash)?;
    p.expect(TokenKind::LBracket)?;
    let mut items = Vec::new();
    while !p.at(TokenKind::RBracket) {
        items.push(parse_annotation_item(p)?);
        if p.at(TokenKind::Comma) {
            p.next()?;
        } else {
            break;
        }
    }
    p.expect(TokenKind::RBracket)?;
    Ok(items)
}

fn parse_annotation_item(p: &mut Parser) -> Result<AnnotationItem, Diagnostic> {
    if p.at(TokenKind::Trigger) {
        p.next()?;
        let connective = stmt::parse_connective(p)?;
        let source_tok = p.expect(TokenKind::Identifier)?;
        let args = stmt::parse_call_args(p)?;
        return Ok(AnnotationItem::Trigger(AnnotationTrigger {
            connective,
            source_ident: Symbol::intern(&source_tok.value),
            args,
        }));
    }
    let tok = p.expect(TokenKind::Identifier)?;
    Ok(AnnotationItem::Ident(Symbol::intern(&tok.value)))
}

/// `fn ident '(' params? ')' ('->' hmsType)? block`
pub(crate) fn parse_function_definition(
    p: &mut Parser,
    modifier: FnModifier,
    annotations: Vec<AnnotationItem>,
) -> Result<FunctionDefinition, Diagnostic> {
    let start = p.expect(TokenKind::Fn)?.span;
    let name_tok = p.expect(TokenKind::Identifier)?;
    let params = parse_params(p)?;

    let rparen_span = p.previous.span;
    let return_type = if p.at(TokenKind::Arrow) {
        p.next()?;
        types::parse_type(p)?
    } else {
        Type::new(TypeKind::NameReference(Symbol::intern("null")), rparen_span)
    };

    let body = stmt::parse_block(p)?;
    let span = start.until(body.span);

    Ok(FunctionDefinition {
        modifier,
        name: Symbol::intern(&name_tok.value),
        params,
        return_type,
        body,
        annotations,
        span,
    })
}

fn parse_params(p: &mut Parser) -> Result<Vec<Param>, Diagnostic> {
    p.expect(TokenKind::LParen)?;
    let mut params = Vec::new();
    while !p.at(TokenKind::RParen) {
        let name_tok = p.expect(TokenKind::Identifier)?;
        let mut span: Span = name_tok.span;
        let ty = if p.at(TokenKind::Colon) {
            p.next()?;
            let t = types::parse_type(p)?;
            span = span.until(t.span);
            Some(t)
        } else {
            None
        };
        params.push(Param { name: Symbol::intern(&name_tok.value), ty, span });
        if p.at(TokenKind::Comma) {
            p.next()?;
        } else {
            break;
        }
    }
    p.expect(TokenKind::RParen)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Program, Vec<Diagnostic>) {
        let (program, soft_errors, hard_error) = crate::parse(source, "t.hms");
        assert!(hard_error.is_none(), "unexpected hard error: {hard_error:?}");
        (program, soft_errors)
    }

    #[test]
    fn bare_fn_definition() {
        let (program, errs) = parse("fn f(a: int, b: int) -> int { a + b }");
        assert!(errs.is_empty());
        assert_eq!(program.functions.len(), 1);
        let f = &program.functions[0];
        assert_eq!(f.params.len(), 2);
        assert!(matches!(f.return_type.kind, TypeKind::NameReference(_)));
        assert!(matches!(f.modifier, FnModifier::None));
    }

    #[test]
    fn fn_without_return_type_defaults_to_null() {
        let (program, errs) = parse("fn f() { }");
        assert!(errs.is_empty());
        match &program.functions[0].return_type.kind {
            TypeKind::NameReference(s) => assert_eq!(s.as_str(), "null"),
            other => panic!("expected null name reference, got {other:?}"),
        }
    }

    #[test]
    fn pub_fn_definition() {
        let (program, errs) = parse("pub fn f() { }");
        assert!(errs.is_empty());
        assert!(matches!(program.functions[0].modifier, FnModifier::Pub));
    }

    #[test]
    fn event_fn_definition() {
        let (program, errs) = parse("event fn f() { }");
        assert!(errs.is_empty());
        assert!(matches!(program.functions[0].modifier, FnModifier::Event));
    }

    #[test]
    fn top_level_let_and_type() {
        let (program, errs) = parse("let x = 1; type Temp = float;");
        assert!(errs.is_empty());
        assert_eq!(program.globals.len(), 1);
        assert_eq!(program.types.len(), 1);
    }

    #[test]
    fn redeclaring_builtin_type_is_a_soft_error() {
        let (_program, errs) = parse("type int = float;");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("Cannot redeclare builtin type"));
    }

    #[test]
    fn singleton_type_definition() {
        let (program, errs) = parse("$Light = { on: bool };");
        assert!(errs.is_empty());
        assert_eq!(program.singletons.len(), 1);
        assert_eq!(program.singletons[0].name.as_str(), "Light");
    }

    #[test]
    fn import_single_item() {
        let (program, errs) = parse("import turnOn from lights;");
        assert!(errs.is_empty());
        assert_eq!(program.imports[0].items.len(), 1);
        assert_eq!(program.imports[0].from.as_str(), "lights");
    }

    #[test]
    fn import_braced_list_with_kinds() {
        let (program, errs) = parse("import { type Light, templ Dimmable, turnOn } from lights;");
        assert!(errs.is_empty());
        let items = &program.imports[0].items;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind, Some(ImportKind::Type));
        assert_eq!(items[1].kind, Some(ImportKind::Templ));
        assert_eq!(items[2].kind, None);
    }

    #[test]
    fn impl_block_with_template_and_capabilities() {
        let (program, errs) =
            parse("impl Dimmable with { brightness, power } for $Light { fn on() { } }");
        assert!(errs.is_empty());
        let block = &program.impl_blocks[0];
        assert_eq!(block.template, Some(Symbol::intern("Dimmable")));
        assert_eq!(block.capabilities.len(), 2);
        assert_eq!(block.singleton.as_str(), "Light");
        assert_eq!(block.methods.len(), 1);
    }

    #[test]
    fn impl_block_without_template() {
        let (program, errs) = parse("impl for $Light { fn on() { } }");
        assert!(errs.is_empty());
        assert!(program.impl_blocks[0].template.is_none());
    }

    #[test]
    fn function_annotation_attaches_to_following_fn() {
        let (program, errs) = parse("#[deprecated]\nfn f() { }");
        assert!(errs.is_empty());
        assert_eq!(program.functions[0].annotations.len(), 1);
        assert!(matches!(program.functions[0].annotations[0], AnnotationItem::Ident(_)));
    }

    #[test]
    fn function_annotation_trigger_form() {
        let (program, errs) = parse("#[trigger on motion(\"hall\")]\npub fn f() { }");
        assert!(errs.is_empty());
        match &program.functions[0].annotations[0] {
            AnnotationItem::Trigger(t) => {
                assert_eq!(t.connective, TriggerConnective::On);
                assert_eq!(t.source_ident.as_str(), "motion");
                assert_eq!(t.args.len(), 1);
            }
            other => panic!("expected trigger annotation, got {other:?}"),
        }
        assert!(matches!(program.functions[0].modifier, FnModifier::Pub));
    }

    #[test]
    fn unexpected_top_level_token_is_a_hard_error() {
        let (_program, _errs, hard_error) = crate::parse("123", "t.hms");
        assert!(hard_error.is_some());
    }
}
