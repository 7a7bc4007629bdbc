//! Type grammar: `hmsType := '$' ident | '_' | ident | '[' hmsType ']'
//! | '?' hmsType | '{' ('?' | field (',' field)* ','?) '}'
//! | 'fn' '(' tparams? ')' ('->' hmsType)?`

use homescript_lex::TokenKind;
use homescript_util::diagnostic::Diagnostic;
use homescript_util::span::Span;
use homescript_util::symbol::Symbol;

use crate::ast::{ObjectType, ObjectTypeField, Type, TypeKind};
use crate::Parser;

pub(crate) fn parse_type(p: &mut Parser) -> Result<Type, Diagnostic> {
    let start = p.current.span;

    match p.current.kind {
        TokenKind::Dollar => {
            p.next()?;
            let name_tok = p.expect(TokenKind::Identifier)?;
            let span = start.until(name_tok.span);
            Ok(Type::new(TypeKind::SingletonReference(Symbol::intern(&name_tok.value)), span))
        }
        TokenKind::Underscore | TokenKind::Null | TokenKind::Identifier => {
            let tok = p.current.clone();
            p.next()?;
            Ok(Type::new(TypeKind::NameReference(Symbol::intern(&tok.value)), tok.span))
        }
        TokenKind::LBracket => {
            p.next()?;
            let inner = parse_type(p)?;
            let end = p.expect(TokenKind::RBracket)?;
            let span = start.until(end.span);
            Ok(Type::new(TypeKind::List(Box::new(inner)), span))
        }
        TokenKind::Question => {
            p.next()?;
            let inner = parse_type(p)?;
            let span = start.until(inner.span);
            Ok(Type::new(TypeKind::Option(Box::new(inner)), span))
        }
        TokenKind::LBrace => parse_object_type(p, start),
        TokenKind::Fn => parse_function_type(p, start),
        _ => Err(p.unexpected_token_error(&[
            TokenKind::Dollar,
            TokenKind::Identifier,
            TokenKind::LBracket,
            TokenKind::Question,
            TokenKind::LBrace,
            TokenKind::Fn,
        ])),
    }
}

fn parse_object_type(p: &mut Parser, start: Span) -> Result<Type, Diagnostic> {
    p.expect(TokenKind::LBrace)?;
    if p.at(TokenKind::Question) {
        p.next()?;
        let end = p.expect(TokenKind::RBrace)?;
        return Ok(Type::new(TypeKind::Object(ObjectType::Any), start.until(end.span)));
    }

    let mut fields = Vec::new();
    while !p.at(TokenKind::RBrace) {
        let name_tok = p.expect(TokenKind::Identifier)?;
        p.expect(TokenKind::Colon)?;
        let ty = parse_type(p)?;
        fields.push(ObjectTypeField { name: Symbol::intern(&name_tok.value), ty });
        if p.at(TokenKind::Comma) {
            p.next()?;
        } else {
            break;
        }
    }
    let end = p.expect(TokenKind::RBrace)?;
    Ok(Type::new(TypeKind::Object(ObjectType::Fields(fields)), start.until(end.span)))
}

fn parse_function_type(p: &mut Parser, start: Span) -> Result<Type, Diagnostic> {
    p.expect(TokenKind::Fn)?;
    p.expect(TokenKind::LParen)?;
    let mut params = Vec::new();
    while !p.at(TokenKind::RParen) {
        params.push(parse_type(p)?);
        if p.at(TokenKind::Comma) {
            p.next()?;
        } else {
            break;
        }
    }
    let rparen = p.expect(TokenKind::RParen)?;
    let (return_type, end_span) = if p.at(TokenKind::Arrow) {
        p.next()?;
        let ret = parse_type(p)?;
        let span = ret.span;
        (ret, span)
    } else {
        let implicit = Type::new(TypeKind::NameReference(Symbol::intern("null")), rparen.span);
        let span = implicit.span;
        (implicit, span)
    };
    Ok(Type::new(TypeKind::Function(params, Box::new(return_type)), start.until(end_span)))
}
