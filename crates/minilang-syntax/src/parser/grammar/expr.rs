//! Arithmetic expressions.
//!
//! ```text
//! EXPR        := TERM TERM_TAIL
//! TERM_TAIL   := AddOp TERM TERM_TAIL | ε
//! TERM        := FACTOR FACTOR_TAIL
//! FACTOR_TAIL := MultOp FACTOR FACTOR_TAIL | ε
//! FACTOR      := '(' EXPR ')' | Number | Identifier
//! ```
//!
//! Left recursion is replaced by the tail rules. A tail either consumes an
//! operator before recursing or stops on ε, so it always terminates on a
//! finite stream.

use crate::parser::sink::NodeHandle;
use crate::parser::{ParseResult, Parser};
use crate::syntax_kind::NonTerminal;
use crate::token_kind::TokenKind;

pub(super) fn expr(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::Expr);

    term(p, node)?;
    term_tail(p, node)
}

fn term_tail(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::TermTail);

    match p.current() {
        TokenKind::AddOp => {
            p.expect(node, TokenKind::AddOp)?;
            term(p, node)?;
            term_tail(p, node)
        }
        _ => {
            p.empty(node);
            Ok(())
        }
    }
}

fn term(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::Term);

    factor(p, node)?;
    factor_tail(p, node)
}

fn factor_tail(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::FactorTail);

    match p.current() {
        TokenKind::MultOp => {
            p.expect(node, TokenKind::MultOp)?;
            factor(p, node)?;
            factor_tail(p, node)
        }
        _ => {
            p.empty(node);
            Ok(())
        }
    }
}

fn factor(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::Factor);

    match p.current() {
        TokenKind::LParen => {
            p.expect(node, TokenKind::LParen)?;
            expr(p, node)?;
            p.expect(node, TokenKind::RParen)
        }
        TokenKind::Number => p.expect(node, TokenKind::Number),
        // Default alternative, same policy as STMT's `while`.
        TokenKind::Identifier
        | TokenKind::Empty
        | TokenKind::EndOfStream
        | TokenKind::Equal
        | TokenKind::Read
        | TokenKind::Write
        | TokenKind::AddOp
        | TokenKind::MultOp
        | TokenKind::RParen
        | TokenKind::If
        | TokenKind::Then
        | TokenKind::Fi
        | TokenKind::While
        | TokenKind::Do
        | TokenKind::Od
        | TokenKind::Relation => p.expect(node, TokenKind::Identifier),
    }
}
