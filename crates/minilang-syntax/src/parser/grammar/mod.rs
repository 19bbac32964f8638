//! # Grammar Rules
//!
//! One procedure per nonterminal. The grammar, with ε as the empty
//! production:
//!
//! ```text
//! PROGRAM     := STMT_LIST EndOfStream
//! STMT_LIST   := STMT STMT_LIST | ε
//! STMT        := Identifier ':=' EXPR
//!              | 'read' Identifier
//!              | 'write' EXPR
//!              | 'if' CONDITION 'then' STMT_LIST 'fi'
//!              | 'while' CONDITION 'do' STMT_LIST 'od'
//! CONDITION   := EXPR Relation EXPR
//! ```
//!
//! Expression rules live in [`expr`].
//!
//! Each procedure records its node first, then dispatches with a `match`
//! over the lookahead kind. Every arm is spelled out so adding a token kind
//! forces a decision in every rule.

mod expr;

use super::{ParseResult, Parser};
use crate::parser::sink::NodeHandle;
use crate::syntax_kind::NonTerminal;
use crate::token_kind::TokenKind;

/// Start rule.
pub(super) fn program(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::Program);

    stmt_list(p, node)?;
    p.expect(node, TokenKind::EndOfStream)
}

fn stmt_list(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::StmtList);

    match p.current() {
        TokenKind::Identifier
        | TokenKind::If
        | TokenKind::Read
        | TokenKind::While
        | TokenKind::Write => {
            stmt(p, node)?;
            stmt_list(p, node)
        }
        TokenKind::Number
        | TokenKind::Empty
        | TokenKind::EndOfStream
        | TokenKind::Equal
        | TokenKind::AddOp
        | TokenKind::MultOp
        | TokenKind::LParen
        | TokenKind::RParen
        | TokenKind::Then
        | TokenKind::Fi
        | TokenKind::Do
        | TokenKind::Od
        | TokenKind::Relation => {
            p.empty(node);
            Ok(())
        }
    }
}

fn stmt(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::Stmt);

    match p.current() {
        TokenKind::Identifier => {
            p.expect(node, TokenKind::Identifier)?;
            p.expect(node, TokenKind::Equal)?;
            expr::expr(p, node)
        }
        TokenKind::Read => {
            p.expect(node, TokenKind::Read)?;
            p.expect(node, TokenKind::Identifier)
        }
        TokenKind::Write => {
            p.expect(node, TokenKind::Write)?;
            expr::expr(p, node)
        }
        TokenKind::If => {
            p.expect(node, TokenKind::If)?;
            condition(p, node)?;
            p.expect(node, TokenKind::Then)?;
            stmt_list(p, node)?;
            p.expect(node, TokenKind::Fi)
        }
        // Default alternative: anything else is taken to be `while`, and a
        // wrong guess fails on the `while` keyword itself.
        TokenKind::While
        | TokenKind::Number
        | TokenKind::Empty
        | TokenKind::EndOfStream
        | TokenKind::Equal
        | TokenKind::AddOp
        | TokenKind::MultOp
        | TokenKind::LParen
        | TokenKind::RParen
        | TokenKind::Then
        | TokenKind::Fi
        | TokenKind::Do
        | TokenKind::Od
        | TokenKind::Relation => {
            p.expect(node, TokenKind::While)?;
            condition(p, node)?;
            p.expect(node, TokenKind::Do)?;
            stmt_list(p, node)?;
            p.expect(node, TokenKind::Od)
        }
    }
}

fn condition(p: &mut Parser<'_>, from: NodeHandle) -> ParseResult {
    let node = p.start(from, NonTerminal::Condition);

    expr::expr(p, node)?;
    p.expect(node, TokenKind::Relation)?;
    expr::expr(p, node)
}

#[cfg(test)]
mod tests {
    use crate::lexer::TokenStream;
    use crate::parser::Parser;
    use crate::parser::error::SyntaxError;
    use crate::parser::event::EventRecorder;
    use crate::token_kind::TokenKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn analyze(source: &str) -> Result<(), SyntaxError> {
        let mut tokens = TokenStream::from_source(source);
        let mut recorder = EventRecorder::new();
        Parser::new(&mut tokens, &mut recorder).analyze()
    }

    #[rstest]
    #[case("")]
    #[case("x := 5")]
    #[case("x := café")]
    #[case("read x")]
    #[case("write x")]
    #[case("read x write x * 2")]
    #[case("if x < 10 then x := x + 1 fi")]
    #[case("if a = b then fi")]
    #[case("while i <= n do read x total := total + x i := i + 1 od")]
    #[case("while a != 0 do if a > 5 then a := a - 5 fi a := a - 1 od")]
    fn accepts_valid_statements(#[case] source: &str) {
        assert_eq!(analyze(source), Ok(()));
    }

    #[rstest]
    #[case::missing_assign("x 5", TokenKind::Equal, "5")]
    #[case::read_needs_identifier("read 5", TokenKind::Identifier, "5")]
    #[case::if_needs_then("if x < 1 x := 1 fi", TokenKind::Then, "x")]
    #[case::unterminated_if("if x < 1 then", TokenKind::Fi, "")]
    #[case::while_needs_do("while x < 1 od", TokenKind::Do, "od")]
    #[case::unterminated_while("while x < 1 do x := 0", TokenKind::Od, "")]
    #[case::condition_needs_relation("if x then fi", TokenKind::Relation, "then")]
    #[case::stray_closer("x := 1 fi", TokenKind::EndOfStream, "fi")]
    fn reports_first_mismatch(
        #[case] source: &str,
        #[case] expected: TokenKind,
        #[case] found: &str,
    ) {
        let err = analyze(source).unwrap_err();
        assert_eq!(err.expected, expected);
        assert_eq!(err.found, found);
    }
}
