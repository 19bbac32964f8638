//! # minilang-syntax
//!
//! A predictive (LL(1)) syntax analyzer for a small imperative language:
//! assignment, `read`/`write`, `if`/`while` with relational conditions, and
//! arithmetic with `+ - * /` and parentheses.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → TreeBuilder calls → Tree
//!               (Logos)          (Grammar)  (EventRecorder)     (Rowan)
//! ```
//!
//! - [`token_kind`]: the token vocabulary and the pure [`classify`] function
//! - [`lexer`]: segments source text and supplies tokens through
//!   [`lexer::LexicalSource`]
//! - [`parser`]: the grammar driver, its [`parser::sink::TreeBuilder`]
//!   contract and the builders shipped with it
//! - [`render`]: text output for trees and events
//!
//! The parser stops at the first syntax error; there is no recovery.
//!
//! ## Quick Start
//!
//! ```
//! use minilang_syntax::{parse, SyntaxKind};
//!
//! let parse = parse("x := 5");
//! assert!(parse.error.is_none());
//!
//! let program = parse.tree.root().first_child().unwrap();
//! assert_eq!(program.kind(), SyntaxKind::PROGRAM);
//! assert_eq!(parse.tree.lexemes(), ["x", ":=", "5", ""]);
//! ```

pub mod lexer;
pub mod parser;
pub mod render;
pub mod syntax_kind;
pub mod token_kind;

pub use parser::error::SyntaxError;
pub use parser::event::{EventRecorder, TreeEvent};
pub use parser::sink::{GreenTreeBuilder, NodeHandle, NodeLabel, ParseTree, TreeBuilder};
pub use parser::{DEFAULT_TITLE, Parser};
pub use syntax_kind::{MiniLang, NonTerminal, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use token_kind::{TokenKind, classify};

use lexer::TokenStream;

/// Everything one analysis produced.
#[derive(Debug, Clone)]
pub struct Parse {
    /// Builder calls in the order the parser made them.
    pub events: Vec<TreeEvent>,
    /// The tree built from `events`; partial when `error` is set.
    pub tree: ParseTree,
    pub error: Option<SyntaxError>,
}

/// Scan and analyze `source` with the default tree title.
pub fn parse(source: &str) -> Parse {
    parse_with_title(source, DEFAULT_TITLE)
}

/// Scan and analyze `source`, writing `title` as the tree header.
pub fn parse_with_title(source: &str, title: &str) -> Parse {
    let mut tokens = TokenStream::from_source(source);
    let mut recorder = EventRecorder::new();
    let error = Parser::new(&mut tokens, &mut recorder)
        .with_title(title)
        .analyze()
        .err();

    let events = recorder.into_events();
    let mut builder = GreenTreeBuilder::new();
    parser::event::replay(&events, &mut builder);

    Parse {
        events,
        tree: builder.finish(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use render::render_tree;
    use std::time::{Duration, Instant};

    #[test]
    fn snapshot_assignment() {
        let parse = parse("x := 5");
        assert!(parse.error.is_none());
        assert_snapshot!(render_tree(&parse.tree, 2), @r#"
        PARSE TREE
        PROGRAM
          STMT_LIST
            STMT
              <ID>
                "x"
              <EQUAL>
                ":="
              EXPR
                TERM
                  FACTOR
                    <NUMBER>
                      "5"
                  FACTOR_TAIL
                    ε
                TERM_TAIL
                  ε
            STMT_LIST
              ε
          <EOF>
            ""
        "#);
    }

    #[test]
    fn snapshot_parenthesised_write() {
        let parse = parse("write (1 + 2)");
        assert!(parse.error.is_none());
        assert_snapshot!(render_tree(&parse.tree, 2), @r#"
        PARSE TREE
        PROGRAM
          STMT_LIST
            STMT
              <WRITE>
                "write"
              EXPR
                TERM
                  FACTOR
                    <LPAREN>
                      "("
                    EXPR
                      TERM
                        FACTOR
                          <NUMBER>
                            "1"
                        FACTOR_TAIL
                          ε
                      TERM_TAIL
                        <ADD_OP>
                          "+"
                        TERM
                          FACTOR
                            <NUMBER>
                              "2"
                          FACTOR_TAIL
                            ε
                        TERM_TAIL
                          ε
                    <RPAREN>
                      ")"
                  FACTOR_TAIL
                    ε
                TERM_TAIL
                  ε
            STMT_LIST
              ε
          <EOF>
            ""
        "#);
    }

    #[test]
    fn snapshot_while_loop() {
        let parse = parse("while i < 3 do read x od");
        assert!(parse.error.is_none());
        assert_snapshot!(render_tree(&parse.tree, 2), @r#"
        PARSE TREE
        PROGRAM
          STMT_LIST
            STMT
              <WHILE>
                "while"
              CONDITION
                EXPR
                  TERM
                    FACTOR
                      <ID>
                        "i"
                    FACTOR_TAIL
                      ε
                  TERM_TAIL
                    ε
                <RELATION>
                  "<"
                EXPR
                  TERM
                    FACTOR
                      <NUMBER>
                        "3"
                    FACTOR_TAIL
                      ε
                  TERM_TAIL
                    ε
              <DO>
                "do"
              STMT_LIST
                STMT
                  <READ>
                    "read"
                  <ID>
                    "x"
                STMT_LIST
                  ε
              <OD>
                "od"
            STMT_LIST
              ε
          <EOF>
            ""
        "#);
    }

    #[test]
    fn snapshot_syntax_error_keeps_partial_tree() {
        let parse = parse("x 5");
        assert_eq!(
            parse.error.as_ref().map(ToString::to_string).as_deref(),
            Some("SYNTAX ERROR: 'a :=' was expected but '5' was found.")
        );
        assert_snapshot!(render_tree(&parse.tree, 2), @r#"
        PARSE TREE
        PROGRAM
          STMT_LIST
            STMT
              <ID>
                "x"
              ERROR: SYNTAX ERROR: 'a :=' was expected but '5' was found.
        "#);
    }

    #[test]
    fn identical_token_sequences_produce_identical_events() {
        let first = parse("if a < b then write a * (b - 1) fi");
        let second = parse("if a < b then write a * (b - 1) fi");
        assert!(first.error.is_none());
        assert_eq!(first.events, second.events);
    }

    #[test]
    fn layout_does_not_change_events() {
        let compact = parse("x:=(a+1)*b");
        let spread = parse("x :=\n  ( a + 1 )\n  * b\n");
        assert_eq!(compact.events, spread.events);
    }

    #[test]
    fn custom_title_reaches_the_tree() {
        let parse = parse_with_title("", "MY TREE");
        assert_eq!(parse.tree.title(), "MY TREE");
        assert_eq!(render_tree(&parse.tree, 2).lines().next(), Some("MY TREE"));
    }

    #[test]
    fn every_rule_node_precedes_its_children() {
        // Pre-order: a node's handle is always issued after its parent's
        let parse = parse("while x > 0 do x := x - 1 od");
        for event in &parse.events {
            if let TreeEvent::NonTerminal { parent, node, .. } = event {
                assert!(parent < node);
            }
        }
    }

    #[test]
    fn long_statement_lists_build_in_linear_time() {
        let source = "x := 1\n".repeat(3000);

        let started = Instant::now();
        let parse = parse(&source);
        let elapsed = started.elapsed();

        assert!(parse.error.is_none());
        assert_eq!(parse.tree.lexemes().len(), 3 * 3000 + 1);
        assert!(elapsed < Duration::from_secs(2), "building took {elapsed:?}");
    }

    #[test]
    fn deeply_nested_tree_renders_every_node() {
        let parse = parse(&"x := 1\n".repeat(3000));

        // Fifteen lines per statement, plus the title, PROGRAM, the final
        // empty STMT_LIST and the end-of-stream wrapper
        let rendered = render_tree(&parse.tree, 0);
        assert_eq!(rendered.lines().count(), 15 * 3000 + 6);
        assert_eq!(rendered.lines().last(), Some("\"\""));
    }
}
