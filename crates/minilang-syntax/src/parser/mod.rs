//! # Parser - Predictive Syntax Analysis
//!
//! The grammar driver is a set of mutually recursive procedures, one per
//! grammar symbol (see [`grammar`]). Each procedure looks at exactly one
//! token of lookahead to choose a production and never backtracks.
//!
//! ## Collaborators
//!
//! The [`Parser`] owns no output of its own. It pulls tokens from a
//! [`LexicalSource`] and pushes structural calls to a [`TreeBuilder`]:
//!
//! ```text
//! LexicalSource ──tokens──▶ Parser ──calls──▶ TreeBuilder
//! ```
//!
//! Every rule procedure records its own node *before* descending, so the
//! tree depth mirrors the derivation exactly. Every consumed terminal
//! becomes a wrapper node labelled with its kind holding one leaf with the
//! literal lexeme.
//!
//! ## Errors
//!
//! The first mismatch aborts the whole analysis. Procedures return
//! `Result<(), SyntaxError>` and bail out with `?`, so the error unwinds the
//! descent in one step and is handled once, in [`Parser::analyze`]. There is
//! no recovery.
//!
//! ```
//! use minilang_syntax::lexer::TokenStream;
//! use minilang_syntax::parser::{Parser, event::EventRecorder};
//!
//! let mut tokens = TokenStream::from_source("x 5");
//! let mut recorder = EventRecorder::new();
//! let err = Parser::new(&mut tokens, &mut recorder).analyze().unwrap_err();
//! assert_eq!(err.to_string(), "SYNTAX ERROR: 'a :=' was expected but '5' was found.");
//! ```

pub mod error;
pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::LexicalSource;
use crate::syntax_kind::NonTerminal;
use crate::token_kind::TokenKind;
use error::SyntaxError;
use sink::{NodeHandle, NodeLabel, TreeBuilder};

/// Title written by [`TreeBuilder::write_header`] unless overridden.
pub const DEFAULT_TITLE: &str = "PARSE TREE";

type ParseResult = Result<(), SyntaxError>;

/// One parse session over one token source and one tree builder.
pub struct Parser<'a> {
    lexer: &'a mut dyn LexicalSource,
    builder: &'a mut dyn TreeBuilder,
    title: String,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: &'a mut dyn LexicalSource, builder: &'a mut dyn TreeBuilder) -> Self {
        Self {
            lexer,
            builder,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Use `title` for the tree header.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Run the start rule over the whole token stream.
    ///
    /// On success the tree is sealed with a footer. On the first syntax
    /// error the analysis stops, the message is logged, and the error is
    /// handed back; the builder keeps the partial tree.
    pub fn analyze(&mut self) -> Result<(), SyntaxError> {
        log::debug!("analysis started: {}", self.title);
        let root = self.builder.write_header(&self.title);

        match grammar::program(self, root) {
            Ok(()) => {
                self.builder.write_footer();
                log::debug!("analysis finished");
                Ok(())
            }
            Err(err) => {
                match err.position {
                    Some(position) => log::error!("{position}: {err}"),
                    None => log::error!("{err}"),
                }
                Err(err)
            }
        }
    }

    /// Kind of the lookahead token.
    fn current(&self) -> TokenKind {
        self.lexer.current_token()
    }

    /// Record the node for a rule procedure under `parent`.
    fn start(&mut self, parent: NodeHandle, rule: NonTerminal) -> NodeHandle {
        self.builder.add_non_terminal(parent, NodeLabel::Rule(rule))
    }

    /// Record an applied epsilon production.
    fn empty(&mut self, parent: NodeHandle) {
        self.builder.add_empty(parent);
    }

    /// Consume one terminal of the expected kind.
    fn expect(&mut self, parent: NodeHandle, kind: TokenKind) -> ParseResult {
        if !self.lexer.is_current_token(kind) {
            return Err(self.syntax_error(kind, parent));
        }

        let node = self
            .builder
            .add_non_terminal(parent, NodeLabel::Terminal(kind));
        let lexeme = self.lexer.current_lexeme();
        log::trace!("consumed {kind} {lexeme:?}");
        self.builder.add_terminal(node, lexeme);
        self.lexer.advance_token();
        Ok(())
    }

    fn syntax_error(&mut self, expected: TokenKind, node: NodeHandle) -> SyntaxError {
        let err = SyntaxError {
            expected,
            found: self.lexer.current_lexeme().to_string(),
            node,
            position: self.lexer.current_position(),
        };
        self.builder.syntax_error(&err.to_string(), node);
        err
    }
}
