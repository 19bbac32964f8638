use thiserror::Error;

use crate::lexer::Position;
use crate::parser::sink::NodeHandle;
use crate::token_kind::TokenKind;

/// The only error the grammar driver produces: a terminal was expected but
/// the lookahead was something else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "SYNTAX ERROR: '{}' was expected but '{found}' was found.",
    .expected.expected_description()
)]
pub struct SyntaxError {
    /// Kind the current production required.
    pub expected: TokenKind,
    /// Lexeme actually in the lookahead.
    pub found: String,
    /// Node under which the terminal would have been attached.
    pub node: NodeHandle,
    pub position: Option<Position>,
}

impl SyntaxError {
    pub fn expected_description(&self) -> &'static str {
        self.expected.expected_description()
    }
}
