//! # Lexer - Segmenting Source Text
//!
//! The scanner breaks raw source text into lexemes using [Logos] and hands
//! each one to [`classify`] for its [`TokenKind`]. Logos only decides where
//! a lexeme starts and ends; classification is never duplicated here.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ```
//! use minilang_syntax::lexer::lex;
//! use minilang_syntax::TokenKind;
//!
//! let tokens = lex("x := 5");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [TokenKind::Identifier, TokenKind::Equal, TokenKind::Number]);
//! ```
//!
//! The parser does not read tokens directly. It pulls them one at a time
//! through the [`LexicalSource`] trait, implemented here by [`TokenStream`].

use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::token_kind::{TokenKind, classify};

/// Segment shapes recognised by the scanner.
///
/// Whitespace other than newlines is skipped outright. Newlines are matched
/// so line numbers can be tracked, but never become tokens.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
enum Segment {
    #[token("\n")]
    Newline,

    #[token(":=")]
    Assign,

    #[regex(r"<=|>=|!=|<|>|=")]
    Relation,

    #[regex(r"[+\-*/()]")]
    Operator,

    /// Unicode identifier characters, so `café` stays one word.
    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Word,

    /// Deliberately greedier than a valid number so `12.5.6` stays one
    /// lexeme and is classified (as an identifier) rather than split.
    #[regex(r"[0-9]+(\.[0-9]+)*")]
    Numeric,
}

/// 1-based line and column of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
    pub position: Position,
}

/// Scan the input into classified tokens.
///
/// Characters no segment rule accepts become single-character lexemes,
/// which [`classify`] turns into identifiers. The end-of-stream token is not
/// materialised; [`TokenStream`] synthesises it.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = Segment::lexer(input);
    let mut line = 1u32;
    let mut line_start = 0usize;

    while let Some(result) = lexer.next() {
        let span = lexer.span();

        if result == Ok(Segment::Newline) {
            line += 1;
            line_start = span.end;
            continue;
        }

        let text = lexer.slice();
        let column = input[line_start..span.start].chars().count() as u32 + 1;
        tokens.push(Token {
            kind: classify(text),
            text,
            span,
            position: Position { line, column },
        });
    }

    tokens
}

/// Forward-only supply of lookahead tokens for the grammar driver.
///
/// There is exactly one token of lookahead and no way to rewind.
pub trait LexicalSource {
    /// Kind of the current lookahead token.
    fn current_token(&self) -> TokenKind;

    /// Raw text of the current lookahead token.
    fn current_lexeme(&self) -> &str;

    /// Move to the next token. Past the end this is a no-op.
    fn advance_token(&mut self);

    fn is_current_token(&self, kind: TokenKind) -> bool {
        self.current_token() == kind
    }

    /// Where the current token starts, when the source knows.
    fn current_position(&self) -> Option<Position> {
        None
    }
}

/// A [`LexicalSource`] over an in-memory token vector.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Scan `source` and wrap the result.
    pub fn from_source(source: &'a str) -> Self {
        Self::new(lex(source))
    }

    /// Build a stream from lexemes that are already segmented.
    ///
    /// Positions are reported as if the lexemes were written on one line
    /// separated by single spaces.
    pub fn from_lexemes(lexemes: &[&'a str]) -> Self {
        let mut offset = 0usize;
        let mut column = 1u32;
        let tokens = lexemes
            .iter()
            .map(|&text| {
                let token = Token {
                    kind: classify(text),
                    text,
                    span: offset..offset + text.len(),
                    position: Position { line: 1, column },
                };
                offset += text.len() + 1;
                column += text.chars().count() as u32 + 1;
                token
            })
            .collect();
        Self::new(tokens)
    }

    /// Tokens not yet consumed, including the current one.
    #[cfg(test)]
    pub(crate) fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }
}

impl LexicalSource for TokenStream<'_> {
    fn current_token(&self) -> TokenKind {
        self.current()
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EndOfStream)
    }

    fn current_lexeme(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn advance_token(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn current_position(&self) -> Option<Position> {
        self.current().map(|t| t.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(input: &str) -> Vec<&str> {
        lex(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn lex_empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("  \n\t ").is_empty());
    }

    #[test]
    fn lex_assignment() {
        let tokens = lex("x := 5");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::Equal);
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].span, 5..6);
    }

    #[test]
    fn lex_without_spaces() {
        assert_eq!(texts("x:=(a+1)*b"), ["x", ":=", "(", "a", "+", "1", ")", "*", "b"]);
    }

    #[test]
    fn lex_relations_take_longest_match() {
        assert_eq!(texts("a<=b != c<d"), ["a", "<=", "b", "!=", "c", "<", "d"]);
    }

    #[test]
    fn lex_keeps_malformed_number_whole() {
        let tokens = lex("12.5.6");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "12.5.6");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn lex_unknown_character_becomes_identifier() {
        let tokens = lex("x := @");
        assert_eq!(tokens[2].text, "@");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn lex_keeps_unicode_words_whole() {
        let tokens = lex("x := café + naïve_2");
        assert_eq!(
            tokens.iter().map(|t| t.text).collect::<Vec<_>>(),
            ["x", ":=", "café", "+", "naïve_2"]
        );
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[4].kind, TokenKind::Identifier);
        assert_eq!(tokens[4].position.to_string(), "1:13");
    }

    #[test]
    fn lex_tracks_lines_and_columns() {
        let tokens = lex("read x\n  write x");
        let positions: Vec<_> = tokens.iter().map(|t| t.position.to_string()).collect();
        assert_eq!(positions, ["1:1", "1:6", "2:3", "2:9"]);
    }

    #[test]
    fn stream_synthesises_end_of_stream() {
        let mut stream = TokenStream::from_source("x");
        assert_eq!(stream.current_token(), TokenKind::Identifier);
        assert_eq!(stream.current_lexeme(), "x");

        stream.advance_token();
        assert_eq!(stream.current_token(), TokenKind::EndOfStream);
        assert_eq!(stream.current_lexeme(), "");
        assert_eq!(stream.current_position(), None);

        stream.advance_token();
        assert!(stream.is_current_token(TokenKind::EndOfStream));
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn stream_from_lexemes_classifies_each() {
        let mut stream = TokenStream::from_lexemes(&["while", "x", "<", "10"]);
        let mut kinds = Vec::new();
        while !stream.is_current_token(TokenKind::EndOfStream) {
            kinds.push(stream.current_token());
            stream.advance_token();
        }
        assert_eq!(
            kinds,
            [
                TokenKind::While,
                TokenKind::Identifier,
                TokenKind::Relation,
                TokenKind::Number
            ]
        );
    }

    #[test]
    fn stream_from_lexemes_reports_synthetic_positions() {
        let mut stream = TokenStream::from_lexemes(&["read", "x"]);
        stream.advance_token();
        assert_eq!(stream.current_position(), Some(Position { line: 1, column: 6 }));
    }
}
