//! Token kinds and the lexeme classifier.
//!
//! Every kind except [`TokenKind::Identifier`], [`TokenKind::Number`],
//! [`TokenKind::Empty`] and [`TokenKind::EndOfStream`] owns a fixed set of
//! exact-match lexemes. [`classify`] maps an already-segmented lexeme to its
//! kind:
//!
//! ```
//! use minilang_syntax::{TokenKind, classify};
//!
//! assert_eq!(classify(":="), TokenKind::Equal);
//! assert_eq!(classify("12.5"), TokenKind::Number);
//! assert_eq!(classify("count"), TokenKind::Identifier);
//! assert_eq!(classify("   "), TokenKind::EndOfStream);
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// All token kinds understood by the grammar.
///
/// Declaration order matters: [`classify`] searches the literal lexeme sets
/// in this order and the first hit wins. The sets are disjoint today, so the
/// order only acts as a tie-break if an overlapping lexeme is ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    /// Epsilon
    Empty,
    EndOfStream,
    /// `:=`
    Equal,
    Read,
    Write,
    /// `+` or `-`
    AddOp,
    /// `*` or `/`
    MultOp,
    LParen,
    RParen,
    If,
    Then,
    Fi,
    While,
    Do,
    Od,
    /// `<`, `>`, `<=`, `>=`, `=` or `!=`
    Relation,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 18] = [
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::Empty,
        TokenKind::EndOfStream,
        TokenKind::Equal,
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::AddOp,
        TokenKind::MultOp,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::If,
        TokenKind::Then,
        TokenKind::Fi,
        TokenKind::While,
        TokenKind::Do,
        TokenKind::Od,
        TokenKind::Relation,
    ];

    /// The exact lexemes owned by this kind. Empty for the open-ended kinds.
    pub fn lexemes(self) -> &'static [&'static str] {
        match self {
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::Empty
            | TokenKind::EndOfStream => &[],
            TokenKind::Equal => &[":="],
            TokenKind::Read => &["read"],
            TokenKind::Write => &["write"],
            TokenKind::AddOp => &["+", "-"],
            TokenKind::MultOp => &["*", "/"],
            TokenKind::LParen => &["("],
            TokenKind::RParen => &[")"],
            TokenKind::If => &["if"],
            TokenKind::Then => &["then"],
            TokenKind::Fi => &["fi"],
            TokenKind::While => &["while"],
            TokenKind::Do => &["do"],
            TokenKind::Od => &["od"],
            TokenKind::Relation => &["<", ">", "<=", ">=", "=", "!="],
        }
    }

    /// Label used for the wrapper node of a consumed terminal.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Identifier => "ID",
            TokenKind::Number => "NUMBER",
            TokenKind::Empty => "EMPTY",
            TokenKind::EndOfStream => "EOF",
            TokenKind::Equal => "EQUAL",
            TokenKind::Read => "READ",
            TokenKind::Write => "WRITE",
            TokenKind::AddOp => "ADD_OP",
            TokenKind::MultOp => "MULT_OP",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Fi => "FI",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::Od => "OD",
            TokenKind::Relation => "RELATION",
        }
    }

    /// Human-readable phrase naming this kind in a syntax error.
    pub fn expected_description(self) -> &'static str {
        match self {
            TokenKind::Identifier => "an ID",
            TokenKind::Number => "a Number",
            TokenKind::Empty => "nothing",
            TokenKind::EndOfStream => "End of Program",
            TokenKind::Equal => "a :=",
            TokenKind::Read => "a Read",
            TokenKind::Write => "a Write",
            TokenKind::AddOp => "an Addition/Subtraction Operator",
            TokenKind::MultOp => "a Multiplication/Division Operator",
            TokenKind::LParen => "a Left Parentheses",
            TokenKind::RParen => "a Right Parentheses",
            TokenKind::If => "an If",
            TokenKind::Then => "a Then",
            TokenKind::Fi => "a Fi",
            TokenKind::While => "a While",
            TokenKind::Do => "a Do",
            TokenKind::Od => "an Od",
            TokenKind::Relation => "a Relation Operator",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn number_pattern() -> &'static Regex {
    // Digits only; signs belong to AddOp.
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBER_REGEX.get_or_init(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("Invalid number regex"))
}

/// Classify a single lexeme.
///
/// Total and pure: blank input is [`TokenKind::EndOfStream`], anything that
/// matches neither the number pattern nor a literal set is
/// [`TokenKind::Identifier`].
pub fn classify(lexeme: &str) -> TokenKind {
    let lexeme = lexeme.trim();

    if lexeme.is_empty() {
        return TokenKind::EndOfStream;
    }

    if number_pattern().is_match(lexeme) {
        return TokenKind::Number;
    }

    TokenKind::ALL
        .into_iter()
        .find(|kind| kind.lexemes().contains(&lexeme))
        .unwrap_or(TokenKind::Identifier)
}
