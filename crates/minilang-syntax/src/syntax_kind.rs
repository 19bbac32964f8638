//! SyntaxKind enum for the nodes and tokens of the parse tree.
//!
//! Rule nodes, terminal wrapper nodes and leaf tokens share a single enum so
//! the tree can be stored in rowan's green tree.

use std::fmt;

use crate::token_kind::TokenKind;

/// Grammar rules, one per nonterminal procedure of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NonTerminal {
    Program,
    StmtList,
    Stmt,
    Expr,
    TermTail,
    Term,
    FactorTail,
    Factor,
    Condition,
}

impl NonTerminal {
    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Program => "PROGRAM",
            NonTerminal::StmtList => "STMT_LIST",
            NonTerminal::Stmt => "STMT",
            NonTerminal::Expr => "EXPR",
            NonTerminal::TermTail => "TERM_TAIL",
            NonTerminal::Term => "TERM",
            NonTerminal::FactorTail => "FACTOR_TAIL",
            NonTerminal::Factor => "FACTOR",
            NonTerminal::Condition => "CONDITION",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All syntax kinds stored in the rowan tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens ===
    /// Literal text of a consumed terminal
    LEXEME,
    /// Marker for an applied epsilon production (no text)
    EPSILON,
    /// Message of the syntax error that stopped the analysis
    ERROR_MESSAGE,

    // === Terminal wrapper nodes ===
    ID,
    NUMBER,
    EMPTY,
    EOF,
    EQUAL,
    READ,
    WRITE,
    ADD_OP,
    MULT_OP,
    LPAREN,
    RPAREN,
    IF,
    THEN,
    FI,
    WHILE,
    DO,
    OD,
    RELATION,

    // === Rule nodes ===
    /// Header node holding the whole tree
    ROOT,
    PROGRAM,
    STMT_LIST,
    STMT,
    EXPR,
    TERM_TAIL,
    TERM,
    FACTOR_TAIL,
    FACTOR,
    CONDITION,

    /// Where analysis stopped
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind is a leaf token rather than a node.
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::ERROR_MESSAGE as u16)
    }

    /// Returns true if this kind wraps a consumed terminal.
    pub fn is_terminal_wrapper(self) -> bool {
        (Self::ID as u16..=Self::RELATION as u16).contains(&(self as u16))
    }

    /// Returns true if this kind is a grammar rule node.
    pub fn is_rule(self) -> bool {
        (Self::PROGRAM as u16..=Self::CONDITION as u16).contains(&(self as u16))
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Identifier => SyntaxKind::ID,
            TokenKind::Number => SyntaxKind::NUMBER,
            TokenKind::Empty => SyntaxKind::EMPTY,
            TokenKind::EndOfStream => SyntaxKind::EOF,
            TokenKind::Equal => SyntaxKind::EQUAL,
            TokenKind::Read => SyntaxKind::READ,
            TokenKind::Write => SyntaxKind::WRITE,
            TokenKind::AddOp => SyntaxKind::ADD_OP,
            TokenKind::MultOp => SyntaxKind::MULT_OP,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::If => SyntaxKind::IF,
            TokenKind::Then => SyntaxKind::THEN,
            TokenKind::Fi => SyntaxKind::FI,
            TokenKind::While => SyntaxKind::WHILE,
            TokenKind::Do => SyntaxKind::DO,
            TokenKind::Od => SyntaxKind::OD,
            TokenKind::Relation => SyntaxKind::RELATION,
        }
    }
}

impl From<NonTerminal> for SyntaxKind {
    fn from(rule: NonTerminal) -> Self {
        match rule {
            NonTerminal::Program => SyntaxKind::PROGRAM,
            NonTerminal::StmtList => SyntaxKind::STMT_LIST,
            NonTerminal::Stmt => SyntaxKind::STMT,
            NonTerminal::Expr => SyntaxKind::EXPR,
            NonTerminal::TermTail => SyntaxKind::TERM_TAIL,
            NonTerminal::Term => SyntaxKind::TERM,
            NonTerminal::FactorTail => SyntaxKind::FACTOR_TAIL,
            NonTerminal::Factor => SyntaxKind::FACTOR,
            NonTerminal::Condition => SyntaxKind::CONDITION,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MiniLang {}

impl rowan::Language for MiniLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MiniLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MiniLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MiniLang>;
