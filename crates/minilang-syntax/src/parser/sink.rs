//! Tree builders that receive the grammar driver's structural calls.
//!
//! The driver never owns tree nodes. It asks a [`TreeBuilder`] to record a
//! node and gets back an opaque [`NodeHandle`], which it only ever passes back
//! as "attach under this parent". Calls arrive in strict pre-order, so a
//! builder can keep a simple stack of open nodes.
//!
//! [`GreenTreeBuilder`] turns the calls into an immutable Rowan tree.

use std::fmt;

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::syntax_kind::{NonTerminal, SyntaxKind, SyntaxNode};
use crate::token_kind::TokenKind;

/// Opaque address of a node owned by a [`TreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(u32);

impl NodeHandle {
    pub fn new(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an interior node stands for: a grammar rule, or the wrapper around a
/// consumed terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    Rule(NonTerminal),
    Terminal(TokenKind),
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Rule(rule) => write!(f, "{rule}"),
            NodeLabel::Terminal(kind) => write!(f, "<{kind}>"),
        }
    }
}

impl From<NodeLabel> for SyntaxKind {
    fn from(label: NodeLabel) -> Self {
        match label {
            NodeLabel::Rule(rule) => rule.into(),
            NodeLabel::Terminal(kind) => kind.into(),
        }
    }
}

/// Receiver of tree-construction events.
///
/// One analysis makes exactly one `write_header` call, then node calls in
/// left-to-right derivation order, then either `write_footer` or a single
/// `syntax_error`.
pub trait TreeBuilder {
    /// Open a new tree and return its root.
    fn write_header(&mut self, title: &str) -> NodeHandle;

    /// Seal the tree. No calls follow.
    fn write_footer(&mut self);

    /// Record an interior node as the next child of `parent`.
    fn add_non_terminal(&mut self, parent: NodeHandle, label: NodeLabel) -> NodeHandle;

    /// Record the literal lexeme of a terminal under its wrapper node.
    fn add_terminal(&mut self, node: NodeHandle, lexeme: &str);

    /// Record an applied epsilon production under `parent`.
    fn add_empty(&mut self, parent: NodeHandle);

    /// Report the syntax error that aborts the analysis at `node`.
    fn syntax_error(&mut self, message: &str, node: NodeHandle);
}

/// A sealed parse tree.
#[derive(Debug, Clone)]
pub struct ParseTree {
    title: String,
    root: SyntaxNode,
}

impl ParseTree {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The header node; its children are the recorded derivation.
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Lexemes of all consumed terminals, left to right.
    pub fn lexemes(&self) -> Vec<String> {
        self.root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == SyntaxKind::LEXEME)
            .map(|token| token.text().to_string())
            .collect()
    }

    /// Message of the recorded syntax error, if analysis stopped early.
    pub fn error_message(&self) -> Option<String> {
        self.root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SyntaxKind::ERROR_MESSAGE)
            .map(|token| token.text().to_string())
    }
}

/// Builds a Rowan green tree from [`TreeBuilder`] calls.
///
/// Because calls arrive in pre-order, attaching under `parent` means every
/// open node deeper than `parent` is complete and can be finished. Nodes are
/// assembled bottom-up with [`GreenNode::new`], so finishing one never walks
/// the subtree below it.
pub struct GreenTreeBuilder {
    open: Vec<OpenNode>,
    root: Option<GreenNode>,
    next: u32,
    title: String,
    started: bool,
    sealed: bool,
}

/// A node whose children are still being collected.
struct OpenNode {
    handle: NodeHandle,
    kind: SyntaxKind,
    children: Vec<GreenElement>,
}

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

impl Default for GreenTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GreenTreeBuilder {
    pub fn new() -> Self {
        Self {
            open: Vec::new(),
            root: None,
            next: 0,
            title: String::new(),
            started: false,
            sealed: false,
        }
    }

    /// Close whatever is still open and return the tree.
    ///
    /// A tree whose analysis stopped on an error has no footer; it is sealed
    /// here with the error node in place.
    pub fn finish(mut self) -> ParseTree {
        self.close_all();
        let root = self
            .root
            .unwrap_or_else(|| GreenNode::new(SyntaxKind::ROOT.into(), Vec::new()));
        ParseTree {
            title: self.title,
            root: SyntaxNode::new_root(root),
        }
    }

    fn issue(&mut self) -> NodeHandle {
        let handle = NodeHandle(self.next);
        self.next += 1;
        handle
    }

    fn accepting(&self, call: &str) -> bool {
        if !self.started || self.sealed {
            log::warn!("ignoring {call} outside of header/footer");
            return false;
        }
        true
    }

    fn open(&mut self, handle: NodeHandle, kind: SyntaxKind) {
        self.open.push(OpenNode {
            handle,
            kind,
            children: Vec::new(),
        });
    }

    /// Append a finished child to the innermost open node.
    fn push_child(&mut self, child: GreenElement) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(child),
            None => log::warn!("no open node to attach {:?} to", child.kind()),
        }
    }

    fn leaf(kind: SyntaxKind, text: &str) -> GreenElement {
        debug_assert!(kind.is_token(), "{kind:?} is not a token kind");
        NodeOrToken::Token(GreenToken::new(kind.into(), text))
    }

    /// Finish open nodes until `parent` is the innermost one.
    fn close_until(&mut self, parent: NodeHandle) {
        // The parent is nearly always on top, so search from there
        let Some(depth) = self.open.iter().rposition(|open| open.handle == parent) else {
            log::warn!("node {parent} is not open; attaching to the innermost node");
            return;
        };
        while self.open.len() > depth + 1 {
            self.close_innermost();
        }
    }

    fn close_innermost(&mut self) {
        let Some(node) = self.open.pop() else {
            return;
        };
        let green = GreenNode::new(node.kind.into(), node.children);
        if self.open.is_empty() {
            self.root = Some(green);
        } else {
            self.push_child(NodeOrToken::Node(green));
        }
    }

    fn close_all(&mut self) {
        while !self.open.is_empty() {
            self.close_innermost();
        }
    }
}

impl TreeBuilder for GreenTreeBuilder {
    fn write_header(&mut self, title: &str) -> NodeHandle {
        let root = self.issue();
        if self.started {
            log::warn!("header already written; ignoring {title:?}");
            return root;
        }
        self.started = true;
        self.title = title.to_string();
        self.open(root, SyntaxKind::ROOT);
        root
    }

    fn write_footer(&mut self) {
        if self.accepting("footer") {
            self.close_all();
            self.sealed = true;
        }
    }

    fn add_non_terminal(&mut self, parent: NodeHandle, label: NodeLabel) -> NodeHandle {
        let node = self.issue();
        if self.accepting("non-terminal") {
            self.close_until(parent);
            self.open(node, label.into());
        }
        node
    }

    fn add_terminal(&mut self, node: NodeHandle, lexeme: &str) {
        if self.accepting("terminal") {
            self.close_until(node);
            self.push_child(Self::leaf(SyntaxKind::LEXEME, lexeme));
        }
    }

    fn add_empty(&mut self, parent: NodeHandle) {
        if self.accepting("empty") {
            self.close_until(parent);
            let epsilon = Self::leaf(SyntaxKind::EPSILON, "");
            let empty = GreenNode::new(SyntaxKind::EMPTY.into(), [epsilon]);
            self.push_child(NodeOrToken::Node(empty));
        }
    }

    fn syntax_error(&mut self, message: &str, node: NodeHandle) {
        if self.accepting("syntax error") {
            self.close_until(node);
            let text = Self::leaf(SyntaxKind::ERROR_MESSAGE, message);
            let error = GreenNode::new(SyntaxKind::ERROR.into(), [text]);
            self.push_child(NodeOrToken::Node(error));
            self.sealed = true;
        }
    }
}
