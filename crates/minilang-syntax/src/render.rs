//! Plain-text output for parse trees and recorded events.

use crate::parser::event::TreeEvent;
use crate::parser::sink::ParseTree;
use crate::syntax_kind::{SyntaxElement, SyntaxKind};
use rowan::{NodeOrToken, WalkEvent};

/// Render `tree` one node per line, `indent` spaces per level.
///
/// Rule nodes print their name, terminal wrappers print `<KIND>` with the
/// quoted lexeme one level below, ε markers print `ε`. The walk is iterative,
/// so arbitrarily deep statement lists render without recursion.
pub fn render_tree(tree: &ParseTree, indent: usize) -> String {
    let mut result = String::new();
    result.push_str(tree.title());
    result.push('\n');

    // The header node sits at depth 0 and is not printed
    let mut depth = 0usize;
    let mut inside_leaf = 0usize;
    for event in tree.root().preorder_with_tokens() {
        match event {
            WalkEvent::Enter(element) => {
                if inside_leaf == 0 {
                    if let Some(line) = line_for(&element) {
                        let prefix = " ".repeat(depth.saturating_sub(1) * indent);
                        result.push_str(&format!("{prefix}{line}\n"));
                    }
                }
                if is_leaf_node(&element) {
                    inside_leaf += 1;
                }
                depth += 1;
            }
            WalkEvent::Leave(element) => {
                if is_leaf_node(&element) {
                    inside_leaf -= 1;
                }
                depth -= 1;
            }
        }
    }

    result
}

/// ε and error nodes print as one line; their tokens are not shown.
fn is_leaf_node(element: &SyntaxElement) -> bool {
    matches!(element.kind(), SyntaxKind::EMPTY | SyntaxKind::ERROR)
}

fn line_for(element: &SyntaxElement) -> Option<String> {
    match element {
        NodeOrToken::Node(node) => match node.kind() {
            SyntaxKind::EMPTY => Some("ε".to_string()),
            SyntaxKind::ERROR => Some(format!("ERROR: {}", node.text())),
            kind if kind.is_terminal_wrapper() => Some(format!("<{kind:?}>")),
            kind if kind.is_rule() => Some(format!("{kind:?}")),
            _ => None,
        },
        NodeOrToken::Token(token) if token.kind() == SyntaxKind::LEXEME => {
            Some(format!("{:?}", token.text()))
        }
        NodeOrToken::Token(_) => None,
    }
}

/// Render recorded events one per line.
pub fn render_events(events: &[TreeEvent]) -> String {
    events.iter().map(|event| format!("{event}\n")).collect()
}
