//! # Tree Events
//!
//! A flat record of every call the grammar driver made on its
//! [`TreeBuilder`]. Recording first and building later decouples the driver
//! from any particular tree backend:
//!
//! ```text
//! header #0 "PARSE TREE"
//! node #1 PROGRAM under #0
//! node #2 STMT_LIST under #1
//! empty under #2
//! node #3 <EOF> under #1
//! leaf "" under #3
//! footer
//! ```
//!
//! [`EventRecorder`] is itself a [`TreeBuilder`]; [`replay`] feeds a
//! recorded sequence into another builder, translating handles as it goes.
//! Two analyses of the same token sequence record equal event sequences.

use std::collections::HashMap;
use std::fmt;

use crate::parser::sink::{NodeHandle, NodeLabel, TreeBuilder};

/// One call made on a [`TreeBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    Header {
        root: NodeHandle,
        title: String,
    },
    NonTerminal {
        parent: NodeHandle,
        node: NodeHandle,
        label: NodeLabel,
    },
    Terminal {
        node: NodeHandle,
        lexeme: String,
    },
    Empty {
        parent: NodeHandle,
    },
    SyntaxError {
        node: NodeHandle,
        message: String,
    },
    Footer,
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeEvent::Header { root, title } => write!(f, "header {root} {title:?}"),
            TreeEvent::NonTerminal {
                parent,
                node,
                label,
            } => write!(f, "node {node} {label} under {parent}"),
            TreeEvent::Terminal { node, lexeme } => write!(f, "leaf {lexeme:?} under {node}"),
            TreeEvent::Empty { parent } => write!(f, "empty under {parent}"),
            TreeEvent::SyntaxError { node, message } => write!(f, "error under {node}: {message}"),
            TreeEvent::Footer => f.write_str("footer"),
        }
    }
}

/// A [`TreeBuilder`] that only records what it is asked to do.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<TreeEvent>,
    next: u32,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TreeEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TreeEvent> {
        self.events
    }

    fn issue(&mut self) -> NodeHandle {
        let handle = NodeHandle::new(self.next);
        self.next += 1;
        handle
    }
}

impl TreeBuilder for EventRecorder {
    fn write_header(&mut self, title: &str) -> NodeHandle {
        let root = self.issue();
        self.events.push(TreeEvent::Header {
            root,
            title: title.to_string(),
        });
        root
    }

    fn write_footer(&mut self) {
        self.events.push(TreeEvent::Footer);
    }

    fn add_non_terminal(&mut self, parent: NodeHandle, label: NodeLabel) -> NodeHandle {
        let node = self.issue();
        self.events.push(TreeEvent::NonTerminal {
            parent,
            node,
            label,
        });
        node
    }

    fn add_terminal(&mut self, node: NodeHandle, lexeme: &str) {
        self.events.push(TreeEvent::Terminal {
            node,
            lexeme: lexeme.to_string(),
        });
    }

    fn add_empty(&mut self, parent: NodeHandle) {
        self.events.push(TreeEvent::Empty { parent });
    }

    fn syntax_error(&mut self, message: &str, node: NodeHandle) {
        self.events.push(TreeEvent::SyntaxError {
            node,
            message: message.to_string(),
        });
    }
}

/// Feed recorded events into `builder`.
///
/// Handles in the events are the recorder's; they are mapped to the handles
/// `builder` hands out. Events that refer to a handle never issued are
/// skipped.
pub fn replay(events: &[TreeEvent], builder: &mut dyn TreeBuilder) {
    let mut handles: HashMap<NodeHandle, NodeHandle> = HashMap::new();

    for event in events {
        match event {
            TreeEvent::Header { root, title } => {
                handles.insert(*root, builder.write_header(title));
            }
            TreeEvent::NonTerminal {
                parent,
                node,
                label,
            } => match handles.get(parent) {
                Some(&parent) => {
                    handles.insert(*node, builder.add_non_terminal(parent, *label));
                }
                None => log::warn!("skipping {event}: unknown parent"),
            },
            TreeEvent::Terminal { node, lexeme } => match handles.get(node) {
                Some(&node) => builder.add_terminal(node, lexeme),
                None => log::warn!("skipping {event}: unknown node"),
            },
            TreeEvent::Empty { parent } => match handles.get(parent) {
                Some(&parent) => builder.add_empty(parent),
                None => log::warn!("skipping {event}: unknown parent"),
            },
            TreeEvent::SyntaxError { node, message } => match handles.get(node) {
                Some(&node) => builder.syntax_error(message, node),
                None => log::warn!("skipping {event}: unknown node"),
            },
            TreeEvent::Footer => builder.write_footer(),
        }
    }
}
