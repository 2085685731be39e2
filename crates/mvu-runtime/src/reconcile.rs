//! Tree reconciliation.
//!
//! [`diff`] compares the previously committed tree with a freshly rendered one
//! and produces the patch list a [`Document`](crate::document::Document)
//! applies. Elements with the same tag and key are patched in place so the live
//! element keeps its identity; anything else is replaced wholesale.
//!
//! Children are matched by position. Extra new children are appended, surplus
//! old children are truncated from the end.

use std::collections::BTreeMap;

use crate::tree::{Element, EventKind, Handler, Node};

/// Child-index path from the root to a node. The empty path is the root.
pub type NodePath = Vec<usize>;

/// A single mutation of the live UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Replace the node at `path` (and its subtree) with a new one.
    Replace { path: NodePath, node: Node },
    /// Change the content of a text node.
    SetText { path: NodePath, text: String },
    /// Add or change an attribute.
    SetAttr {
        path: NodePath,
        name: String,
        value: String,
    },
    /// Remove an attribute.
    RemoveAttr { path: NodePath, name: String },
    /// Replace the element's handler set.
    BindHandlers {
        path: NodePath,
        handlers: BTreeMap<EventKind, Handler>,
    },
    /// Append a child at the end of the element's children.
    AppendChild { path: NodePath, node: Node },
    /// Drop children beyond `len`.
    TruncateChildren { path: NodePath, len: usize },
}

impl Patch {
    /// Path of the node this patch targets.
    pub fn path(&self) -> &[usize] {
        match self {
            Self::Replace { path, .. }
            | Self::SetText { path, .. }
            | Self::SetAttr { path, .. }
            | Self::RemoveAttr { path, .. }
            | Self::BindHandlers { path, .. }
            | Self::AppendChild { path, .. }
            | Self::TruncateChildren { path, .. } => path,
        }
    }

    /// Whether this patch changes what a user would see.
    ///
    /// Handler rebinding is invisible.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::BindHandlers { .. })
    }
}

/// Compute the patches that turn `old` into `new`.
pub fn diff(old: &Node, new: &Node) -> Vec<Patch> {
    let mut patches = Vec::new();
    let mut path = NodePath::new();
    diff_node(old, new, &mut path, &mut patches);
    patches
}

fn diff_node(old: &Node, new: &Node, path: &mut NodePath, out: &mut Vec<Patch>) {
    match (old, new) {
        (Node::Text(before), Node::Text(after)) => {
            if before != after {
                out.push(Patch::SetText {
                    path: path.clone(),
                    text: after.clone(),
                });
            }
        }
        (Node::Element(before), Node::Element(after)) if same_identity(before, after) => {
            diff_element(before, after, path, out);
        }
        _ => out.push(Patch::Replace {
            path: path.clone(),
            node: new.clone(),
        }),
    }
}

fn same_identity(old: &Element, new: &Element) -> bool {
    old.tag == new.tag && old.key == new.key
}

fn diff_element(old: &Element, new: &Element, path: &mut NodePath, out: &mut Vec<Patch>) {
    for name in old.attrs.keys() {
        if !new.attrs.contains_key(name) {
            out.push(Patch::RemoveAttr {
                path: path.clone(),
                name: name.clone(),
            });
        }
    }
    for (name, value) in &new.attrs {
        if old.attrs.get(name) != Some(value) {
            out.push(Patch::SetAttr {
                path: path.clone(),
                name: name.clone(),
                value: value.clone(),
            });
        }
    }

    // Closures capture the state they were rendered with, so they are always
    // rebound.
    if !old.handlers.is_empty() || !new.handlers.is_empty() {
        out.push(Patch::BindHandlers {
            path: path.clone(),
            handlers: new.handlers.clone(),
        });
    }

    let common = old.children.len().min(new.children.len());
    for (index, (before, after)) in old.children.iter().zip(&new.children).enumerate() {
        path.push(index);
        diff_node(before, after, path, out);
        path.pop();
    }

    if new.children.len() > common {
        for child in &new.children[common..] {
            out.push(Patch::AppendChild {
                path: path.clone(),
                node: child.clone(),
            });
        }
    } else if old.children.len() > common {
        out.push(Patch::TruncateChildren {
            path: path.clone(),
            len: common,
        });
    }
}
