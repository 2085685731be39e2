//! In-memory retained document.
//!
//! [`Document`] plays the part of the host DOM: it holds the live element tree
//! for a mount point, applies reconciliation patches, answers lookups by stable
//! id, and implements the "bring into view" primitive through
//! [`ElementHost`]. Every live node carries a [`NodeId`] assigned at creation
//! and kept for as long as the reconciler patches it in place.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::reconcile::Patch;
use crate::tree::{Element, EventKind, Handler, Node};

/// Identity of a live node.
pub type NodeId = u64;

/// Shared handle owned by the runtime and the host.
pub type SharedDocument = Rc<RefCell<Document>>;

/// Non-owning handle for capabilities captured inside event handlers.
pub type WeakDocument = Weak<RefCell<Document>>;

// =============================================================================
// SCROLL OPTIONS
// =============================================================================

/// Scroll animation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Let the host decide.
    #[default]
    Auto,
    /// Animated scrolling.
    Smooth,
    /// Jump without animation.
    Instant,
}

/// Alignment of the target within the scroll viewport on one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAlignment {
    Start,
    Center,
    End,
    /// Scroll as little as possible to make the target visible.
    #[default]
    Nearest,
}

/// Options for [`ElementHost::scroll_into_view`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    /// Vertical alignment.
    pub block: ScrollAlignment,
    /// Horizontal alignment.
    pub inline: ScrollAlignment,
}

impl ScrollIntoViewOptions {
    /// Smooth scrolling, nearest edge on both axes.
    pub fn smooth_nearest() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollAlignment::Nearest,
            inline: ScrollAlignment::Nearest,
        }
    }
}

/// A scroll request the document accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    /// Stable id of the target element.
    pub target: String,
    /// Live identity of the target when the request was made.
    pub node_id: NodeId,
    pub options: ScrollIntoViewOptions,
}

/// Host facility used by interop effects.
pub trait ElementHost {
    /// Bring the element with the given id into view.
    ///
    /// Returns `false` without doing anything when no such element exists.
    fn scroll_into_view(&mut self, id: &str, options: ScrollIntoViewOptions) -> bool;
}

// =============================================================================
// LIVE TREE
// =============================================================================

/// A node of the live tree.
#[derive(Debug, Clone)]
pub enum LiveNode {
    Element(LiveElement),
    Text { node_id: NodeId, text: String },
}

impl LiveNode {
    /// Identity of this node.
    pub fn node_id(&self) -> NodeId {
        match self {
            Self::Element(element) => element.node_id,
            Self::Text { node_id, .. } => *node_id,
        }
    }

    fn find_by_id(&self, id: &str) -> Option<&LiveElement> {
        let Self::Element(element) = self else {
            return None;
        };
        if element.attrs.get("id").is_some_and(|value| value == id) {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find_by_id(id))
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text, .. } => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Convert back into a declarative node.
    pub fn to_node(&self) -> Node {
        match self {
            Self::Text { text, .. } => Node::Text(text.clone()),
            Self::Element(element) => Node::Element(Element {
                tag: element.tag.clone(),
                key: element.key.clone(),
                attrs: element.attrs.clone(),
                handlers: element.handlers.clone(),
                children: element.children.iter().map(Self::to_node).collect(),
            }),
        }
    }
}

/// A live element.
#[derive(Debug, Clone)]
pub struct LiveElement {
    pub node_id: NodeId,
    pub tag: String,
    pub key: Option<String>,
    pub attrs: BTreeMap<String, String>,
    pub handlers: BTreeMap<EventKind, Handler>,
    pub children: Vec<LiveNode>,
}

impl LiveElement {
    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Get an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct Mounted {
    point: String,
    root: LiveNode,
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// The retained UI.
#[derive(Debug, Default)]
pub struct Document {
    mount_points: BTreeSet<String>,
    mounted: Option<Mounted>,
    next_id: NodeId,
    commits: u64,
    scroll_log: Vec<ScrollRequest>,
}

impl Document {
    /// Create a document with no mount points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document exposing a single mount point.
    pub fn with_mount_point(id: impl Into<String>) -> Self {
        let mut document = Self::new();
        document.add_mount_point(id);
        document
    }

    /// Wrap into a shared handle.
    pub fn into_shared(self) -> SharedDocument {
        Rc::new(RefCell::new(self))
    }

    /// Register a mount point.
    pub fn add_mount_point(&mut self, id: impl Into<String>) {
        self.mount_points.insert(id.into());
    }

    /// Mount a tree at a mount point.
    pub fn mount(&mut self, point: &str, tree: &Node) -> Result<(), DocumentError> {
        if !self.mount_points.contains(point) {
            return Err(DocumentError::MountPointMissing {
                id: point.to_string(),
            });
        }
        if let Some(mounted) = &self.mounted {
            return Err(DocumentError::AlreadyMounted {
                id: mounted.point.clone(),
            });
        }
        let root = build(tree, &mut self.next_id);
        tracing::debug!(mount_point = point, root = root.node_id(), "mounted tree");
        self.mounted = Some(Mounted {
            point: point.to_string(),
            root,
        });
        Ok(())
    }

    /// Detach the mounted tree. Returns `false` if nothing was mounted.
    pub fn unmount(&mut self) -> bool {
        match self.mounted.take() {
            Some(mounted) => {
                tracing::debug!(mount_point = %mounted.point, "unmounted tree");
                true
            }
            None => false,
        }
    }

    /// Whether a tree is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Root of the mounted tree.
    pub fn root(&self) -> Option<&LiveNode> {
        self.mounted.as_ref().map(|mounted| &mounted.root)
    }

    /// Apply a patch list atomically.
    ///
    /// Patches are applied to a staged copy of the live tree; the copy replaces
    /// the live tree only when every patch succeeded.
    pub fn commit(&mut self, patches: &[Patch]) -> Result<(), DocumentError> {
        let mounted = self.mounted.as_ref().ok_or(DocumentError::NotMounted)?;
        if patches.is_empty() {
            return Ok(());
        }

        let mut staged = mounted.root.clone();
        let mut next_id = self.next_id;
        for patch in patches {
            tracing::trace!(path = ?patch.path(), visible = patch.is_visible(), "applying patch");
            apply(&mut staged, patch, &mut next_id)?;
        }

        if let Some(mounted) = self.mounted.as_mut() {
            mounted.root = staged;
        }
        self.next_id = next_id;
        self.commits += 1;
        Ok(())
    }

    /// Number of non-empty commits applied so far.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Find a live element by its `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<&LiveElement> {
        self.root()?.find_by_id(id)
    }

    /// Live identity of the element with the given id.
    pub fn node_id_of(&self, id: &str) -> Option<NodeId> {
        self.find_by_id(id).map(|element| element.node_id)
    }

    /// Text content of the element with the given id.
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.find_by_id(id).map(LiveElement::text_content)
    }

    /// Clone out the handler an element has for an event kind.
    pub fn handler_for(&self, id: &str, kind: EventKind) -> Option<Handler> {
        self.find_by_id(id)?.handlers.get(&kind).cloned()
    }

    /// Declarative snapshot of the live tree.
    pub fn snapshot(&self) -> Option<Node> {
        self.root().map(LiveNode::to_node)
    }

    /// Scroll requests accepted so far, oldest first.
    pub fn scroll_log(&self) -> &[ScrollRequest] {
        &self.scroll_log
    }

    /// Most recent accepted scroll request.
    pub fn last_scroll(&self) -> Option<&ScrollRequest> {
        self.scroll_log.last()
    }
}

impl ElementHost for Document {
    fn scroll_into_view(&mut self, id: &str, options: ScrollIntoViewOptions) -> bool {
        let Some(node_id) = self.node_id_of(id) else {
            return false;
        };
        tracing::debug!(target_id = id, node_id, ?options, "scroll into view");
        self.scroll_log.push(ScrollRequest {
            target: id.to_string(),
            node_id,
            options,
        });
        true
    }
}

// =============================================================================
// PATCH APPLICATION
// =============================================================================

fn build(node: &Node, next_id: &mut NodeId) -> LiveNode {
    let node_id = *next_id;
    *next_id += 1;
    match node {
        Node::Text(text) => LiveNode::Text {
            node_id,
            text: text.clone(),
        },
        Node::Element(element) => LiveNode::Element(LiveElement {
            node_id,
            tag: element.tag.clone(),
            key: element.key.clone(),
            attrs: element.attrs.clone(),
            handlers: element.handlers.clone(),
            children: element
                .children
                .iter()
                .map(|child| build(child, next_id))
                .collect(),
        }),
    }
}

fn invalid(path: &[usize], reason: &str) -> DocumentError {
    DocumentError::InvalidPath {
        path: path.to_vec(),
        reason: reason.to_string(),
    }
}

fn node_at_mut<'a>(
    root: &'a mut LiveNode,
    path: &[usize],
) -> Result<&'a mut LiveNode, DocumentError> {
    let mut current = root;
    for &index in path {
        let LiveNode::Element(element) = current else {
            return Err(invalid(path, "text nodes have no children"));
        };
        current = element
            .children
            .get_mut(index)
            .ok_or_else(|| invalid(path, "child index out of range"))?;
    }
    Ok(current)
}

fn element_at_mut<'a>(
    root: &'a mut LiveNode,
    path: &[usize],
) -> Result<&'a mut LiveElement, DocumentError> {
    match node_at_mut(root, path)? {
        LiveNode::Element(element) => Ok(element),
        LiveNode::Text { .. } => Err(invalid(path, "expected an element")),
    }
}

fn apply(root: &mut LiveNode, patch: &Patch, next_id: &mut NodeId) -> Result<(), DocumentError> {
    match patch {
        Patch::Replace { path, node } => {
            let target = node_at_mut(root, path)?;
            *target = build(node, next_id);
        }
        Patch::SetText { path, text } => match node_at_mut(root, path)? {
            LiveNode::Text { text: current, .. } => text.clone_into(current),
            LiveNode::Element(_) => return Err(invalid(path, "expected a text node")),
        },
        Patch::SetAttr { path, name, value } => {
            element_at_mut(root, path)?
                .attrs
                .insert(name.clone(), value.clone());
        }
        Patch::RemoveAttr { path, name } => {
            element_at_mut(root, path)?.attrs.remove(name);
        }
        Patch::BindHandlers { path, handlers } => {
            element_at_mut(root, path)?.handlers = handlers.clone();
        }
        Patch::AppendChild { path, node } => {
            let child = build(node, next_id);
            element_at_mut(root, path)?.children.push(child);
        }
        Patch::TruncateChildren { path, len } => {
            element_at_mut(root, path)?.children.truncate(*len);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::diff;

    fn rows(count: usize, label: &str) -> Node {
        Element::new("table")
            .children((0..count).map(|i| {
                Element::new("tr")
                    .id(format!("row-{i}"))
                    .text(format!("{label} {i}"))
                    .into_node()
            }))
            .into_node()
    }

    #[test]
    fn mount_requires_known_mount_point() {
        let mut document = Document::new();
        let err = document.mount("app", &rows(1, "r")).unwrap_err();
        assert_eq!(
            err,
            DocumentError::MountPointMissing {
                id: "app".to_string()
            }
        );
    }

    #[test]
    fn mount_twice_is_rejected() {
        let mut document = Document::with_mount_point("app");
        document.mount("app", &rows(1, "r")).unwrap();
        assert!(matches!(
            document.mount("app", &rows(1, "r")),
            Err(DocumentError::AlreadyMounted { .. })
        ));
    }

    #[test]
    fn in_place_patches_keep_identity() {
        let mut document = Document::with_mount_point("app");
        let old = rows(3, "Row");
        document.mount("app", &old).unwrap();
        let before = document.node_id_of("row-2").unwrap();

        let new = rows(3, "Line");
        document.commit(&diff(&old, &new)).unwrap();

        assert_eq!(document.node_id_of("row-2"), Some(before));
        assert_eq!(document.text_of("row-2").as_deref(), Some("Line 2"));
    }

    #[test]
    fn failed_commit_leaves_tree_untouched() {
        let mut document = Document::with_mount_point("app");
        document.mount("app", &rows(2, "Row")).unwrap();

        let patches = vec![
            Patch::SetText {
                path: vec![0, 0],
                text: "changed".to_string(),
            },
            Patch::SetText {
                path: vec![9, 0],
                text: "nowhere".to_string(),
            },
        ];
        let err = document.commit(&patches).unwrap_err();

        assert!(matches!(err, DocumentError::InvalidPath { .. }));
        assert_eq!(document.text_of("row-0").as_deref(), Some("Row 0"));
        assert_eq!(document.commit_count(), 0);
    }

    #[test]
    fn scroll_into_view_records_existing_targets_only() {
        let mut document = Document::with_mount_point("app");
        document.mount("app", &rows(2, "Row")).unwrap();

        assert!(document.scroll_into_view("row-1", ScrollIntoViewOptions::smooth_nearest()));
        assert!(!document.scroll_into_view("row-7", ScrollIntoViewOptions::default()));

        let log = document.scroll_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].target, "row-1");
        assert_eq!(log[0].options.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn unmount_detaches_tree() {
        let mut document = Document::with_mount_point("app");
        document.mount("app", &rows(1, "Row")).unwrap();

        assert!(document.unmount());
        assert!(!document.is_mounted());
        assert!(document.find_by_id("row-0").is_none());
        assert_eq!(document.commit(&[]), Err(DocumentError::NotMounted));
    }
}
