//! Declarative UI tree.
//!
//! A [`Node`] describes the structure a view wants on screen: element kind,
//! attributes, event handlers and children. Trees are built fresh on every
//! render and never mutated afterwards; the reconciler compares two trees and
//! the document applies the difference.
//!
//! # Example
//!
//! ```ignore
//! let tree = Element::new("button")
//!     .attr("id", "increment")
//!     .on(EventKind::Click, move |_| { dispatch.send(Message::Increment); })
//!     .text("Increment")
//!     .into_node();
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

// =============================================================================
// EVENTS
// =============================================================================

/// Kinds of user interaction an element can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Activation of a control (mouse click, Enter, Space).
    Click,
    /// Committed change of an input's text.
    Change,
}

impl EventKind {
    /// Get the attribute-style label (`click`, `change`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw event data delivered to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The element was activated.
    Click,
    /// The element's text changed to the given value.
    Change(String),
}

impl Event {
    /// The kind of handler this event is routed to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click => EventKind::Click,
            Self::Change(_) => EventKind::Change,
        }
    }
}

/// An event handler closure embedded in the tree.
///
/// Handlers are compared by presence only: two trees with a click handler on
/// the same element are structurally equal regardless of what the closures
/// capture.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl Handler {
    /// Wrap a closure as a handler.
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler with an event.
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

impl PartialEq for Handler {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

// =============================================================================
// NODES
// =============================================================================

/// A node of the UI tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with attributes, handlers and children.
    Element(Element),
    /// A text leaf.
    Text(String),
}

impl Node {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Get the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Find the first element (depth-first) whose `id` attribute matches.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let element = self.as_element()?;
        if element.get_id() == Some(id) {
            return Some(element);
        }
        element
            .children
            .iter()
            .find_map(|child| child.find_by_id(id))
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(content) => out.push_str(content),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Render an indented, HTML-like description of the tree.
    ///
    /// Handlers appear as `on:<event>` markers. Intended for diagnostics and
    /// snapshot tests, not for a browser.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out, 0);
        out
    }

    fn write_markup(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Text(content) => {
                let _ = writeln!(out, "{indent}{content}");
            }
            Self::Element(element) => {
                let _ = write!(out, "{indent}<{}", element.tag);
                if let Some(key) = &element.key {
                    let _ = write!(out, " key=\"{key}\"");
                }
                for (name, value) in &element.attrs {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                for kind in element.handlers.keys() {
                    let _ = write!(out, " on:{kind}");
                }
                match element.children.as_slice() {
                    [] => {
                        let _ = writeln!(out, "/>");
                    }
                    [Node::Text(content)] => {
                        let _ = writeln!(out, ">{content}</{}>", element.tag);
                    }
                    children => {
                        let _ = writeln!(out, ">");
                        for child in children {
                            child.write_markup(out, depth + 1);
                        }
                        let _ = writeln!(out, "{indent}</{}>", element.tag);
                    }
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element node.
///
/// Built with a consuming builder:
///
/// ```ignore
/// Element::new("input").attr("type", "number").attr("value", "0")
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element kind (`div`, `button`, `tr`, ...).
    pub tag: String,
    /// Optional reconciliation key; elements only match when keys agree.
    pub key: Option<String>,
    /// Attributes and properties, sorted by name.
    pub attrs: BTreeMap<String, String>,
    /// Event handlers by event kind.
    pub handlers: BTreeMap<EventKind, Handler>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element of the given kind.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            attrs: BTreeMap::new(),
            handlers: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set the reconciliation key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the stable `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Attach a handler for an event kind, replacing any previous one.
    #[must_use]
    pub fn on(mut self, kind: EventKind, f: impl Fn(&Event) + 'static) -> Self {
        self.handlers.insert(kind, Handler::new(f));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child nodes.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Node::text(content))
    }

    /// Get the `id` attribute.
    pub fn get_id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Get an attribute by name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Get the handler for an event kind.
    pub fn handler(&self, kind: EventKind) -> Option<&Handler> {
        self.handlers.get(&kind)
    }

    /// Convert into a [`Node`].
    pub fn into_node(self) -> Node {
        Node::Element(self)
    }
}
