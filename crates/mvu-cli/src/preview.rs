//! Static previews of the view.
//!
//! Renders the tree for an arbitrary state without starting a loop. The
//! handlers in the result are inert: messages go to a detached dispatch and
//! scroll requests are discarded.

use std::rc::Rc;

use mvu_counter::{RowScroller, State, view};
use mvu_runtime::{Dispatch, Node};

/// A [`RowScroller`] that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScroller;

impl RowScroller for NoopScroller {
    fn scroll_to_row(&self, row: i64) {
        tracing::trace!(row, "preview scroll ignored");
    }
}

/// Render the view for `state`, keeping only the first `rows` table rows.
pub fn render_preview(state: &State, rows: usize) -> Node {
    let scroller: Rc<dyn RowScroller> = Rc::new(NoopScroller);
    let mut tree = view(state, &Dispatch::detached(), &scroller);
    truncate_tag(&mut tree, "tbody", rows);
    tree
}

/// Cut the children of every `tag` element down to `limit`.
fn truncate_tag(node: &mut Node, tag: &str, limit: usize) {
    let Node::Element(element) = node else {
        return;
    };
    if element.tag == tag {
        element.children.truncate(limit);
    }
    for child in &mut element.children {
        truncate_tag(child, tag, limit);
    }
}
