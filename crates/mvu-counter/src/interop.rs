//! Scroll-into-view interop.
//!
//! This is the application's only imperative call. It is invoked from the
//! scroll control's click handler, reads the live document, and never touches
//! the state or the dispatch queue.

use std::rc::Rc;

use mvu_runtime::{ElementHost, ScrollIntoViewOptions, SharedDocument, WeakDocument};

use crate::view::row_element_id;

/// Capability to bring a table row into view.
///
/// The view captures one of these in the scroll control's handler.
pub trait RowScroller {
    /// Request that `row` be scrolled into view. Fire-and-forget.
    fn scroll_to_row(&self, row: i64);
}

/// Bring the element for `row` into view with smooth scrolling, aligned to
/// the nearest edge on both axes.
///
/// Returns whether the host found the element. A missing element is a no-op.
pub fn scroll_to_row(host: &mut dyn ElementHost, row: i64) -> bool {
    let id = row_element_id(row);
    let found = host.scroll_into_view(&id, ScrollIntoViewOptions::smooth_nearest());
    if !found {
        tracing::debug!(row, target_id = %id, "scroll target not rendered, ignoring");
    }
    found
}

/// [`RowScroller`] backed by the retained document.
///
/// Holds a weak handle so the document, which stores the handlers that
/// capture this scroller, does not keep itself alive.
#[derive(Debug, Clone)]
pub struct DocumentScroller {
    document: WeakDocument,
}

impl DocumentScroller {
    /// Bind to a document.
    pub fn new(document: &SharedDocument) -> Self {
        Self {
            document: Rc::downgrade(document),
        }
    }
}

impl RowScroller for DocumentScroller {
    fn scroll_to_row(&self, row: i64) {
        let Some(document) = self.document.upgrade() else {
            tracing::debug!(row, "document gone, scroll ignored");
            return;
        };
        let Ok(mut document) = document.try_borrow_mut() else {
            tracing::warn!(row, "document busy, scroll ignored");
            return;
        };
        scroll_to_row(&mut *document, row);
    }
}
