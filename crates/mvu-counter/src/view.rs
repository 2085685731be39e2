//! View function.
//!
//! Builds the whole UI from a [`State`]. Nothing here runs side effects: the
//! handlers it builds send messages through the given [`Dispatch`] or call the
//! injected [`RowScroller`] when a user interacts.

use std::rc::Rc;

use mvu_runtime::{Dispatch, Element, Event, EventKind, Node};

use crate::interop::RowScroller;
use crate::message::Message;
use crate::state::State;

/// Highest row the scroll control will act on.
pub const MAX_SCROLL_ROW: i64 = 500;

/// Number of rendered table rows (`0..=MAX_SCROLL_ROW`).
pub const ROW_COUNT: usize = 501;

/// Stable element ids of the controls.
pub mod ids {
    pub const VALUE: &str = "value";
    pub const INCREMENT: &str = "increment";
    pub const DECREMENT: &str = "decrement";
    pub const ROW_INPUT: &str = "row-input";
    pub const SCROLL: &str = "scroll-to-row";
    pub const TABLE: &str = "rows";
}

/// Stable id of the table row for `row`.
pub fn row_element_id(row: i64) -> String {
    format!("row-{row}")
}

/// Parse the row input's text.
///
/// Surrounding whitespace is ignored. Anything that is not an integer becomes
/// `0`.
pub fn parse_row(text: &str) -> i64 {
    text.trim().parse().unwrap_or_else(|_| {
        tracing::debug!(input = text, "row input is not an integer, using 0");
        0
    })
}

/// Render the UI for `state`.
pub fn view(
    state: &State,
    dispatch: &Dispatch<Message>,
    scroller: &Rc<dyn RowScroller>,
) -> Node {
    Element::new("div")
        .attr("class", "app")
        .child(
            Element::new("h1")
                .id(ids::VALUE)
                .text(state.value.to_string()),
        )
        .child(message_button(ids::INCREMENT, "Increment", Message::Increment, dispatch))
        .child(message_button(ids::DECREMENT, "Decrement", Message::Decrement, dispatch))
        .child(view_row_controls(state, dispatch, scroller))
        .child(view_table())
        .into_node()
}

fn message_button(
    id: &str,
    label: &str,
    message: Message,
    dispatch: &Dispatch<Message>,
) -> Element {
    let dispatch = dispatch.clone();
    Element::new("button")
        .id(id)
        .on(EventKind::Click, move |_| {
            dispatch.send(message);
        })
        .text(label)
}

fn view_row_controls(
    state: &State,
    dispatch: &Dispatch<Message>,
    scroller: &Rc<dyn RowScroller>,
) -> Element {
    let on_change = dispatch.clone();
    let input = Element::new("input")
        .id(ids::ROW_INPUT)
        .attr("type", "number")
        .attr("value", state.row.to_string())
        .on(EventKind::Change, move |event| {
            if let Event::Change(text) = event {
                on_change.send(Message::SetRow(parse_row(text)));
            }
        });

    // Rows above the rendered range are accepted into state but never
    // scrolled to.
    let row = state.row;
    let scroller = Rc::clone(scroller);
    let scroll = Element::new("button")
        .id(ids::SCROLL)
        .on(EventKind::Click, move |_| {
            if row <= MAX_SCROLL_ROW {
                scroller.scroll_to_row(row);
            }
        })
        .text("Scroll to row");

    Element::new("div")
        .attr("class", "row-controls")
        .child(input)
        .child(scroll)
}

fn view_table() -> Element {
    let rows = (0..ROW_COUNT).map(|index| {
        let index = index as i64;
        Element::new("tr")
            .key(index.to_string())
            .id(row_element_id(index))
            .child(Element::new("td").text(format!("Row {index}")))
            .into_node()
    });
    Element::new("table")
        .id(ids::TABLE)
        .child(Element::new("tbody").children(rows))
}
