//! Tests for the view function and its event handlers.

use std::cell::RefCell;
use std::rc::Rc;

use mvu_counter::{
    MAX_SCROLL_ROW, Message, ROW_COUNT, RowScroller, State, ids, parse_row, row_element_id, view,
};
use mvu_runtime::{Dispatch, Event, EventKind, Mailbox, Node};

// ============================================================================
// Helpers
// ============================================================================

#[derive(Default)]
struct RecordingScroller {
    calls: RefCell<Vec<i64>>,
}

impl RowScroller for RecordingScroller {
    fn scroll_to_row(&self, row: i64) {
        self.calls.borrow_mut().push(row);
    }
}

struct Harness {
    mailbox: Rc<RefCell<Mailbox<Message>>>,
    dispatch: Dispatch<Message>,
    recorder: Rc<RecordingScroller>,
    scroller: Rc<dyn RowScroller>,
}

impl Harness {
    fn new() -> Self {
        let mailbox = Rc::new(RefCell::new(Mailbox::new()));
        let dispatch = Dispatch::new(&mailbox);
        let recorder = Rc::new(RecordingScroller::default());
        let scroller: Rc<dyn RowScroller> = recorder.clone();
        Self {
            mailbox,
            dispatch,
            recorder,
            scroller,
        }
    }

    fn render(&self, state: State) -> Node {
        view(&state, &self.dispatch, &self.scroller)
    }

    fn fire(&self, tree: &Node, id: &str, event: Event) {
        tree.find_by_id(id)
            .unwrap_or_else(|| panic!("no element {id}"))
            .handler(event.kind())
            .unwrap_or_else(|| panic!("no handler on {id}"))
            .call(&event);
    }

    fn sent(&self) -> Vec<Message> {
        let mut mailbox = self.mailbox.borrow_mut();
        std::iter::from_fn(|| mailbox.pop()).collect()
    }

    fn scrolls(&self) -> Vec<i64> {
        self.recorder.calls.borrow().clone()
    }
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn heading_shows_value() {
    let harness = Harness::new();
    let tree = harness.render(State::new(-12, 0));
    assert_eq!(tree.find_by_id(ids::VALUE).unwrap().tag, "h1");
    let heading = Node::Element(tree.find_by_id(ids::VALUE).unwrap().clone());
    assert_eq!(heading.text_content(), "-12");
}

#[test]
fn input_is_bound_to_row() {
    let harness = Harness::new();
    let tree = harness.render(State::new(0, 42));
    let input = tree.find_by_id(ids::ROW_INPUT).unwrap();
    assert_eq!(input.get_attr("value"), Some("42"));
    assert!(input.handler(EventKind::Change).is_some());
}

#[test]
fn table_renders_every_row_with_stable_id() {
    let harness = Harness::new();
    let tree = harness.render(State::default());

    for row in [0, 1, 250, MAX_SCROLL_ROW] {
        let element = tree.find_by_id(&row_element_id(row)).unwrap();
        assert_eq!(element.tag, "tr");
        let cell = Node::Element(element.clone());
        assert_eq!(cell.text_content(), format!("Row {row}"));
    }
    assert!(tree.find_by_id(&row_element_id(ROW_COUNT as i64)).is_none());

    let table = tree.find_by_id(ids::TABLE).unwrap();
    let body = table.children[0].as_element().unwrap();
    assert_eq!(body.children.len(), ROW_COUNT);
}

#[test]
fn view_is_pure() {
    let harness = Harness::new();
    let state = State::new(3, 77);
    assert_eq!(harness.render(state), harness.render(state));
    assert!(harness.sent().is_empty());
    assert!(harness.scrolls().is_empty());
}

// ============================================================================
// Handlers
// ============================================================================

#[test]
fn buttons_dispatch_their_messages() {
    let harness = Harness::new();
    let tree = harness.render(State::default());

    harness.fire(&tree, ids::INCREMENT, Event::Click);
    harness.fire(&tree, ids::DECREMENT, Event::Click);
    harness.fire(&tree, ids::INCREMENT, Event::Click);

    assert_eq!(
        harness.sent(),
        vec![Message::Increment, Message::Decrement, Message::Increment]
    );
}

#[test]
fn row_input_parses_integers() {
    let harness = Harness::new();
    let tree = harness.render(State::default());

    harness.fire(&tree, ids::ROW_INPUT, Event::Change("123".to_string()));
    harness.fire(&tree, ids::ROW_INPUT, Event::Change(" -7 ".to_string()));

    assert_eq!(
        harness.sent(),
        vec![Message::SetRow(123), Message::SetRow(-7)]
    );
}

#[test]
fn row_input_is_fail_soft() {
    let harness = Harness::new();
    let tree = harness.render(State::new(0, 9));

    harness.fire(&tree, ids::ROW_INPUT, Event::Change("abc".to_string()));
    harness.fire(&tree, ids::ROW_INPUT, Event::Change(String::new()));
    harness.fire(&tree, ids::ROW_INPUT, Event::Change("1.5".to_string()));

    assert_eq!(harness.sent(), vec![Message::SetRow(0); 3]);
}

#[test]
fn scroll_control_acts_up_to_the_bound() {
    let harness = Harness::new();

    let tree = harness.render(State::new(0, 500));
    harness.fire(&tree, ids::SCROLL, Event::Click);
    let tree = harness.render(State::new(0, 0));
    harness.fire(&tree, ids::SCROLL, Event::Click);

    assert_eq!(harness.scrolls(), vec![500, 0]);
    assert!(harness.sent().is_empty());
}

#[test]
fn scroll_control_ignores_rows_past_the_bound() {
    let harness = Harness::new();

    let tree = harness.render(State::new(0, 501));
    harness.fire(&tree, ids::SCROLL, Event::Click);
    let tree = harness.render(State::new(0, i64::MAX));
    harness.fire(&tree, ids::SCROLL, Event::Click);

    assert!(harness.scrolls().is_empty());
    assert!(harness.sent().is_empty());
}

#[test]
fn parse_row_edge_cases() {
    assert_eq!(parse_row("500"), 500);
    assert_eq!(parse_row("+5"), 5);
    assert_eq!(parse_row("99999999999999999999"), 0);
    assert_eq!(parse_row("ten"), 0);
}
