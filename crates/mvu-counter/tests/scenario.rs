//! End-to-end scenarios through the runtime loop and the retained document.

use mvu_counter::{MOUNT_POINT, Message, State, ids, row_element_id, start};
use mvu_runtime::{Document, Event, ScrollAlignment, ScrollBehavior, SharedDocument};

fn document() -> SharedDocument {
    Document::with_mount_point(MOUNT_POINT).into_shared()
}

#[test]
fn startup_renders_initial_state() {
    let doc = document();
    let runtime = start(doc.clone()).unwrap();

    assert_eq!(*runtime.state(), State::new(0, 0));
    let doc = doc.borrow();
    assert_eq!(doc.text_of(ids::VALUE).as_deref(), Some("0"));
    assert_eq!(
        doc.find_by_id(ids::ROW_INPUT).and_then(|e| e.attr("value")),
        Some("0")
    );
    assert!(doc.find_by_id(&row_element_id(500)).is_some());
}

#[test]
fn dispatch_order_is_preserved() {
    let mut runtime = start(document()).unwrap();
    let dispatch = runtime.dispatcher();

    dispatch.send(Message::Increment);
    dispatch.send(Message::Increment);
    dispatch.send(Message::Decrement);
    runtime.drain().unwrap();

    assert_eq!(*runtime.state(), State::new(1, 0));
}

#[test]
fn count_set_row_and_scroll() {
    let doc = document();
    let mut runtime = start(doc.clone()).unwrap();

    for _ in 0..3 {
        runtime.trigger(ids::INCREMENT, Event::Click).unwrap();
    }
    assert_eq!(runtime.state().value, 3);
    assert_eq!(doc.borrow().text_of(ids::VALUE).as_deref(), Some("3"));

    runtime
        .trigger(ids::ROW_INPUT, Event::Change("500".to_string()))
        .unwrap();
    assert_eq!(runtime.state().row, 500);

    let renders = runtime.stats().renders;
    let applied = runtime.trigger(ids::SCROLL, Event::Click).unwrap();

    assert_eq!(applied, 0);
    assert_eq!(runtime.stats().renders, renders);
    assert_eq!(*runtime.state(), State::new(3, 500));

    let doc = doc.borrow();
    let request = doc.last_scroll().unwrap();
    assert_eq!(request.target, row_element_id(500));
    assert_eq!(Some(request.node_id), doc.node_id_of(&row_element_id(500)));
    assert_eq!(request.options.behavior, ScrollBehavior::Smooth);
    assert_eq!(request.options.block, ScrollAlignment::Nearest);
    assert_eq!(request.options.inline, ScrollAlignment::Nearest);
}

#[test]
fn scroll_past_bound_does_nothing() {
    let doc = document();
    let mut runtime = start(doc.clone()).unwrap();

    runtime
        .trigger(ids::ROW_INPUT, Event::Change("501".to_string()))
        .unwrap();
    runtime.trigger(ids::SCROLL, Event::Click).unwrap();

    assert_eq!(runtime.state().row, 501);
    assert!(doc.borrow().scroll_log().is_empty());
}

#[test]
fn negative_row_is_accepted_but_has_no_target() {
    let doc = document();
    let mut runtime = start(doc.clone()).unwrap();

    runtime.dispatch(Message::SetRow(-4)).unwrap();
    runtime.trigger(ids::SCROLL, Event::Click).unwrap();

    assert_eq!(runtime.state().row, -4);
    assert!(doc.borrow().scroll_log().is_empty());
}

#[test]
fn garbage_input_resets_row() {
    let mut runtime = start(document()).unwrap();
    runtime.dispatch(Message::SetRow(12)).unwrap();

    runtime
        .trigger(ids::ROW_INPUT, Event::Change("twelve".to_string()))
        .unwrap();

    assert_eq!(runtime.state().row, 0);
}

#[test]
fn rows_keep_identity_across_renders() {
    let doc = document();
    let mut runtime = start(doc.clone()).unwrap();
    let before = doc.borrow().node_id_of(&row_element_id(250)).unwrap();

    runtime.dispatch(Message::Increment).unwrap();
    runtime.dispatch(Message::SetRow(250)).unwrap();

    assert_eq!(doc.borrow().node_id_of(&row_element_id(250)), Some(before));
}

#[test]
fn increment_patches_only_the_heading_and_handlers() {
    let doc = document();
    let mut runtime = start(doc.clone()).unwrap();
    let before = runtime.tree().clone();

    runtime.dispatch(Message::Increment).unwrap();

    let patches = mvu_runtime::diff(&before, runtime.tree());
    let visible: Vec<_> = patches.iter().filter(|p| p.is_visible()).collect();
    assert_eq!(visible.len(), 1);
    assert!(matches!(
        visible[0],
        mvu_runtime::Patch::SetText { text, .. } if text == "1"
    ));
}

#[test]
fn unmount_stops_dispatch() {
    let doc = document();
    let mut runtime = start(doc.clone()).unwrap();
    runtime.dispatch(Message::Increment).unwrap();
    let dispatch = runtime.dispatcher();

    let last = runtime.unmount();

    assert_eq!(last, State::new(1, 0));
    assert!(!dispatch.send(Message::Increment));
    assert!(doc.borrow().find_by_id(ids::VALUE).is_none());
}
