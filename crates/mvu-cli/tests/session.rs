//! Script-driven sessions against the real application.

use mvu_cli::script::{Step, parse_script};
use mvu_cli::session::{self, Session};
use mvu_counter::State;

const SCENARIO: &str = "\
# reference scenario
increment
increment
increment

row:500
scroll
";

#[test]
fn scripted_scenario_scrolls_to_last_row() {
    let steps = parse_script(SCENARIO).unwrap();
    assert_eq!(steps.len(), 5);

    let report = session::run(&steps).unwrap();
    assert_eq!(report.final_state, State::new(3, 500));
    assert_eq!(report.scrolls.len(), 1);
    assert_eq!(report.last_scroll_target(), Some("row-500"));
    assert_eq!(report.stats.messages_applied, 4);
    assert_eq!(report.stats.faults, 0);
}

#[test]
fn garbage_row_input_resets_row() {
    let steps = parse_script("row:42\nrow:forty-two\n").unwrap();
    let report = session::run(&steps).unwrap();
    assert_eq!(report.steps[0].state.row, 42);
    assert_eq!(report.steps[1].state.row, 0);
}

#[test]
fn session_keeps_document_in_sync() {
    let mut session = Session::start().unwrap();
    session.apply(&Step::Decrement).unwrap();
    session.apply(&Step::Decrement).unwrap();

    assert_eq!(session.state(), State::new(-2, 0));
    let document = session.runtime().document().borrow();
    assert_eq!(
        document.text_of(mvu_counter::ids::VALUE).as_deref(),
        Some("-2")
    );
}

#[test]
fn report_serializes_steps_and_scrolls() {
    let steps = [Step::Row("7".to_string()), Step::Scroll];
    let report = session::run(&steps).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["final_state"]["row"], 7);
    assert_eq!(json["steps"][0]["step"]["step"], "row");
    assert_eq!(json["steps"][0]["step"]["text"], "7");
    assert_eq!(json["steps"][1]["scrolled_to"], "row-7");
    assert_eq!(json["scrolls"][0]["target"], "row-7");
}
