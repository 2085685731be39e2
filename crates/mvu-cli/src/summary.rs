use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mvu_cli::session::{SessionReport, StepRecord};

use crate::types::ScenarioResult;

pub fn print_session(report: &SessionReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Step"),
        header_cell("Value"),
        header_cell("Row"),
        header_cell("Applied"),
        header_cell("Scrolled to"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in &report.steps {
        table.add_row(step_row(record));
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("FINAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.final_state.value).add_attribute(Attribute::Bold),
        Cell::new(report.final_state.row).add_attribute(Attribute::Bold),
        Cell::new(report.stats.messages_applied).add_attribute(Attribute::Bold),
        scroll_cell(report.last_scroll_target()),
    ]);
    println!("{table}");
    println!(
        "Renders: {}  Patches: {}  Faults: {}",
        report.stats.renders, report.stats.patches, report.stats.faults
    );
}

pub fn print_scenario(result: &ScenarioResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Expected"),
        header_cell("Actual"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for check in &result.checks {
        let outcome = if check.passed() {
            Cell::new("pass").fg(Color::Green)
        } else {
            Cell::new("FAIL")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(check.name),
            Cell::new(&check.expected),
            Cell::new(&check.actual),
            outcome,
        ]);
    }
    println!("{table}");
    let state = result.report.final_state;
    println!("Final state: value={} row={}", state.value, state.row);
    if result.passed() {
        println!("Scenario passed.");
    } else {
        println!("Scenario FAILED.");
    }
}

fn step_row(record: &StepRecord) -> Vec<Cell> {
    let applied = if record.applied == 0 {
        dim_cell(record.applied)
    } else {
        Cell::new(record.applied)
    };
    vec![
        Cell::new(record.index),
        Cell::new(record.step.to_string()).fg(Color::Blue),
        Cell::new(record.state.value),
        Cell::new(record.state.row),
        applied,
        scroll_cell(record.scrolled_to.as_deref()),
    ]
}

fn scroll_cell(target: Option<&str>) -> Cell {
    match target {
        Some(target) => Cell::new(target).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
