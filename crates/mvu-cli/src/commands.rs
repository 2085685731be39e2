use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use mvu_cli::preview::render_preview;
use mvu_cli::script::{Step, parse_script};
use mvu_cli::session::{self, SessionReport};
use mvu_counter::{MAX_SCROLL_ROW, State, row_element_id};
use mvu_runtime::{ScrollAlignment, ScrollBehavior};
use tracing::info;

use crate::cli::{RenderArgs, RunArgs};
use crate::types::{ScenarioCheck, ScenarioResult};

pub fn run_steps(args: &RunArgs) -> Result<SessionReport> {
    let mut steps = args.steps.clone();
    if let Some(path) = &args.script {
        steps.extend(read_script(path)?);
    }
    info!(steps = steps.len(), "replaying session");
    session::run(&steps).context("session aborted")
}

pub fn run_render(args: &RenderArgs, default_rows: usize) -> String {
    let rows = args.rows.unwrap_or(default_rows);
    let state = State::new(args.value, args.row);
    render_preview(&state, rows).to_markup()
}

/// Three increments, type the last row, click scroll.
pub fn run_scenario() -> Result<ScenarioResult> {
    let steps = vec![
        Step::Increment,
        Step::Increment,
        Step::Increment,
        Step::Row(MAX_SCROLL_ROW.to_string()),
        Step::Scroll,
    ];
    let report = session::run(&steps).context("scenario aborted")?;

    let expected_target = row_element_id(MAX_SCROLL_ROW);
    let last = report.scrolls.last();
    let scroll_applied = report.steps.last().map_or(0, |record| record.applied);
    let checks = vec![
        ScenarioCheck::new("value", 3, report.final_state.value),
        ScenarioCheck::new("row", MAX_SCROLL_ROW, report.final_state.row),
        ScenarioCheck::new("scroll requests", 1, report.scrolls.len()),
        ScenarioCheck::new(
            "scroll target",
            &expected_target,
            last.map_or("-", |request| request.target.as_str()),
        ),
        ScenarioCheck::new(
            "scroll behavior",
            format!("{:?}", ScrollBehavior::Smooth),
            last.map_or_else(
                || "-".to_string(),
                |r| format!("{:?}", r.options.behavior),
            ),
        ),
        ScenarioCheck::new(
            "scroll alignment",
            format!("{:?}/{:?}", ScrollAlignment::Nearest, ScrollAlignment::Nearest),
            last.map_or_else(
                || "-".to_string(),
                |r| format!("{:?}/{:?}", r.options.block, r.options.inline),
            ),
        ),
        ScenarioCheck::new("messages from scroll", 0, scroll_applied),
    ];
    Ok(ScenarioResult { report, checks })
}

fn read_script(path: &Path) -> Result<Vec<Step>> {
    let source = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read script from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?
    };
    parse_script(&source).with_context(|| format!("invalid script {}", path.display()))
}
