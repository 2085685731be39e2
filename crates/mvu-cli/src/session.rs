//! Headless sessions: drive the counter application with simulated input.

use mvu_counter::{CounterApp, State};
use mvu_runtime::{Document, Runtime, RuntimeError, RuntimeStats, ScrollRequest};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::script::Step;

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// 1-based position in the session.
    pub index: usize,
    pub step: Step,
    /// State after the step was processed.
    pub state: State,
    /// Messages the step caused to be applied.
    pub applied: usize,
    /// Element brought into view by the step, if any.
    pub scrolled_to: Option<String>,
}

/// Result of a whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub steps: Vec<StepRecord>,
    pub final_state: State,
    pub stats: RuntimeStats,
    /// Every scroll request the document accepted, in order.
    pub scrolls: Vec<ScrollRequest>,
}

impl SessionReport {
    /// Target of the most recent scroll, if any.
    pub fn last_scroll_target(&self) -> Option<&str> {
        self.scrolls.last().map(|request| request.target.as_str())
    }
}

/// A running application inside a private in-memory document.
pub struct Session {
    runtime: Runtime<CounterApp>,
    records: Vec<StepRecord>,
}

impl Session {
    /// Create a document, mount the application and render it once.
    pub fn start() -> Result<Self, RuntimeError> {
        let document = Document::with_mount_point(mvu_counter::MOUNT_POINT).into_shared();
        let runtime = mvu_counter::start(document)?;
        Ok(Self {
            runtime,
            records: Vec::new(),
        })
    }

    /// Current application state.
    pub fn state(&self) -> State {
        *self.runtime.state()
    }

    /// The underlying loop.
    pub fn runtime(&self) -> &Runtime<CounterApp> {
        &self.runtime
    }

    /// Deliver one interaction and record what it did.
    pub fn apply(&mut self, step: &Step) -> Result<&StepRecord, RuntimeError> {
        let (target, event) = step.to_event();
        let scrolls_before = self.scroll_count();

        let applied = self.runtime.trigger(target, event)?;

        let scrolled_to = {
            let document = self.runtime.document().borrow();
            document.scroll_log()[scrolls_before..]
                .last()
                .map(|request| request.target.clone())
        };
        let record = StepRecord {
            index: self.records.len() + 1,
            step: step.clone(),
            state: *self.runtime.state(),
            applied,
            scrolled_to,
        };
        debug!(step = %step, state = ?record.state, applied, "step processed");
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Tear the application down and summarize the session.
    pub fn finish(self) -> SessionReport {
        let stats = self.runtime.stats();
        let scrolls = self.runtime.document().borrow().scroll_log().to_vec();
        let final_state = self.runtime.unmount();
        info!(
            steps = self.records.len(),
            value = final_state.value,
            row = final_state.row,
            scrolls = scrolls.len(),
            "session finished"
        );
        SessionReport {
            steps: self.records,
            final_state,
            stats,
            scrolls,
        }
    }

    fn scroll_count(&self) -> usize {
        self.runtime.document().borrow().scroll_log().len()
    }
}

/// Run `steps` against a fresh application.
pub fn run(steps: &[Step]) -> Result<SessionReport, RuntimeError> {
    let span = info_span!("session", steps = steps.len());
    let _guard = span.enter();

    let mut session = Session::start()?;
    for step in steps {
        session.apply(step)?;
    }
    Ok(session.finish())
}
