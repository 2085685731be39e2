//! The runtime loop.
//!
//! [`Runtime`] owns the single state cell. It is the only writer of that cell
//! and the only consumer of the mailbox behind every [`Dispatch`].
//!
//! # Pass structure
//!
//! 1. Pop the oldest queued message (`Idle` → `Rendering`)
//! 2. `update(message, state)` → next state
//! 3. `view(next, dispatch)` → next tree
//! 4. `diff(committed, next)` → patches, committed atomically to the document
//! 5. Swap in the next state and tree (`Rendering` → `Idle`)
//!
//! Messages sent while a pass is in flight (for example from inside `view`)
//! wait in the mailbox and run after it, in arrival order.
//!
//! A panic in `update` or `view`, or a rejected commit, aborts the pass: the
//! message is dropped, the previous state and UI stay, and the error is
//! returned. Messages still queued are left for the next [`Runtime::drain`].
//! A document the host is still borrowing stops the drain before anything is
//! popped.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, debug_span, warn};

use crate::dispatch::{Dispatch, Mailbox};
use crate::document::SharedDocument;
use crate::error::RuntimeError;
use crate::program::Program;
use crate::reconcile::diff;
use crate::tree::{Event, Node};

/// Loop phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Holding the current state, nothing in flight.
    Idle,
    /// A render/reconcile pass is running.
    Rendering,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Rendering => f.write_str("rendering"),
        }
    }
}

/// Counters describing the loop's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeStats {
    /// Committed renders, including the initial one.
    pub renders: u64,
    /// Messages whose pass committed.
    pub messages_applied: u64,
    /// Passes aborted by a fault or rejected commit.
    pub faults: u64,
    /// Patches committed across all passes.
    pub patches: u64,
}

/// A running MVU loop bound to a document mount point.
pub struct Runtime<P: Program> {
    program: P,
    state: P::State,
    tree: Node,
    phase: Phase,
    mailbox: Rc<RefCell<Mailbox<P::Message>>>,
    dispatch: Dispatch<P::Message>,
    document: SharedDocument,
    mount_point: String,
    stats: RuntimeStats,
}

impl<P: Program> Runtime<P> {
    /// Start the loop.
    ///
    /// Produces the initial state, renders it once and mounts the result at
    /// `mount_point`. Messages sent during that first render are processed
    /// before this returns.
    ///
    /// Errors before the tree is mounted are returned. Once mounted, the
    /// runtime is always returned: a fault while draining the startup
    /// messages only aborts that pass, leaving the initial state and UI live.
    pub fn start(
        program: P,
        mount_point: &str,
        document: SharedDocument,
    ) -> Result<Self, RuntimeError> {
        let span = debug_span!("runtime_start", mount_point);
        let _guard = span.enter();

        let mailbox = Rc::new(RefCell::new(Mailbox::new()));
        let dispatch = Dispatch::new(&mailbox);

        let state = catch_fault(|| program.init())
            .map_err(|reason| RuntimeError::InitFault { reason })?;
        let tree = catch_fault(|| program.view(&state, &dispatch))
            .map_err(|reason| RuntimeError::ViewFault { reason })?;
        document
            .try_borrow_mut()
            .map_err(|_| RuntimeError::DocumentBusy)?
            .mount(mount_point, &tree)?;
        debug!(?state, "initial render mounted");

        let mut runtime = Self {
            program,
            state,
            tree,
            phase: Phase::Idle,
            mailbox,
            dispatch,
            document,
            mount_point: mount_point.to_string(),
            stats: RuntimeStats {
                renders: 1,
                ..RuntimeStats::default()
            },
        };
        if let Err(error) = runtime.drain() {
            debug!(%error, pending = runtime.pending(), "startup drain stopped early");
        }
        Ok(runtime)
    }

    /// A dispatch handle bound to this loop.
    pub fn dispatcher(&self) -> Dispatch<P::Message> {
        self.dispatch.clone()
    }

    /// Enqueue a message and process everything queued.
    ///
    /// Returns the number of messages applied.
    pub fn dispatch(&mut self, message: P::Message) -> Result<usize, RuntimeError> {
        self.dispatch.send(message);
        self.drain()
    }

    /// Deliver a user interaction to the live element with the given id, then
    /// process whatever the handler dispatched.
    pub fn trigger(&mut self, id: &str, event: Event) -> Result<usize, RuntimeError> {
        let kind = event.kind();
        let handler = {
            let document = self
                .document
                .try_borrow()
                .map_err(|_| RuntimeError::DocumentBusy)?;
            if document.find_by_id(id).is_none() {
                return Err(RuntimeError::TargetNotFound { id: id.to_string() });
            }
            document
                .handler_for(id, kind)
                .ok_or_else(|| RuntimeError::NoHandler {
                    id: id.to_string(),
                    event: kind,
                })?
        };

        debug!(target_id = id, event = %kind, "delivering event");
        handler.call(&event);
        self.drain()
    }

    /// Process queued messages in arrival order until the mailbox is empty.
    ///
    /// Stops at the first failing pass. Returns the number of messages applied.
    ///
    /// If the host holds a borrow of the document, nothing is popped and
    /// [`RuntimeError::DocumentBusy`] is returned with the queue intact.
    pub fn drain(&mut self) -> Result<usize, RuntimeError> {
        let mut applied = 0;
        loop {
            if self.pending() > 0 && self.document.try_borrow_mut().is_err() {
                return Err(RuntimeError::DocumentBusy);
            }
            let next = self.mailbox.borrow_mut().pop();
            let Some(message) = next else {
                break;
            };
            self.step(message)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn step(&mut self, message: P::Message) -> Result<(), RuntimeError> {
        let span = debug_span!("render_pass", pass = self.stats.renders);
        let _guard = span.enter();

        self.phase = Phase::Rendering;
        let result = self.render_pass(message);
        self.phase = Phase::Idle;

        if let Err(error) = &result {
            self.stats.faults += 1;
            warn!(%error, "render pass aborted, previous state retained");
        }
        result
    }

    fn render_pass(&mut self, message: P::Message) -> Result<(), RuntimeError> {
        let message_debug = format!("{message:?}");
        let program = &self.program;
        let current = &self.state;
        let dispatch = &self.dispatch;

        let next = catch_fault(|| program.update(message, current)).map_err(|reason| {
            RuntimeError::UpdateFault {
                message_debug: message_debug.clone(),
                reason,
            }
        })?;
        let tree = catch_fault(|| program.view(&next, dispatch))
            .map_err(|reason| RuntimeError::ViewFault { reason })?;

        let patches = diff(&self.tree, &tree);
        self.document
            .try_borrow_mut()
            .map_err(|_| RuntimeError::DocumentBusy)?
            .commit(&patches)?;

        debug!(
            message = %message_debug,
            state = ?next,
            patches = patches.len(),
            "pass committed"
        );
        self.state = next;
        self.tree = tree;
        self.stats.renders += 1;
        self.stats.messages_applied += 1;
        self.stats.patches += patches.len() as u64;
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> &P::State {
        &self.state
    }

    /// Last committed tree.
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Current phase. Always `Idle` between calls.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Loop counters.
    pub fn stats(&self) -> RuntimeStats {
        self.stats
    }

    /// Number of queued messages.
    pub fn pending(&self) -> usize {
        self.mailbox.borrow().len()
    }

    /// The document this loop renders into.
    pub fn document(&self) -> &SharedDocument {
        &self.document
    }


    /// Tear the loop down.
    ///
    /// Detaches the live tree and drops the mailbox, so every outstanding
    /// [`Dispatch`] turns into a no-op. Returns the final state.
    pub fn unmount(self) -> P::State {
        match self.document.try_borrow_mut() {
            Ok(mut document) => {
                document.unmount();
            }
            Err(_) => warn!("document busy during unmount, tree left attached"),
        }
        debug!(mount_point = %self.mount_point, stats = ?self.stats, "runtime torn down");
        self.state
    }
}

/// Run application code, turning a panic into its message.
fn catch_fault<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
