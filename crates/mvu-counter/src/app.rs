//! Program wiring and bootstrap.

use std::rc::Rc;

use mvu_runtime::{Dispatch, Node, Program, Runtime, RuntimeError, SharedDocument};

use crate::interop::{DocumentScroller, RowScroller};
use crate::message::Message;
use crate::state::{self, State};
use crate::update::update;
use crate::view::view;

/// Mount point the application renders into.
pub const MOUNT_POINT: &str = "app";

/// The counter application as an MVU [`Program`].
///
/// Carries the scroll capability handed to it by the host; the view passes it
/// on to the scroll control's handler.
#[derive(Clone)]
pub struct CounterApp {
    scroller: Rc<dyn RowScroller>,
}

impl CounterApp {
    /// Create the application with a custom scroll capability.
    pub fn new(scroller: impl RowScroller + 'static) -> Self {
        Self {
            scroller: Rc::new(scroller),
        }
    }

    /// Create the application scrolling within `document`.
    pub fn with_document(document: &SharedDocument) -> Self {
        Self::new(DocumentScroller::new(document))
    }
}

impl Program for CounterApp {
    type State = State;
    type Message = Message;

    fn init(&self) -> State {
        state::init()
    }

    fn update(&self, message: Message, state: &State) -> State {
        update(message, state)
    }

    fn view(&self, state: &State, dispatch: &Dispatch<Message>) -> Node {
        view(state, dispatch, &self.scroller)
    }
}

/// Start the application in `document` at [`MOUNT_POINT`].
///
/// The document must expose that mount point.
pub fn start(document: SharedDocument) -> Result<Runtime<CounterApp>, RuntimeError> {
    let app = CounterApp::with_document(&document);
    tracing::info!(mount_point = MOUNT_POINT, "starting counter application");
    Runtime::start(app, MOUNT_POINT, document)
}
