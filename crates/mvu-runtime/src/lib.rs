//! Model-View-Update runtime.
//!
//! An application supplies a [`Program`]: an `init` producer, a pure
//! transition function and a pure view function returning a declarative
//! [`Node`] tree. The [`Runtime`] owns the state, drains dispatched messages
//! one pass at a time, and reconciles each new tree into a retained
//! [`Document`].
//!
//! # Modules
//!
//! - `tree` - declarative UI tree and event handlers
//! - `dispatch` - the capability to enqueue messages
//! - `program` - the application contract
//! - `reconcile` - tree diffing into patches
//! - `document` - retained live tree and host element facility
//! - `runtime` - the loop itself

pub mod dispatch;
pub mod document;
pub mod error;
pub mod program;
pub mod reconcile;
pub mod runtime;
pub mod tree;

pub use dispatch::{Dispatch, Mailbox};
pub use document::{
    Document, ElementHost, LiveElement, LiveNode, NodeId, ScrollAlignment, ScrollBehavior,
    ScrollIntoViewOptions, ScrollRequest, SharedDocument, WeakDocument,
};
pub use error::{DocumentError, RuntimeError};
pub use program::Program;
pub use reconcile::{NodePath, Patch, diff};
pub use runtime::{Phase, Runtime, RuntimeStats};
pub use tree::{Element, Event, EventKind, Handler, Node};
