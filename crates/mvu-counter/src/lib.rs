//! Counter with a scroll-to-row table, built on [`mvu_runtime`].
//!
//! The application follows the Model-View-Update pattern:
//!
//! - [`State`] - immutable model (`value`, `row`)
//! - [`Message`] - closed set of transitions
//! - [`update`] - pure transition function
//! - [`view`] - pure view function producing the UI tree
//! - [`interop`] - the one imperative escape hatch, scrolling a row into view
//!
//! [`app::start`] wires everything into a running [`mvu_runtime::Runtime`].

pub mod app;
pub mod interop;
pub mod message;
pub mod state;
pub mod update;
pub mod view;

pub use app::{CounterApp, MOUNT_POINT, start};
pub use interop::{DocumentScroller, RowScroller, scroll_to_row};
pub use message::Message;
pub use state::{State, init};
pub use update::update;
pub use view::{MAX_SCROLL_ROW, ROW_COUNT, ids, parse_row, row_element_id, view};
