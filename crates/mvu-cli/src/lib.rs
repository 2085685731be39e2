//! Headless host for the MVU counter application.
//!
//! Drives the application through scripted user interactions against an
//! in-memory document and reports what happened.

pub mod logging;
pub mod preview;
pub mod script;
pub mod session;
pub mod settings;
