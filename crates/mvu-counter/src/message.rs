//! Application messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every transition the application knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "row")]
pub enum Message {
    /// Add one to `value`.
    Increment,
    /// Subtract one from `value`.
    Decrement,
    /// Replace `row`.
    SetRow(i64),
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increment => f.write_str("increment"),
            Self::Decrement => f.write_str("decrement"),
            Self::SetRow(row) => write!(f, "set-row {row}"),
        }
    }
}
