//! Application state.

use serde::{Deserialize, Serialize};

/// The application model.
///
/// `row` is not clamped here. Out-of-range values are accepted and only
/// gated where the scroll control decides whether to act.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// Counter shown in the heading.
    pub value: i64,
    /// Row targeted by the scroll control.
    pub row: i64,
}

impl State {
    /// Create a state with explicit values.
    pub fn new(value: i64, row: i64) -> Self {
        Self { value, row }
    }
}

/// Initial state: `{ value: 0, row: 0 }`.
pub fn init() -> State {
    State::default()
}
