//! Transition function.

use crate::message::Message;
use crate::state::State;

/// Compute the state that follows `state` after `message`.
///
/// Total and side-effect free. `value` arithmetic wraps at the `i64` bounds.
pub fn update(message: Message, state: &State) -> State {
    match message {
        Message::Increment => State {
            value: state.value.wrapping_add(1),
            ..*state
        },
        Message::Decrement => State {
            value: state.value.wrapping_sub(1),
            ..*state
        },
        Message::SetRow(row) => State { row, ..*state },
    }
}
