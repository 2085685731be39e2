//! The program contract supplied by an application.

use std::fmt::Debug;

use crate::dispatch::Dispatch;
use crate::tree::Node;

/// An MVU application: initial state, transition function and view function.
///
/// Implementations must keep `update` and `view` pure. Side effects belong in
/// event handlers built by `view`, which may either send a message through the
/// given [`Dispatch`] or call a host capability injected at construction time.
///
/// # Example
///
/// ```ignore
/// struct Counter;
///
/// impl Program for Counter {
///     type State = i64;
///     type Message = ();
///
///     fn init(&self) -> i64 { 0 }
///     fn update(&self, _msg: (), state: &i64) -> i64 { state + 1 }
///     fn view(&self, state: &i64, dispatch: &Dispatch<()>) -> Node {
///         let dispatch = dispatch.clone();
///         Element::new("button")
///             .on(EventKind::Click, move |_| { dispatch.send(()); })
///             .text(state.to_string())
///             .into_node()
///     }
/// }
/// ```
pub trait Program {
    /// Immutable application model.
    type State: Clone + Debug;

    /// Closed set of transitions.
    type Message: Debug;

    /// Produce the initial state. Called once at start.
    fn init(&self) -> Self::State;

    /// Compute the next state. Must not mutate anything.
    fn update(&self, message: Self::Message, state: &Self::State) -> Self::State;

    /// Describe the UI for a state.
    fn view(&self, state: &Self::State, dispatch: &Dispatch<Self::Message>) -> Node;
}
