use super::intent::Intent;
use super::state::UiState;

/// What the driver should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Draw the returned state one last time, then stop.
    Quit,
}

/// The only place state transitions happen.
///
/// `reduce` must be pure and total: every `(state, intent)` pair has a
/// successor and there is no error path.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Control);
}
