/// Marker trait for reducer state.
///
/// Cloneable and comparable so tests can snapshot a state, run a transition
/// and assert on what changed.
pub trait UiState: Clone + PartialEq + Send + 'static {}
