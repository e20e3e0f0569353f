/// Marker trait for events consumed by a [`Reducer`](super::Reducer).
///
/// Intents are plain data: user keys, terminal resizes and timer ticks all
/// arrive as the same closed enum so a reducer can match on them exhaustively.
pub trait Intent: Send + 'static {}
