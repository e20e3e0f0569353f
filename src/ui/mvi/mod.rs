//! Model-View-Intent primitives for the menu session.
//!
//! ```text
//! Intent ──→ Reducer ──→ (State, Control) ──→ render ──→ Frame
//!    ↑                                                    │
//!    └──────────────── next key / tick ───────────────────┘
//! ```
//!
//! - **State**: everything needed to draw one frame
//! - **Intent**: a decoded key, a resize or a timer tick
//! - **Reducer**: pure `(State, Intent) -> (State, Control)`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{Control, Reducer};
pub use state::UiState;
