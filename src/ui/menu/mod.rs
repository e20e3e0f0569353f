mod intent;
mod reducer;
mod state;

pub use crate::config::MenuItem;
pub use intent::MenuIntent;
pub use reducer::MenuReducer;
pub use state::{MenuState, Viewport};
