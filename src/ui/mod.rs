//! Menu session core: state, transitions, layout and painting.

pub mod input;
pub mod layout;
pub mod menu;
pub mod mvi;
pub mod painter;
pub mod render;
pub mod spinner;
pub mod theme;
