//! Terminal input decoding.
//!
//! Turns the raw bytes a terminal emulator sends (plain characters, control
//! codes, CSI/SS3 escape sequences, UTF-8) into [`KeyInput`] values. The
//! parser is transport agnostic: feed it whatever arrives from a tty, a pty
//! or a network socket.

mod event;
mod parser;

pub use event::{InputEvent, KeyInput, KeyKind, NavKey};
pub use parser::InputParser;
