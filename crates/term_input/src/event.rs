/// Navigation keys delivered as escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyKind {
    /// Printable character (ASCII or decoded UTF-8).
    Char(char),
    /// Control chord, stored as the lowercase letter (Ctrl+C is `Ctrl('c')`).
    Ctrl(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Nav(NavKey),
    /// ESC-prefixed key.
    Alt(Box<KeyKind>),
    /// Recognized as a complete sequence but not mapped to a key.
    Unknown,
}

/// A decoded key together with the bytes it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub raw: Vec<u8>,
    pub kind: KeyKind,
}

impl KeyInput {
    pub fn new(raw: impl Into<Vec<u8>>, kind: KeyKind) -> Self {
        Self {
            raw: raw.into(),
            kind,
        }
    }

    pub fn is_char(&self, needle: char) -> bool {
        matches!(self.kind, KeyKind::Char(ch) if ch == needle)
    }

    pub fn is_ctrl(&self, needle: char) -> bool {
        matches!(self.kind, KeyKind::Ctrl(ch) if ch.eq_ignore_ascii_case(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyInput),
}
