use crate::event::{InputEvent, KeyInput, KeyKind, NavKey};

const ESC: u8 = 0x1b;

/// Longest CSI sequence buffered before it is given up as unknown.
const MAX_CSI_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    /// Saw ESC, waiting to learn whether a sequence follows.
    Escape,
    /// Inside `ESC [ ...`.
    Csi,
    /// Inside `ESC O x`.
    Ss3,
    /// Inside a multi-byte UTF-8 character, `remaining` continuation bytes left.
    Utf8 { remaining: u8 },
}

/// Incremental terminal input parser.
///
/// Bytes may arrive split at any point; incomplete sequences are buffered
/// until the next [`feed`](Self::feed). A lone ESC cannot be told apart from
/// the start of a sequence, so callers wait a short while and then call
/// [`flush`](Self::flush) when [`has_pending`](Self::has_pending) is true.
#[derive(Debug)]
pub struct InputParser {
    state: State,
    buf: Vec<u8>,
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InputParser {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            buf: Vec::with_capacity(16),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.state != State::Ground
    }

    /// Feed raw bytes, returning every event completed by them.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for &byte in bytes {
            if let Some(key) = self.advance(byte) {
                events.push(InputEvent::Key(key));
            }
        }
        events
    }

    /// Emit whatever is buffered. A bare ESC becomes [`KeyKind::Escape`],
    /// truncated sequences become [`KeyKind::Unknown`].
    pub fn flush(&mut self) -> Vec<InputEvent> {
        let state = std::mem::replace(&mut self.state, State::Ground);
        let raw = std::mem::take(&mut self.buf);
        let kind = match state {
            State::Ground => return Vec::new(),
            State::Escape => KeyKind::Escape,
            State::Csi | State::Ss3 | State::Utf8 { .. } => KeyKind::Unknown,
        };
        vec![InputEvent::Key(KeyInput::new(raw, kind))]
    }

    fn advance(&mut self, byte: u8) -> Option<KeyInput> {
        match self.state {
            State::Ground => self.ground(byte),
            State::Escape => self.escape(byte),
            State::Csi => {
                self.buf.push(byte);
                if (0x40..=0x7e).contains(&byte) {
                    let kind = csi_key(&self.buf);
                    Some(self.finish(kind))
                } else if (0x20..=0x3f).contains(&byte) && self.buf.len() < MAX_CSI_LEN {
                    None
                } else {
                    // Malformed or runaway sequence; drop it.
                    Some(self.finish(KeyKind::Unknown))
                }
            }
            State::Ss3 => {
                self.buf.push(byte);
                let kind = match byte {
                    b'A' => KeyKind::Nav(NavKey::Up),
                    b'B' => KeyKind::Nav(NavKey::Down),
                    b'C' => KeyKind::Nav(NavKey::Right),
                    b'D' => KeyKind::Nav(NavKey::Left),
                    b'H' => KeyKind::Nav(NavKey::Home),
                    b'F' => KeyKind::Nav(NavKey::End),
                    _ => KeyKind::Unknown,
                };
                Some(self.finish(kind))
            }
            State::Utf8 { remaining } => {
                if byte & 0xc0 != 0x80 {
                    // Broken continuation: drop the partial character and
                    // reprocess the byte.
                    self.buf.clear();
                    self.state = State::Ground;
                    return self.ground(byte);
                }
                self.buf.push(byte);
                if remaining > 1 {
                    self.state = State::Utf8 {
                        remaining: remaining - 1,
                    };
                    return None;
                }
                let kind = std::str::from_utf8(&self.buf)
                    .ok()
                    .and_then(|s| s.chars().next())
                    .map(KeyKind::Char)
                    .unwrap_or(KeyKind::Unknown);
                Some(self.finish(kind))
            }
        }
    }

    fn ground(&mut self, byte: u8) -> Option<KeyInput> {
        let kind = match byte {
            ESC => {
                self.buf.push(byte);
                self.state = State::Escape;
                return None;
            }
            b'\r' | b'\n' => KeyKind::Enter,
            b'\t' => KeyKind::Tab,
            0x7f | 0x08 => KeyKind::Backspace,
            0x01..=0x1a => KeyKind::Ctrl((b'a' + byte - 1) as char),
            0x20..=0x7e => KeyKind::Char(byte as char),
            0xc0..=0xdf => return self.start_utf8(byte, 1),
            0xe0..=0xef => return self.start_utf8(byte, 2),
            0xf0..=0xf7 => return self.start_utf8(byte, 3),
            _ => KeyKind::Unknown,
        };
        Some(KeyInput::new(vec![byte], kind))
    }

    fn escape(&mut self, byte: u8) -> Option<KeyInput> {
        match byte {
            b'[' => {
                self.buf.push(byte);
                self.state = State::Csi;
                None
            }
            b'O' => {
                self.buf.push(byte);
                self.state = State::Ss3;
                None
            }
            ESC => {
                // Double ESC: the first one was a bare Escape.
                let raw = std::mem::replace(&mut self.buf, vec![ESC]);
                Some(KeyInput::new(raw, KeyKind::Escape))
            }
            _ => {
                self.buf.clear();
                self.state = State::Ground;
                let inner = self.ground(byte)?;
                let mut raw = vec![ESC];
                raw.extend_from_slice(&inner.raw);
                Some(KeyInput::new(raw, KeyKind::Alt(Box::new(inner.kind))))
            }
        }
    }

    fn start_utf8(&mut self, byte: u8, remaining: u8) -> Option<KeyInput> {
        self.buf.push(byte);
        self.state = State::Utf8 { remaining };
        None
    }

    fn finish(&mut self, kind: KeyKind) -> KeyInput {
        self.state = State::Ground;
        KeyInput::new(std::mem::take(&mut self.buf), kind)
    }
}

/// Map a complete CSI sequence (`ESC [ params final`) to a key.
fn csi_key(seq: &[u8]) -> KeyKind {
    let Some((&last, body)) = seq.split_last() else {
        return KeyKind::Unknown;
    };
    // body starts with ESC '['
    let params = body.get(2..).unwrap_or_default();
    match last {
        b'A' => KeyKind::Nav(NavKey::Up),
        b'B' => KeyKind::Nav(NavKey::Down),
        b'C' => KeyKind::Nav(NavKey::Right),
        b'D' => KeyKind::Nav(NavKey::Left),
        b'H' => KeyKind::Nav(NavKey::Home),
        b'F' => KeyKind::Nav(NavKey::End),
        b'~' => {
            let first = params.split(|&b| b == b';').next().unwrap_or_default();
            match first {
                b"1" | b"7" => KeyKind::Nav(NavKey::Home),
                b"2" => KeyKind::Nav(NavKey::Insert),
                b"3" => KeyKind::Nav(NavKey::Delete),
                b"4" | b"8" => KeyKind::Nav(NavKey::End),
                b"5" => KeyKind::Nav(NavKey::PageUp),
                b"6" => KeyKind::Nav(NavKey::PageDown),
                _ => KeyKind::Unknown,
            }
        }
        _ => KeyKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(events: Vec<InputEvent>) -> Vec<KeyKind> {
        events
            .into_iter()
            .map(|InputEvent::Key(key)| key.kind)
            .collect()
    }

    #[test]
    fn plain_chars_and_controls() {
        let mut parser = InputParser::new();
        let got = kinds(parser.feed(b"jk q\r\x03"));
        assert_eq!(
            got,
            vec![
                KeyKind::Char('j'),
                KeyKind::Char('k'),
                KeyKind::Char(' '),
                KeyKind::Char('q'),
                KeyKind::Enter,
                KeyKind::Ctrl('c'),
            ]
        );
        assert!(!parser.has_pending());
    }

    #[test]
    fn runaway_csi_is_cut_off() {
        let mut parser = InputParser::new();
        let mut bytes = b"\x1b[".to_vec();
        bytes.extend(std::iter::repeat(b'1').take(10_000));
        let got = kinds(parser.feed(&bytes));
        assert_eq!(got.first(), Some(&KeyKind::Unknown));
        assert!(parser.buf.len() < MAX_CSI_LEN);
        assert!(!parser.has_pending());
    }

    #[test]
    fn csi_and_ss3_arrows() {
        let mut parser = InputParser::new();
        let got = kinds(parser.feed(b"\x1b[A\x1b[B\x1bOA\x1bOB"));
        assert_eq!(
            got,
            vec![
                KeyKind::Nav(NavKey::Up),
                KeyKind::Nav(NavKey::Down),
                KeyKind::Nav(NavKey::Up),
                KeyKind::Nav(NavKey::Down),
            ]
        );
    }

    #[test]
    fn sequence_split_across_feeds() {
        let mut parser = InputParser::new();
        assert!(parser.feed(b"\x1b").is_empty());
        assert!(parser.has_pending());
        assert!(parser.feed(b"[").is_empty());
        let got = kinds(parser.feed(b"B"));
        assert_eq!(got, vec![KeyKind::Nav(NavKey::Down)]);
    }

    #[test]
    fn lone_escape_needs_flush() {
        let mut parser = InputParser::new();
        assert!(parser.feed(b"\x1b").is_empty());
        let got = kinds(parser.flush());
        assert_eq!(got, vec![KeyKind::Escape]);
        assert!(!parser.has_pending());
        assert!(parser.flush().is_empty());
    }

    #[test]
    fn tilde_sequences_with_modifiers() {
        let mut parser = InputParser::new();
        let got = kinds(parser.feed(b"\x1b[5~\x1b[3;5~"));
        assert_eq!(
            got,
            vec![KeyKind::Nav(NavKey::PageUp), KeyKind::Nav(NavKey::Delete)]
        );
    }

    #[test]
    fn alt_prefixed_char() {
        let mut parser = InputParser::new();
        let got = kinds(parser.feed(b"\x1bj"));
        assert_eq!(got, vec![KeyKind::Alt(Box::new(KeyKind::Char('j')))]);
    }

    #[test]
    fn utf8_char_is_decoded() {
        let mut parser = InputParser::new();
        let bytes = "é".as_bytes();
        assert!(parser.feed(&bytes[..1]).is_empty());
        let got = kinds(parser.feed(&bytes[1..]));
        assert_eq!(got, vec![KeyKind::Char('é')]);
    }

    #[test]
    fn raw_bytes_are_kept() {
        let mut parser = InputParser::new();
        let events = parser.feed(b"\x1b[A");
        let InputEvent::Key(key) = &events[0];
        assert_eq!(key.raw, b"\x1b[A".to_vec());
    }
}
