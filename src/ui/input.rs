use term_input::{KeyInput, KeyKind, NavKey};

use crate::ui::menu::MenuIntent;

/// Fixed key bindings of the menu.
///
/// | key            | intent         |
/// |----------------|----------------|
/// | Up, `k`        | `MoveUp`       |
/// | Down, `j`      | `MoveDown`     |
/// | Enter, space   | `ToggleSelect` |
/// | `q`, Ctrl+C    | `Quit`         |
///
/// Everything else is `Unrecognized`.
pub fn decode_key(key: &KeyInput) -> MenuIntent {
    match key.kind {
        KeyKind::Nav(NavKey::Up) | KeyKind::Char('k') => MenuIntent::MoveUp,
        KeyKind::Nav(NavKey::Down) | KeyKind::Char('j') => MenuIntent::MoveDown,
        KeyKind::Enter | KeyKind::Char(' ') => MenuIntent::ToggleSelect,
        KeyKind::Char('q') => MenuIntent::Quit,
        _ if key.is_ctrl('c') => MenuIntent::Quit,
        _ => MenuIntent::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(kind: KeyKind) -> KeyInput {
        KeyInput::new(Vec::new(), kind)
    }

    #[test]
    fn vim_and_arrow_keys_move() {
        assert_eq!(decode_key(&key(KeyKind::Char('k'))), MenuIntent::MoveUp);
        assert_eq!(decode_key(&key(KeyKind::Nav(NavKey::Up))), MenuIntent::MoveUp);
        assert_eq!(decode_key(&key(KeyKind::Char('j'))), MenuIntent::MoveDown);
        assert_eq!(
            decode_key(&key(KeyKind::Nav(NavKey::Down))),
            MenuIntent::MoveDown
        );
    }

    #[test]
    fn enter_and_space_toggle() {
        assert_eq!(decode_key(&key(KeyKind::Enter)), MenuIntent::ToggleSelect);
        assert_eq!(decode_key(&key(KeyKind::Char(' '))), MenuIntent::ToggleSelect);
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        assert_eq!(decode_key(&key(KeyKind::Char('q'))), MenuIntent::Quit);
        assert_eq!(decode_key(&key(KeyKind::Ctrl('c'))), MenuIntent::Quit);
    }

    #[test]
    fn other_keys_are_unrecognized() {
        for kind in [
            KeyKind::Char('Q'),
            KeyKind::Char('x'),
            KeyKind::Escape,
            KeyKind::Ctrl('d'),
            KeyKind::Nav(NavKey::Left),
            KeyKind::Alt(Box::new(KeyKind::Char('j'))),
        ] {
            assert_eq!(decode_key(&key(kind)), MenuIntent::Unrecognized);
        }
    }
}
