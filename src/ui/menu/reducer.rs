use crate::ui::menu::intent::MenuIntent;
use crate::ui::menu::state::{MenuState, Viewport};
use crate::ui::mvi::{Control, Reducer};
use crate::ui::spinner;

pub struct MenuReducer;

impl Reducer for MenuReducer {
    type State = MenuState;
    type Intent = MenuIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> (Self::State, Control) {
        match intent {
            MenuIntent::Resize { width, height } => {
                state.viewport = Viewport { width, height };
            }
            MenuIntent::MoveUp => {
                state.cursor = state.cursor.saturating_sub(1);
            }
            MenuIntent::MoveDown => {
                let last = state.items.len().saturating_sub(1);
                state.cursor = (state.cursor + 1).min(last);
            }
            MenuIntent::ToggleSelect => {
                if !state.selected.remove(&state.cursor) {
                    state.selected.insert(state.cursor);
                }
            }
            MenuIntent::Quit => return (state, Control::Quit),
            MenuIntent::Tick => {
                state.spinner = spinner::next_phase(state.spinner);
            }
            MenuIntent::Unrecognized => {}
        }
        (state, Control::Continue)
    }
}
