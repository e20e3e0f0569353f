use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIntent {
    /// Client terminal changed size.
    Resize { width: u16, height: u16 },
    MoveUp,
    MoveDown,
    /// Flip selection of the item under the cursor.
    ToggleSelect,
    Quit,
    /// Timer tick; advances the spinner only.
    Tick,
    /// Key with no binding. Still causes a (identical) redraw.
    Unrecognized,
}

impl Intent for MenuIntent {}
