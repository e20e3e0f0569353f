use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::MenuItem;
use crate::ui::mvi::UiState;

/// Client terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Per-connection menu state.
///
/// `items` and `title` come from configuration and are shared read-only
/// between sessions; everything else belongs to one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    pub viewport: Viewport,
    pub title: Arc<str>,
    pub items: Arc<[MenuItem]>,
    /// Always `< items.len()`.
    pub cursor: usize,
    pub selected: BTreeSet<usize>,
    /// Spinner phase, wraps at the glyph count.
    pub spinner: usize,
}

impl UiState for MenuState {}

impl MenuState {
    /// Fresh state for a new connection. `items` must not be empty.
    pub fn new(title: Arc<str>, items: Arc<[MenuItem]>, viewport: Viewport) -> Self {
        debug_assert!(!items.is_empty(), "menu needs at least one item");
        Self {
            viewport,
            title,
            items,
            cursor: 0,
            selected: BTreeSet::new(),
            spinner: 0,
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn detail_text(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.detail.as_str())
    }
}
