use ratatui::style::{Color, Style};

pub const ITEM_TEXT: Color = Color::Indexed(10);
pub const HELP_KEY: Color = Color::Indexed(8);
pub const HELP_TEXT: Color = Color::Indexed(238);
pub const SPINNER: Color = Color::Indexed(205);

pub fn item_style() -> Style {
    Style::default().fg(ITEM_TEXT)
}

pub fn help_key_style() -> Style {
    Style::default().fg(HELP_KEY)
}

pub fn help_text_style() -> Style {
    Style::default().fg(HELP_TEXT)
}

pub fn spinner_style() -> Style {
    Style::default().fg(SPINNER)
}
