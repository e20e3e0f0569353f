use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::ui::layout::{centered_offset, wrap_width, wrap_words};
use crate::ui::menu::MenuState;
use crate::ui::spinner;
use crate::ui::theme::{help_key_style, help_text_style, item_style, spinner_style};

pub const PADDING_X: u16 = 2;
pub const PADDING_Y: u16 = 1;
const BORDER: u16 = 1;

const HELP: &[(&str, &str)] = &[
    ("j", " down · "),
    ("k", " up · "),
    ("spc", " select · "),
    ("q", " quit "),
];

/// One laid-out frame: the box content plus where the box sits on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFrame {
    pub lines: Vec<Line<'static>>,
    pub box_width: u16,
    pub box_height: u16,
    /// Column of the box's left border. May be negative.
    pub x_offset: i32,
    /// Row of the box's top border. May be negative.
    pub y_offset: i32,
}

/// Lay out `state` as a centered, bordered box. Pure and deterministic.
pub fn render(state: &MenuState) -> MenuFrame {
    let detail_width = wrap_width(state.viewport.width);
    let mut lines = vec![Line::default(), header_line(state), Line::default()];

    for (index, item) in state.items.iter().enumerate() {
        let cursor = if index == state.cursor { ">" } else { " " };
        let checked = if state.is_selected(index) { "x" } else { " " };
        lines.push(Line::styled(
            format!("{cursor} [{checked}] {}", item.label),
            item_style(),
        ));

        if !state.is_selected(index) || item.detail.is_empty() {
            continue;
        }
        lines.push(Line::default());
        for row in wrap_words(&item.detail, detail_width) {
            lines.push(Line::styled(row, item_style()));
        }
        lines.push(Line::default());
    }

    lines.push(Line::default());
    lines.push(Line::default());
    lines.push(help_line());

    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let content_width = u16::try_from(content_width).unwrap_or(u16::MAX);
    let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let box_width = content_width
        .saturating_add(2 * PADDING_X)
        .saturating_add(2 * BORDER);
    let box_height = content_height
        .saturating_add(2 * PADDING_Y)
        .saturating_add(2 * BORDER);

    MenuFrame {
        lines,
        box_width,
        box_height,
        x_offset: centered_offset(state.viewport.width, box_width),
        y_offset: centered_offset(state.viewport.height, box_height),
    }
}

fn header_line(state: &MenuState) -> Line<'static> {
    Line::from(vec![
        Span::styled(spinner::glyph(state.spinner), spinner_style()),
        Span::raw(format!(" {} ", state.title)),
    ])
}

fn help_line() -> Line<'static> {
    let spans = HELP.iter().flat_map(|(key, text)| {
        [
            Span::styled(*key, help_key_style()),
            Span::styled(*text, help_text_style()),
        ]
    });
    Line::from(spans.collect::<Vec<_>>())
}

impl MenuFrame {
    /// Draw the box into a buffer exactly `box_width` x `box_height`.
    pub fn render_box(&self) -> Buffer {
        let area = Rect::new(0, 0, self.box_width, self.box_height);
        let mut buf = Buffer::empty(area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::new(PADDING_X, PADDING_X, PADDING_Y, PADDING_Y));
        Paragraph::new(Text::from(self.lines.clone()))
            .block(block)
            .render(area, &mut buf);
        buf
    }

    /// Box rows as plain text, styling dropped.
    pub fn box_rows(&self) -> Vec<String> {
        let buf = self.render_box();
        (0..self.box_height)
            .map(|y| {
                (0..self.box_width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    /// Content lines as plain text, without border or padding.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::menu::{MenuItem, Viewport};
    use std::sync::Arc;

    fn state(width: u16, height: u16) -> MenuState {
        let items: Arc<[MenuItem]> = vec![
            MenuItem::new("info", "about me"),
            MenuItem::new("contact", "mail@example.com"),
        ]
        .into();
        MenuState::new(Arc::from("title"), items, Viewport { width, height })
    }

    #[test]
    fn box_dimensions_include_border_and_padding() {
        let frame = render(&state(80, 24));
        let widest = frame.lines.iter().map(Line::width).max().unwrap();
        assert_eq!(usize::from(frame.box_width), widest + 6);
        assert_eq!(usize::from(frame.box_height), frame.lines.len() + 4);
    }

    #[test]
    fn box_rows_have_rounded_corners() {
        let frame = render(&state(80, 24));
        let rows = frame.box_rows();
        assert_eq!(rows.len(), usize::from(frame.box_height));
        assert!(rows[0].starts_with('╭') && rows[0].ends_with('╮'));
        let last = rows.last().unwrap();
        assert!(last.starts_with('╰') && last.ends_with('╯'));
    }

    #[test]
    fn tiny_viewport_gives_negative_offsets() {
        let frame = render(&state(4, 2));
        assert!(frame.x_offset < 0);
        assert!(frame.y_offset < 0);
    }
}
