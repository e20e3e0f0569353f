use std::io;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};

use crate::ui::menu::Viewport;
use crate::ui::render::MenuFrame;

/// Place the frame's box on a `viewport`-sized screen.
///
/// The returned buffer covers only the part of the box that is on screen,
/// addressed in screen coordinates. Its size is bounded by the box, not by
/// whatever size the client reports.
pub fn compose(frame: &MenuFrame, viewport: Viewport) -> Buffer {
    let visible = visible_area(frame, viewport);
    let mut screen = Buffer::empty(visible);
    if visible.is_empty() {
        return screen;
    }

    let boxed = frame.render_box();
    for y in visible.top()..visible.bottom() {
        let by = (i32::from(y) - frame.y_offset) as u16;
        for x in visible.left()..visible.right() {
            let bx = (i32::from(x) - frame.x_offset) as u16;
            screen[(x, y)] = boxed[(bx, by)].clone();
        }
    }
    screen
}

/// Intersection of the box with `[0, width) x [0, height)`.
fn visible_area(frame: &MenuFrame, viewport: Viewport) -> Rect {
    let span = |offset: i32, len: u16, limit: u16| {
        let start = offset.clamp(0, i32::from(limit));
        let end = (offset + i32::from(len)).clamp(start, i32::from(limit));
        (start as u16, (end - start) as u16)
    };
    let (x, width) = span(frame.x_offset, frame.box_width, viewport.width);
    let (y, height) = span(frame.y_offset, frame.box_height, viewport.height);
    Rect::new(x, y, width, height)
}

/// Turns frames into terminal output for one client.
///
/// The first paint, a viewport change, or the box moving redraws everything;
/// otherwise only cells that differ from the previous paint are sent.
#[derive(Debug, Default)]
pub struct ScreenPainter {
    previous: Option<(Viewport, Buffer)>,
}

impl ScreenPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes that switch the client into a clean full-screen mode.
    pub fn enter() -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        queue!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(out)
    }

    /// Bytes that give the client its normal screen back.
    pub fn leave() -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        queue!(
            out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        )?;
        Ok(out)
    }

    pub fn paint(&mut self, frame: &MenuFrame, viewport: Viewport) -> io::Result<Vec<u8>> {
        let screen = compose(frame, viewport);
        let mut out = Vec::new();

        match self.previous.as_ref() {
            Some((last_viewport, previous))
                if *last_viewport == viewport && previous.area == screen.area =>
            {
                write_cells(&mut out, previous.diff(&screen))?;
            }
            _ => {
                queue!(out, ResetColor, Clear(ClearType::All))?;
                let area = screen.area;
                let cells = (area.top()..area.bottom())
                    .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
                    .map(|(x, y)| (x, y, &screen[(x, y)]))
                    .filter(|(_, _, cell)| !is_blank(cell));
                write_cells(&mut out, cells)?;
            }
        }

        self.previous = Some((viewport, screen));
        Ok(out)
    }

    /// Area of the last composed screen, if anything was painted.
    pub fn painted_area(&self) -> Option<Rect> {
        self.previous.as_ref().map(|(_, screen)| screen.area)
    }
}

fn is_blank(cell: &Cell) -> bool {
    cell.symbol() == " "
        && cell.fg == Color::Reset
        && cell.bg == Color::Reset
        && cell.modifier.is_empty()
}

fn write_cells<'a>(
    out: &mut Vec<u8>,
    cells: impl IntoIterator<Item = (u16, u16, &'a Cell)>,
) -> io::Result<()> {
    let mut fg = Color::Reset;
    let mut bg = Color::Reset;
    let mut modifier = Modifier::empty();
    let mut last: Option<(u16, u16)> = None;

    for (x, y, cell) in cells {
        let adjacent = matches!(last, Some((lx, ly)) if ly == y && lx + 1 == x);
        if !adjacent {
            queue!(out, MoveTo(x, y))?;
        }
        if cell.modifier != modifier {
            // Attribute reset also resets colors.
            queue!(out, SetAttribute(Attribute::Reset))?;
            fg = Color::Reset;
            bg = Color::Reset;
            apply_modifier(out, cell.modifier)?;
            modifier = cell.modifier;
        }
        if cell.fg != fg {
            queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
            fg = cell.fg;
        }
        if cell.bg != bg {
            queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
            bg = cell.bg;
        }
        queue!(out, Print(cell.symbol()))?;
        last = Some((x, y));
    }

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)
}

fn apply_modifier(out: &mut Vec<u8>, modifier: Modifier) -> io::Result<()> {
    const MAP: &[(Modifier, Attribute)] = &[
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::REVERSED, Attribute::Reverse),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ];
    for (flag, attribute) in MAP {
        if modifier.contains(*flag) {
            queue!(out, SetAttribute(*attribute))?;
        }
    }
    Ok(())
}

fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Reset => CtColor::Reset,
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::Gray => CtColor::Grey,
        Color::DarkGray => CtColor::DarkGrey,
        Color::LightRed => CtColor::Red,
        Color::LightGreen => CtColor::Green,
        Color::LightYellow => CtColor::Yellow,
        Color::LightBlue => CtColor::Blue,
        Color::LightMagenta => CtColor::Magenta,
        Color::LightCyan => CtColor::Cyan,
        Color::White => CtColor::White,
        Color::Indexed(index) => CtColor::AnsiValue(index),
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::menu::{MenuItem, MenuState};
    use crate::ui::render::render;
    use std::sync::Arc;

    fn frame_for(viewport: Viewport) -> MenuFrame {
        let items: Arc<[MenuItem]> = vec![MenuItem::new("info", "")].into();
        render(&MenuState::new(Arc::from("t"), items, viewport))
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn compose_centers_box() {
        let viewport = Viewport {
            width: 60,
            height: 20,
        };
        let frame = frame_for(viewport);
        let screen = compose(&frame, viewport);
        let top = frame.y_offset as u16;
        let left = frame.x_offset as u16;
        assert_eq!(screen[(left, top)].symbol(), "╭");
        assert_eq!(screen[(left + frame.box_width - 1, top)].symbol(), "╮");
    }

    #[test]
    fn compose_clips_negative_offsets() {
        let viewport = Viewport {
            width: 6,
            height: 3,
        };
        let frame = frame_for(viewport);
        assert!(frame.x_offset < 0 && frame.y_offset < 0);
        let screen = compose(&frame, viewport);
        assert_eq!(screen.area, Rect::new(0, 0, 6, 3));
        // The visible window starts inside the box, so no corner is on screen.
        assert!(!row(&screen, 0).contains('╭'));
    }

    #[test]
    fn compose_covers_only_the_box() {
        let viewport = Viewport {
            width: 200,
            height: 100,
        };
        let frame = frame_for(viewport);
        let screen = compose(&frame, viewport);
        assert_eq!(
            screen.area,
            Rect::new(
                frame.x_offset as u16,
                frame.y_offset as u16,
                frame.box_width,
                frame.box_height
            )
        );
        assert!(row(&screen, screen.area.top()).starts_with('╭'));
    }

    #[test]
    fn huge_viewport_paints_box_sized_area() {
        let viewport = Viewport {
            width: u16::MAX,
            height: u16::MAX,
        };
        let frame = frame_for(viewport);
        let mut painter = ScreenPainter::new();

        let first = painter.paint(&frame, viewport).unwrap();
        let area = painter.painted_area().unwrap();
        assert_eq!((area.width, area.height), (frame.box_width, frame.box_height));
        assert!(String::from_utf8_lossy(&first).contains("info"));
        assert!(first.len() < 4096);

        let second = painter.paint(&frame, viewport).unwrap();
        assert!(second.len() < first.len());
    }

    #[test]
    fn zero_sized_viewport_paints_nothing() {
        let viewport = Viewport {
            width: 0,
            height: 0,
        };
        let mut painter = ScreenPainter::new();
        let out = painter.paint(&frame_for(viewport), viewport).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains("info"));
        assert!(painter.painted_area().unwrap().is_empty());
    }

    #[test]
    fn second_identical_paint_is_nearly_empty() {
        let viewport = Viewport::default();
        let frame = frame_for(viewport);
        let mut painter = ScreenPainter::new();
        let first = painter.paint(&frame, viewport).unwrap();
        let second = painter.paint(&frame, viewport).unwrap();
        assert!(second.len() < first.len());
        assert!(!String::from_utf8_lossy(&second).contains("info"));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut painter = ScreenPainter::new();
        let small = Viewport {
            width: 40,
            height: 20,
        };
        painter.paint(&frame_for(small), small).unwrap();
        let large = Viewport::default();
        let out = painter.paint(&frame_for(large), large).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("info"));
    }

    #[test]
    fn indexed_colors_map_to_ansi_values() {
        assert_eq!(to_crossterm(Color::Indexed(205)), CtColor::AnsiValue(205));
        assert_eq!(to_crossterm(Color::Reset), CtColor::Reset);
    }
}
