//! Character-grid frame buffer.
//!
//! Every tick the whole screen is drawn into the grid and written out in a
//! single batched write. The terminal is only cleared when the mode changes;
//! the rest of the time the cursor is sent home and every cell is overwritten,
//! which avoids the tearing that clear-then-draw produces.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
};

use crate::game::Mode;

const BELL: u8 = 0x07;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        style: Style::new(),
    };
}

pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    last_mode: Option<Mode>,
    bell: bool,
    out: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
            last_mode: None,
            bell: false,
            out: Vec::with_capacity(width * height * 4),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Writes one cell. Anything outside the grid is dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { ch, style };
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.set_pixel(x + i as i32, y, ch, style);
        }
    }

    /// Copies the non-blank cells of a ratatui buffer, offset by `(x, y)`.
    pub fn blit(&mut self, buffer: &Buffer, x: i32, y: i32) {
        let area = buffer.area;
        for row in 0..area.height {
            for col in 0..area.width {
                let cell = &buffer[(area.x + col, area.y + row)];
                let Some(ch) = cell.symbol().chars().next() else {
                    continue;
                };
                if ch == ' ' {
                    continue;
                }
                self.set_pixel(x + col as i32, y + row as i32, ch, cell.style());
            }
        }
    }

    pub fn ring_bell(&mut self) {
        self.bell = true;
    }

    #[cfg(test)]
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    /// Emits the whole grid in one write and resets it to blank.
    pub fn flush<W: Write>(&mut self, writer: &mut W, mode: Mode) -> io::Result<()> {
        let Self {
            width,
            cells,
            last_mode,
            bell,
            out,
            ..
        } = self;
        out.clear();

        if *last_mode != Some(mode) {
            queue!(out, Clear(ClearType::All))?;
            *last_mode = Some(mode);
        }

        let mut current: Option<Style> = None;
        for (row, line) in cells.chunks(*width).enumerate() {
            queue!(out, MoveTo(0, row as u16))?;
            for cell in line {
                if current != Some(cell.style) {
                    apply_style(out, cell.style)?;
                    current = Some(cell.style);
                }
                queue!(out, Print(cell.ch))?;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        if *bell {
            out.push(BELL);
            *bell = false;
        }

        writer.write_all(out.as_slice())?;
        writer.flush()?;

        cells.fill(Cell::BLANK);
        Ok(())
    }
}

fn apply_style(out: &mut Vec<u8>, style: Style) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_crossterm(style.fg.unwrap_or(Color::Reset))),
        SetBackgroundColor(to_crossterm(style.bg.unwrap_or(Color::Reset))),
    )?;
    let modifiers = style.add_modifier.difference(style.sub_modifier);
    for (modifier, attribute) in [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::REVERSED, Attribute::Reverse),
    ] {
        if modifiers.contains(modifier) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::Gray => style::Color::Grey,
        Color::DarkGray => style::Color::DarkGrey,
        Color::LightRed => style::Color::Red,
        Color::LightGreen => style::Color::Green,
        Color::LightYellow => style::Color::Yellow,
        Color::LightBlue => style::Color::Blue,
        Color::LightMagenta => style::Color::Magenta,
        Color::LightCyan => style::Color::Cyan,
        Color::White => style::Color::White,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
        Color::Indexed(i) => style::Color::AnsiValue(i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flushed(fb: &mut FrameBuffer, mode: Mode) -> String {
        let mut out = Vec::new();
        fb.flush(&mut out, mode).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(-1, 0, 'x', Style::default());
        fb.set_pixel(0, -1, 'x', Style::default());
        fb.set_pixel(4, 0, 'x', Style::default());
        fb.set_pixel(0, 3, 'x', Style::default());
        fb.set_pixel(3, 2, 'y', Style::default());

        assert_eq!(fb.cell(3, 2).unwrap().ch, 'y');
        let blanks = (0..3)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.cell(x, y).unwrap().ch == ' ')
            .count();
        assert_eq!(blanks, 11);
    }

    #[test]
    fn clears_only_when_mode_changes() {
        let mut fb = FrameBuffer::new(4, 2);
        let clear = "\x1b[2J";

        assert!(flushed(&mut fb, Mode::Menu).contains(clear));
        assert!(!flushed(&mut fb, Mode::Menu).contains(clear));
        assert!(flushed(&mut fb, Mode::Playing).contains(clear));
        assert!(!flushed(&mut fb, Mode::Playing).contains(clear));
    }

    #[test]
    fn every_frame_homes_the_cursor_and_rewrites_all_rows() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 1, "ab", Style::default());
        let frame = flushed(&mut fb, Mode::Menu);

        assert!(frame.contains("\x1b[1;1H"));
        assert!(frame.contains("\x1b[2;1H"));
        assert!(frame.contains("ab "));
    }

    #[test]
    fn flush_resets_cells_to_blank() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "abc", Style::default().fg(Color::Red));
        flushed(&mut fb, Mode::Playing);

        for x in 0..3 {
            assert_eq!(*fb.cell(x, 0).unwrap(), Cell::BLANK);
        }
        assert!(!flushed(&mut fb, Mode::Playing).contains("abc"));
    }

    #[test]
    fn consecutive_cells_with_one_style_share_a_single_color_change() {
        let red = Style::default().fg(Color::Red);
        let blue = Style::default().fg(Color::Blue);

        let mut same = FrameBuffer::new(4, 1);
        same.put_str(0, 0, "aaaa", red);
        let same_frame = flushed(&mut same, Mode::Playing);

        let mut mixed = FrameBuffer::new(4, 1);
        for x in 0..4 {
            let style = if x % 2 == 0 { red } else { blue };
            mixed.set_pixel(x, 0, 'a', style);
        }
        let mixed_frame = flushed(&mut mixed, Mode::Playing);

        assert_eq!(same_frame.matches("38;").count(), 1);
        assert_eq!(mixed_frame.matches("38;").count(), 4);
    }

    #[test]
    fn bell_is_emitted_once() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.ring_bell();
        assert!(flushed(&mut fb, Mode::Playing).ends_with('\u{7}'));
        assert!(!flushed(&mut fb, Mode::Playing).contains('\u{7}'));
    }
}
