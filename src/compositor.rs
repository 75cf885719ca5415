//! Framebuffer to terminal text
//!
//! Each cell becomes one half-block glyph. Runs of cells with the same
//! colors are merged into spans, and color escapes are only written when
//! the color state actually changes.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::rasterizer::{CellView, Color, Framebuffer};

pub const UPPER_HALF: char = '▀';
pub const LOWER_HALF: char = '▄';
pub const BLANK: char = ' ';

/// A run of glyphs sharing one foreground/background; `None` is the terminal default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

pub type Row = Vec<Span>;

/// Glyph and colors for one cell
fn cell_glyph(cell: CellView) -> (char, Option<Color>, Option<Color>) {
    match (cell.top, cell.bottom) {
        (None, None) => (BLANK, None, None),
        (Some(top), None) => (UPPER_HALF, Some(top), None),
        (None, Some(bottom)) => (LOWER_HALF, Some(bottom), None),
        (Some(top), Some(bottom)) => (UPPER_HALF, Some(top), Some(bottom)),
    }
}

/// Convert the framebuffer into styled rows
pub fn compose(fb: &Framebuffer) -> Vec<Row> {
    (0..fb.height())
        .map(|y| {
            let mut row: Row = Vec::new();
            for x in 0..fb.width() {
                let (glyph, fg, bg) = cell_glyph(fb.cell(x, y));
                match row.last_mut() {
                    Some(span) if span.fg == fg && span.bg == bg => span.text.push(glyph),
                    _ => row.push(Span {
                        text: glyph.to_string(),
                        fg,
                        bg,
                    }),
                }
            }
            row
        })
        .collect()
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Write one full frame of escape-coded text, starting at the home position.
///
/// Returns the number of color instructions emitted.
pub fn write_frame<W: Write>(rows: &[Row], out: &mut W) -> io::Result<usize> {
    queue!(out, MoveTo(0, 0), ResetColor)?;
    let mut changes = 0;

    for row in rows {
        // Every row starts from a full reset
        let mut fg: Option<Color> = None;
        let mut bg: Option<Color> = None;

        for span in row {
            // Blank glyphs never show their foreground, so leave it alone
            if let Some(color) = span.fg {
                if fg != Some(color) {
                    queue!(out, SetForegroundColor(term_color(color)))?;
                    fg = Some(color);
                    changes += 1;
                }
            }
            if span.bg != bg {
                let target = span.bg.map_or(TermColor::Reset, term_color);
                queue!(out, SetBackgroundColor(target))?;
                bg = span.bg;
                changes += 1;
            }
            queue!(out, Print(&span.text))?;
        }

        queue!(out, ResetColor, Print("\r\n"))?;
    }

    Ok(changes)
}
