//! 5x7 glyph source for the character cells.
//!
//! The engine only needs one question answered: is pixel `(col, row)` of
//! glyph `code` lit? [`Font`] is that seam. [`Font5x7`] answers it from a
//! bitmap table rasterized once from embedded-graphics' `FONT_5X7`, so the
//! per-pixel lookup during rendering is a shift and a mask.

use core::convert::Infallible;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_5X7;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::config::{GLYPH_HEIGHT, GLYPH_WIDTH};

/// First character code with a glyph in the table (space).
const FIRST_CODE: u8 = 0x20;

/// Last character code with a glyph in the table (tilde).
const LAST_CODE: u8 = 0x7E;

const GLYPH_COUNT: usize = (LAST_CODE - FIRST_CODE + 1) as usize;

/// Glyph drawn for bytes outside the printable ASCII range.
const REPLACEMENT: u8 = b'?';

/// Maps a character code to a 5x7 glyph bitmap.
pub trait Font {
    /// Whether pixel `(col, row)` of the glyph for `code` is lit.
    /// Out-of-range coordinates are unlit.
    fn glyph(
        &self,
        code: u8,
        col: usize,
        row: usize,
    ) -> bool;
}

/// Printable-ASCII 5x7 font.
///
/// Control bytes (including `\n`) render blank; bytes above `~` render as `?`.
pub struct Font5x7 {
    /// One bit per column (bit 0 = leftmost) for each glyph row.
    rows: [[u8; GLYPH_HEIGHT]; GLYPH_COUNT],
}

impl Font5x7 {
    /// Rasterize the glyph table.
    pub fn new() -> Self {
        let style = MonoTextStyle::new(&FONT_5X7, BinaryColor::On);
        let mut rows = [[0u8; GLYPH_HEIGHT]; GLYPH_COUNT];

        for (i, glyph) in rows.iter_mut().enumerate() {
            let ch = char::from(FIRST_CODE + i as u8);
            let mut utf8 = [0u8; 4];
            let mut canvas = GlyphCanvas::default();
            Text::with_baseline(ch.encode_utf8(&mut utf8), Point::zero(), style, Baseline::Top)
                .draw(&mut canvas)
                .ok();
            *glyph = canvas.rows;
        }

        Self { rows }
    }

    #[inline]
    fn index(code: u8) -> Option<usize> {
        match code {
            FIRST_CODE..=LAST_CODE => Some((code - FIRST_CODE) as usize),
            0..FIRST_CODE => None,
            _ => Some((REPLACEMENT - FIRST_CODE) as usize),
        }
    }
}

impl Default for Font5x7 {
    fn default() -> Self { Self::new() }
}

impl Font for Font5x7 {
    #[inline]
    fn glyph(
        &self,
        code: u8,
        col: usize,
        row: usize,
    ) -> bool {
        if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return false;
        }
        match Self::index(code) {
            Some(idx) => (self.rows[idx][row] >> col) & 1 == 1,
            None => false,
        }
    }
}

// =============================================================================
// Rasterization Target
// =============================================================================

/// One-glyph draw target used while building the table.
#[derive(Default)]
struct GlyphCanvas {
    rows: [u8; GLYPH_HEIGHT],
}

impl OriginDimensions for GlyphCanvas {
    fn size(&self) -> Size { Size::new(GLYPH_WIDTH as u32, GLYPH_HEIGHT as u32) }
}

impl DrawTarget for GlyphCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let in_bounds =
                point.x >= 0 && point.x < GLYPH_WIDTH as i32 && point.y >= 0 && point.y < GLYPH_HEIGHT as i32;
            if in_bounds && color.is_on() {
                self.rows[point.y as usize] |= 1 << point.x;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
