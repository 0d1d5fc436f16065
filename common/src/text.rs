//! Glyph painting primitives shared by the transitions.
//!
//! All functions write only the pixels they light; callers clear the surface
//! first. Offsets are in pixels and may push glyphs partly (or entirely)
//! outside the grid, which the surface clips.

use embedded_graphics::pixelcolor::Rgb888;

use crate::config::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::font::Font;
use crate::surface::PixelSurface;

/// Paint glyph `code` into character cell `cell`, shifted by `(dx, dy)`.
pub fn draw_char<S: PixelSurface + ?Sized>(
    surface: &mut S,
    font: &dyn Font,
    code: u8,
    cell: i32,
    color: Rgb888,
    dx: i32,
    dy: i32,
) {
    let x0 = cell * GLYPH_WIDTH as i32 + dx;
    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            if font.glyph(code, col, row) {
                surface.set_pixel(x0 + col as i32, dy + row as i32, color);
            }
        }
    }
}

/// Paint an inverted cell: the whole block lit, the glyph knocked out.
pub fn draw_cursor<S: PixelSurface + ?Sized>(
    surface: &mut S,
    font: &dyn Font,
    code: u8,
    cell: i32,
    color: Rgb888,
) {
    let x0 = cell * GLYPH_WIDTH as i32;
    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            if !font.glyph(code, col, row) {
                surface.set_pixel(x0 + col as i32, row as i32, color);
            }
        }
    }
}

/// Paint a row of cells starting at cell 0, coloring each by position.
///
/// `text` is painted up to `max_cells` cells; newlines render as blanks.
pub fn draw_row<S, F>(
    surface: &mut S,
    font: &dyn Font,
    text: &[u8],
    max_cells: usize,
    dx: i32,
    dy: i32,
    mut color_at: F,
) where
    S: PixelSurface + ?Sized,
    F: FnMut(usize) -> Rgb888,
{
    for (pos, &code) in text.iter().take(max_cells).enumerate() {
        if code == b' ' || code == b'\n' {
            continue;
        }
        draw_char(surface, font, code, pos as i32, color_at(pos), dx, dy);
    }
}
