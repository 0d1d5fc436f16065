//! Pixel surface seam and the in-memory framebuffer behind it.
//!
//! # Architecture
//!
//! The engine paints through [`PixelSurface`] in logical coordinates:
//! `x` grows to the right across all 32 character cells, `y` grows downward
//! across the 7 glyph rows. [`Framebuffer`] is the provided implementation:
//! - The back buffer receives `set_pixel`/`clear` during a tick
//! - `flush()` copies it to the front buffer (what the LEDs show)
//! - [`Framebuffer::led_colors`] walks the front buffer in physical chain order
//!
//! # LED Chain Layout
//!
//! Each character cell is its own 5x7 block of 35 LEDs on the chain. Inside a
//! block the rows run serpentine: even rows left to right, odd rows right to
//! left. [`led_index`] captures that mapping so drivers never reimplement it.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::colors::BLACK;
use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_WIDTH, LED_COUNT, LEDS_PER_CELL};

/// Fixed-size addressable pixel grid.
pub trait PixelSurface {
    /// Set one pixel. Coordinates outside the grid are ignored.
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb888,
    );

    /// Turn every pixel off.
    fn clear(&mut self);

    /// Push buffered state to the hardware.
    fn flush(&mut self);
}

/// Chain index of logical pixel `(x, y)`, or `None` outside the grid.
pub const fn led_index(
    x: i32,
    y: i32,
) -> Option<usize> {
    if x < 0 || y < 0 || x >= DISPLAY_WIDTH as i32 || y >= DISPLAY_HEIGHT as i32 {
        return None;
    }
    let x = x as usize;
    let y = y as usize;
    let cell = x / GLYPH_WIDTH;
    let col = x % GLYPH_WIDTH;
    let physical_col = if y % 2 == 0 { col } else { GLYPH_WIDTH - 1 - col };
    Some(cell * LEDS_PER_CELL + y * GLYPH_WIDTH + physical_col)
}

const PIXELS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Back/front buffered 160x7 framebuffer.
pub struct Framebuffer {
    back: [Rgb888; PIXELS],
    front: [Rgb888; PIXELS],
    flushes: u32,
}

impl Framebuffer {
    pub const fn new() -> Self {
        Self {
            back: [BLACK; PIXELS],
            front: [BLACK; PIXELS],
            flushes: 0,
        }
    }

    #[inline]
    const fn offset(
        x: i32,
        y: i32,
    ) -> Option<usize> {
        if x >= 0 && x < DISPLAY_WIDTH as i32 && y >= 0 && y < DISPLAY_HEIGHT as i32 {
            Some(y as usize * DISPLAY_WIDTH + x as usize)
        } else {
            None
        }
    }

    /// Pixel currently being drawn (back buffer).
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb888> {
        Self::offset(x, y).map(|i| self.back[i])
    }

    /// Pixel as last flushed (front buffer).
    pub fn shown_pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb888> {
        Self::offset(x, y).map(|i| self.front[i])
    }

    /// Number of flushes since creation.
    #[inline]
    pub const fn flush_count(&self) -> u32 { self.flushes }

    /// Count of lit pixels in the back buffer.
    pub fn lit_pixels(&self) -> usize { self.back.iter().filter(|c| **c != BLACK).count() }

    /// Front buffer colors in physical chain order.
    pub fn led_colors(&self) -> impl Iterator<Item = Rgb888> + '_ {
        let mut order = [0usize; LED_COUNT];
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if let Some(led) = led_index(x as i32, y as i32) {
                    order[led] = y * DISPLAY_WIDTH + x;
                }
            }
        }
        (0..LED_COUNT).map(move |led| self.front[order[led]])
    }
}

impl Default for Framebuffer {
    fn default() -> Self { Self::new() }
}

impl PixelSurface for Framebuffer {
    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb888,
    ) {
        if let Some(i) = Self::offset(x, y) {
            self.back[i] = color;
        }
    }

    fn clear(&mut self) { self.back = [BLACK; PIXELS]; }

    fn flush(&mut self) {
        self.front = self.back;
        self.flushes = self.flushes.wrapping_add(1);
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32) }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.back = [color; PIXELS];
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
