//! Per-tick render context.
//!
//! Everything a mode touches during one control-loop tick is passed in
//! explicitly: the pixel surface, the font, the random generator and the
//! clock reading for this tick. Nothing is global, so every state machine can
//! be driven against a [`Framebuffer`](crate::surface::Framebuffer) and a
//! seeded generator in tests.

use rand::RngCore;

use crate::font::Font;
use crate::surface::PixelSurface;

/// Borrowed context for one tick.
pub struct Frame<'f, S: PixelSurface, R: RngCore> {
    pub surface: &'f mut S,
    pub font: &'f dyn Font,
    pub rng: &'f mut R,
    /// Clock reading sampled once at the start of the tick.
    pub now_ms: u32,
    /// Characters the active transition moved past during this tick.
    pub chars_advanced: u32,
    /// Frames pushed to the surface during this tick.
    pub flushes: u32,
}

impl<'f, S: PixelSurface, R: RngCore> Frame<'f, S, R> {
    pub fn new(
        surface: &'f mut S,
        font: &'f dyn Font,
        rng: &'f mut R,
        now_ms: u32,
    ) -> Self {
        Self {
            surface,
            font,
            rng,
            now_ms,
            chars_advanced: 0,
            flushes: 0,
        }
    }

    /// Push the painted frame and count it.
    pub fn flush(&mut self) {
        self.surface.flush();
        self.flushes += 1;
    }

    /// Clear the surface and push a blank frame.
    pub fn blank(&mut self) {
        self.surface.clear();
        self.flush();
    }
}
