//! Test pattern mode for checking the matrix wiring.
//!
//! Each pattern stays up for [`TEST_PATTERN_STEP_MS`]. The walk and sweep
//! patterns move across the whole grid within that time.

use embedded_graphics::pixelcolor::Rgb888;
use rand::RngCore;

use crate::colors::{BLUE, DIM_WHITE, GREEN, RED, WHITE};
use crate::config::{DISPLAY_CHARS, DISPLAY_HEIGHT_I32, DISPLAY_WIDTH, DISPLAY_WIDTH_I32, GLYPH_WIDTH, TEST_PATTERN_STEP_MS};
use crate::frame::Frame;
use crate::surface::PixelSurface;
use crate::timing::elapsed_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestPattern {
    Red,
    Green,
    Blue,
    White,
    /// One character cell lit at a time, left to right.
    CellWalk,
    /// One pixel column lit at a time, left to right.
    ColumnSweep,
}

impl TestPattern {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] =
        [Self::Red, Self::Green, Self::Blue, Self::White, Self::CellWalk, Self::ColumnSweep];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::White => "White",
            Self::CellWalk => "Cell Walk",
            Self::ColumnSweep => "Column Sweep",
        }
    }

    /// Number of distinct frames the pattern shows during one step.
    const fn positions(self) -> u32 {
        match self {
            Self::CellWalk => DISPLAY_CHARS as u32,
            Self::ColumnSweep => DISPLAY_WIDTH as u32,
            _ => 1,
        }
    }
}

pub struct TestPatterns {
    index: usize,
    started_ms: u32,
    /// Pattern and position of the last pushed frame.
    shown: Option<(TestPattern, u32)>,
}

impl TestPatterns {
    pub const fn new(now_ms: u32) -> Self {
        Self {
            index: 0,
            started_ms: now_ms,
            shown: None,
        }
    }

    pub fn reset(
        &mut self,
        now_ms: u32,
    ) {
        self.index = 0;
        self.started_ms = now_ms;
        self.shown = None;
    }

    #[inline]
    pub const fn current(&self) -> TestPattern { TestPattern::ALL[self.index] }

    /// Paint the pattern for this tick. Frames are only pushed when the
    /// picture changes.
    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        frame: &mut Frame<'_, S, R>,
    ) {
        let mut elapsed = elapsed_ms(frame.now_ms, self.started_ms);
        if elapsed >= TEST_PATTERN_STEP_MS {
            self.index = (self.index + 1) % TestPattern::COUNT;
            self.started_ms = frame.now_ms;
            elapsed = 0;
        }

        let pattern = self.current();
        let position = elapsed * pattern.positions() / TEST_PATTERN_STEP_MS;
        if self.shown == Some((pattern, position)) {
            return;
        }
        self.shown = Some((pattern, position));

        frame.surface.clear();
        match pattern {
            TestPattern::Red => fill(frame.surface, RED),
            TestPattern::Green => fill(frame.surface, GREEN),
            TestPattern::Blue => fill(frame.surface, BLUE),
            TestPattern::White => fill(frame.surface, DIM_WHITE),
            TestPattern::CellWalk => {
                let left = position as i32 * GLYPH_WIDTH as i32;
                for x in left..left + GLYPH_WIDTH as i32 {
                    column(frame.surface, x, WHITE);
                }
            }
            TestPattern::ColumnSweep => column(frame.surface, position as i32, WHITE),
        }
        frame.flush();
    }
}

fn fill<S: PixelSurface>(
    surface: &mut S,
    color: Rgb888,
) {
    for x in 0..DISPLAY_WIDTH_I32 {
        column(surface, x, color);
    }
}

fn column<S: PixelSurface>(
    surface: &mut S,
    x: i32,
    color: Rgb888,
) {
    for y in 0..DISPLAY_HEIGHT_I32 {
        surface.set_pixel(x, y, color);
    }
}
