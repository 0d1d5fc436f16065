//! Color show mode.
//!
//! Lights the chain one LED per tick in physical order with a slowly rotating
//! hue, holds the full strip, then dissolves it with random per-LED fades and
//! starts over from a new random base hue.

use embedded_graphics::pixelcolor::Rgb888;
use rand::{Rng, RngCore};

use crate::colors::{BLACK, fade_to_black_by, hsv};
use crate::config::{
    COLOR_SHOW_FADE_STEP_MS, COLOR_SHOW_FADE_STEPS, COLOR_SHOW_HOLD_MS, DISPLAY_HEIGHT_I32, DISPLAY_WIDTH_I32,
    LED_COUNT,
};
use crate::frame::Frame;
use crate::surface::{PixelSurface, led_index};
use crate::timing::elapsed_ms;

const FILL_VALUE: u8 = 70;

/// Base hue of a show that has not drawn its first one yet. Drawn hues are
/// always in `1..255`.
const UNSEEDED_HUE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorShowPhase {
    /// Next chain index to light.
    Fill { index: usize },
    /// Full strip on display since `since_ms`.
    Hold { since_ms: u32 },
    /// Dissolve step `step`, last one applied at `last_ms`.
    Fade { step: u8, last_ms: u32 },
}

pub struct ColorShow {
    leds: [Rgb888; LED_COUNT],
    phase: ColorShowPhase,
    base_hue: u8,
}

impl ColorShow {
    pub const fn new() -> Self {
        Self {
            leds: [BLACK; LED_COUNT],
            phase: ColorShowPhase::Fill { index: 0 },
            base_hue: UNSEEDED_HUE,
        }
    }

    /// Blank the strip and restart the fill with the same base hue.
    pub fn reset(&mut self) {
        self.leds = [BLACK; LED_COUNT];
        self.phase = ColorShowPhase::Fill { index: 0 };
    }

    #[inline]
    pub const fn phase(&self) -> ColorShowPhase { self.phase }

    #[inline]
    pub const fn base_hue(&self) -> u8 { self.base_hue }

    /// Color of chain LED `index`.
    pub fn led(
        &self,
        index: usize,
    ) -> Option<Rgb888> {
        self.leds.get(index).copied()
    }

    /// Fill color of chain LED `index` for base hue `base`.
    const fn fill_color(
        base: u8,
        index: usize,
    ) -> Rgb888 {
        let hue = base.wrapping_add((index / 2) as u8);
        let sat = if index % 2 == 0 { 205 } else { 255 };
        hsv(hue, sat, FILL_VALUE)
    }

    /// Advance by at most one step and push a frame if anything changed.
    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        frame: &mut Frame<'_, S, R>,
    ) {
        let now = frame.now_ms;
        match self.phase {
            ColorShowPhase::Fill { index } => {
                if self.base_hue == UNSEEDED_HUE {
                    self.base_hue = frame.rng.random_range(1..255);
                }
                self.leds[index] = Self::fill_color(self.base_hue, index);
                self.phase = if index + 1 >= LED_COUNT {
                    ColorShowPhase::Hold { since_ms: now }
                } else {
                    ColorShowPhase::Fill { index: index + 1 }
                };
            }
            ColorShowPhase::Hold { since_ms } => {
                if elapsed_ms(now, since_ms) < COLOR_SHOW_HOLD_MS {
                    return;
                }
                self.phase = ColorShowPhase::Fade { step: 0, last_ms: now.wrapping_sub(COLOR_SHOW_FADE_STEP_MS) };
                return;
            }
            ColorShowPhase::Fade { step, last_ms } => {
                if elapsed_ms(now, last_ms) < COLOR_SHOW_FADE_STEP_MS {
                    return;
                }
                for led in &mut self.leds {
                    *led = fade_to_black_by(*led, frame.rng.random_range(3..8));
                }
                if step + 1 >= COLOR_SHOW_FADE_STEPS {
                    self.leds = [BLACK; LED_COUNT];
                    self.base_hue = frame.rng.random_range(1..255);
                    self.phase = ColorShowPhase::Fill { index: 0 };
                } else {
                    self.phase = ColorShowPhase::Fade { step: step + 1, last_ms: now };
                }
            }
        }
        self.paint(frame);
    }

    fn paint<S: PixelSurface, R: RngCore>(
        &self,
        frame: &mut Frame<'_, S, R>,
    ) {
        for y in 0..DISPLAY_HEIGHT_I32 {
            for x in 0..DISPLAY_WIDTH_I32 {
                if let Some(led) = led_index(x, y) {
                    frame.surface.set_pixel(x, y, self.leds[led]);
                }
            }
        }
        frame.flush();
    }
}

impl Default for ColorShow {
    fn default() -> Self { Self::new() }
}
