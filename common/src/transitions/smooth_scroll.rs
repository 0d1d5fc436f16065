//! Pixel-smooth horizontal scroll.
//!
//! Each story column is shown over [`SMOOTH_SUBFRAMES`] frames shifted left
//! one pixel at a time. A newline under the window plays a dissolve burst,
//! skips the blank run after it and fades the next window in.

use micromath::F32;
use rand::{Rng, RngCore};

use super::paint_window;
use crate::colors::hsv;
use crate::config::{DISPLAY_CHARS, DISPLAY_HEIGHT_I32, DISPLAY_WIDTH_I32, DISSOLVE_FRAMES, PREROLL_FRAMES, SMOOTH_SUBFRAMES};
use crate::content::ContentManager;
use crate::frame::Frame;
use crate::surface::PixelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Fade the window in before scrolling resumes.
    PreRoll { step: u8 },
    /// Sub-pixel frame `sub_frame` of the current column.
    Scrolling { sub_frame: u8 },
    /// Line-break burst, frame `step`.
    Dissolve { step: u8 },
}

pub struct SmoothScroll {
    column: usize,
    phase: ScrollPhase,
    smooth: bool,
    last_update_ms: u32,
}

impl SmoothScroll {
    pub const fn new(
        smooth: bool,
        now_ms: u32,
    ) -> Self {
        Self {
            column: 0,
            phase: Self::start_phase(smooth),
            smooth,
            last_update_ms: now_ms,
        }
    }

    const fn start_phase(smooth: bool) -> ScrollPhase {
        if smooth { ScrollPhase::PreRoll { step: 0 } } else { ScrollPhase::Scrolling { sub_frame: 0 } }
    }

    pub fn reset(
        &mut self,
        now_ms: u32,
    ) {
        self.column = 0;
        self.phase = Self::start_phase(self.smooth);
        self.last_update_ms = now_ms;
    }

    pub fn set_smooth(
        &mut self,
        smooth: bool,
    ) {
        self.smooth = smooth;
        if !smooth && matches!(self.phase, ScrollPhase::PreRoll { .. }) {
            self.phase = ScrollPhase::Scrolling { sub_frame: 0 };
        }
    }

    #[inline]
    pub const fn column(&self) -> usize { self.column }

    #[inline]
    pub const fn phase(&self) -> ScrollPhase { self.phase }

    /// Clock reading of the last update or reset.
    #[inline]
    pub const fn last_update_ms(&self) -> u32 { self.last_update_ms }

    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        content: &mut ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
    ) -> bool {
        self.last_update_ms = frame.now_ms;

        match self.phase {
            ScrollPhase::PreRoll { step } => {
                let brightness = ((u16::from(step) + 1) * 255 / u16::from(PREROLL_FRAMES)) as u8;
                frame.surface.clear();
                paint_window(content, frame, self.column, 0, brightness);
                frame.flush();

                self.phase = if step + 1 >= PREROLL_FRAMES {
                    ScrollPhase::Scrolling { sub_frame: 0 }
                } else {
                    ScrollPhase::PreRoll { step: step + 1 }
                };
                false
            }
            ScrollPhase::Dissolve { step } => {
                render_dissolve(frame, step + 1);
                if step + 1 >= DISSOLVE_FRAMES {
                    self.column = content.find_next_printable_char(self.column);
                    self.phase = Self::start_phase(self.smooth);
                    true
                } else {
                    self.phase = ScrollPhase::Dissolve { step: step + 1 };
                    false
                }
            }
            ScrollPhase::Scrolling { sub_frame } => {
                if sub_frame == 0 && content.has_newline_at(self.column) {
                    render_dissolve(frame, 1);
                    self.phase = ScrollPhase::Dissolve { step: 1 };
                    return false;
                }

                frame.surface.clear();
                paint_window(content, frame, self.column, -i32::from(sub_frame), 255);
                frame.flush();

                if sub_frame + 1 < SMOOTH_SUBFRAMES {
                    self.phase = ScrollPhase::Scrolling { sub_frame: sub_frame + 1 };
                    return false;
                }

                self.phase = ScrollPhase::Scrolling { sub_frame: 0 };
                if self.column + DISPLAY_CHARS < content.story_length() {
                    self.column += 1;
                } else {
                    self.column = 0;
                    content.select_random_story(frame.rng);
                }
                frame.chars_advanced += 1;
                true
            }
        }
    }
}

/// One frame of the line-break burst: a hue field over the whole grid that
/// darkens as `burst` grows.
fn render_dissolve<S: PixelSurface, R: RngCore>(
    frame: &mut Frame<'_, S, R>,
    burst: u8,
) {
    let b = u32::from(burst);
    let wave = F32(burst as f32 / 10.0).sin().0;
    frame.surface.clear();
    for x in 0..DISPLAY_WIDTH_I32 {
        let hue = (F32(wave * F32(x as f32 / 10.0).cos().0).abs().0 * 255.0) as u8;
        for y in 0..DISPLAY_HEIGHT_I32 {
            let sat = 100 + frame.rng.random_range(b * 3..=b * 4 - 1).min(155);
            let val = 130u32.saturating_sub(b * 4) + frame.rng.random_range(0..20);
            frame.surface.set_pixel(x, y, hsv(hue, sat as u8, val as u8));
        }
    }
    frame.flush();
}
