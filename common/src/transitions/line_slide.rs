//! Line-at-a-time display with a vertical slide between lines.
//!
//! Each wrapped line stays up for its reading time, then the next line slides
//! in from below while the current one leaves through the top. The incoming
//! line starts [`SLIDE_GAP_ROWS`] rows below the bottom edge.

use rand::RngCore;

use super::{paint_line, reading_time_ms};
use crate::config::{DISPLAY_HEIGHT_I32, SLIDE_GAP_ROWS, SLIDE_STEPS_FAST, SLIDE_STEPS_SMOOTH};
use crate::content::{ContentManager, Line};
use crate::frame::Frame;
use crate::surface::PixelSurface;
use crate::timing::elapsed_ms;

/// Distance the lines travel during one slide.
const SLIDE_DISTANCE: i32 = DISPLAY_HEIGHT_I32 + SLIDE_GAP_ROWS;

pub struct LineSlide {
    line_index: usize,
    /// Line currently committed to the display (blank before the first).
    shown: Line,
    /// Incoming line and step while a slide is in flight.
    sliding: Option<(Line, u8)>,
    smooth: bool,
    last_line_ms: u32,
}

impl LineSlide {
    pub fn new(
        smooth: bool,
        now_ms: u32,
    ) -> Self {
        Self {
            line_index: 0,
            shown: Line::default(),
            sliding: None,
            smooth,
            last_line_ms: now_ms,
        }
    }

    pub fn reset(
        &mut self,
        now_ms: u32,
    ) {
        self.line_index = 0;
        self.shown = Line::default();
        self.sliding = None;
        self.last_line_ms = now_ms;
    }

    pub fn set_smooth(
        &mut self,
        smooth: bool,
    ) {
        self.smooth = smooth;
    }

    #[inline]
    pub const fn line_index(&self) -> usize { self.line_index }

    #[inline]
    pub const fn is_sliding(&self) -> bool { self.sliding.is_some() }

    /// Line on the display once any slide finishes.
    pub fn shown(&self) -> &Line { &self.shown }

    const fn steps(&self) -> u8 { if self.smooth { SLIDE_STEPS_SMOOTH } else { SLIDE_STEPS_FAST } }

    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        content: &mut ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
    ) -> bool {
        if let Some((incoming, step)) = self.sliding.take() {
            return self.slide_step(content, frame, incoming, step);
        }

        if content.current_lines().is_empty() {
            content.select_random_story(frame.rng);
            self.shown = Line::default();
            frame.blank();
            return true;
        }

        let Some(line) = content.line(self.line_index) else {
            self.line_index = 0;
            self.shown = Line::default();
            content.select_random_story(frame.rng);
            frame.blank();
            return true;
        };

        if elapsed_ms(frame.now_ms, self.last_line_ms) >= reading_time_ms(line.printable_len()) {
            return self.slide_step(content, frame, line, 0);
        }

        frame.surface.clear();
        paint_line(content, frame, self.shown.as_bytes(), 0);
        frame.flush();
        false
    }

    /// Paint slide frame `step` and commit the line after the last one.
    fn slide_step<S: PixelSurface, R: RngCore>(
        &mut self,
        content: &ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
        incoming: Line,
        step: u8,
    ) -> bool {
        let steps = self.steps();
        let offset = (i32::from(step) + 1) * SLIDE_DISTANCE / i32::from(steps);

        frame.surface.clear();
        paint_line(content, frame, self.shown.as_bytes(), -offset);
        paint_line(content, frame, incoming.as_bytes(), SLIDE_DISTANCE - offset);
        frame.flush();

        if step + 1 < steps {
            self.sliding = Some((incoming, step + 1));
            return false;
        }

        frame.chars_advanced += incoming.printable_len() as u32;
        self.shown = incoming;
        self.line_index += 1;
        self.last_line_ms = frame.now_ms;
        true
    }
}
