//! Whole-character scroll at a fixed reading speed.

use rand::RngCore;

use super::paint_window;
use crate::config::{CHAR_INTERVAL_MS, DISPLAY_CHARS};
use crate::content::ContentManager;
use crate::frame::Frame;
use crate::surface::PixelSurface;
use crate::timing::elapsed_ms;

pub struct CharacterScroll {
    column: usize,
    /// Show one blank frame before the next paint.
    pending_pause: bool,
    smooth: bool,
    last_char_ms: u32,
}

impl CharacterScroll {
    pub const fn new(
        smooth: bool,
        now_ms: u32,
    ) -> Self {
        Self {
            column: 0,
            pending_pause: true,
            smooth,
            last_char_ms: now_ms,
        }
    }

    pub fn reset(
        &mut self,
        now_ms: u32,
    ) {
        self.column = 0;
        self.pending_pause = true;
        self.last_char_ms = now_ms;
    }

    pub fn set_smooth(
        &mut self,
        smooth: bool,
    ) {
        self.smooth = smooth;
    }

    #[inline]
    pub const fn column(&self) -> usize { self.column }

    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        content: &mut ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
    ) -> bool {
        if self.pending_pause {
            self.pending_pause = false;
            if self.smooth {
                frame.blank();
                return false;
            }
        }

        if elapsed_ms(frame.now_ms, self.last_char_ms) < CHAR_INTERVAL_MS {
            self.paint(content, frame);
            return false;
        }
        self.last_char_ms = frame.now_ms;

        if content.has_newline_at(self.column) {
            self.column = content.find_next_printable_char(self.column);
            self.pending_pause = true;
            self.paint(content, frame);
            return true;
        }

        self.paint(content, frame);

        if self.column + DISPLAY_CHARS < content.story_length() {
            self.column += 1;
        } else {
            self.column = 0;
            content.select_random_story(frame.rng);
        }
        frame.chars_advanced += 1;
        true
    }

    fn paint<S: PixelSurface, R: RngCore>(
        &self,
        content: &ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
    ) {
        frame.surface.clear();
        paint_window(content, frame, self.column, 0, 255);
        frame.flush();
    }
}
