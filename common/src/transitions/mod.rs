//! Text transitions.
//!
//! # Architecture
//!
//! Four strategies move through the current story, each a small state machine
//! that renders at most one frame per [`Transition::update`] call:
//!
//! | Strategy          | Progress          | Handoff                           |
//! |-------------------|-------------------|-----------------------------------|
//! | `SmoothScroll`    | story column      | 6 sub-pixel frames per column     |
//! | `CharacterScroll` | story column      | one column per 1/15 s             |
//! | `LineSlide`       | wrapped line      | vertical slide, old line exits up |
//! | `CursorWipe`      | wrapped line      | reveal behind a cursor, flash     |
//!
//! Every multi-frame burst (dissolve, pre-roll fade, slide) is a sub-state
//! with its own step counter, so a tick never blocks.
//!
//! `update` returns `true` when the strategy moved its position: a column, a
//! line, or a story switch.

mod character_scroll;
mod cursor_wipe;
mod line_slide;
mod smooth_scroll;

pub use character_scroll::CharacterScroll;
pub use cursor_wipe::{CursorWipe, WipeState};
pub use line_slide::LineSlide;
pub use smooth_scroll::{ScrollPhase, SmoothScroll};

use rand::RngCore;

use crate::colors::scale;
use crate::config::DISPLAY_CHARS;
use crate::content::ContentManager;
use crate::frame::Frame;
use crate::surface::PixelSurface;
use crate::text::draw_row;

// =============================================================================
// Transition Type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionType {
    #[default]
    SmoothScroll,
    CharacterScroll,
    LineSlide,
    CursorWipe,
}

impl TransitionType {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [Self::SmoothScroll, Self::CharacterScroll, Self::LineSlide, Self::CursorWipe];

    pub const fn name(self) -> &'static str {
        match self {
            Self::SmoothScroll => "Smooth Scroll",
            Self::CharacterScroll => "Character Scroll",
            Self::LineSlide => "Line Slide",
            Self::CursorWipe => "Cursor Wipe",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::SmoothScroll => 0,
            Self::CharacterScroll => 1,
            Self::LineSlide => 2,
            Self::CursorWipe => 3,
        }
    }

    /// Wraps modulo [`Self::COUNT`].
    pub const fn from_index(index: usize) -> Self { Self::ALL[index % Self::COUNT] }

    pub const fn next(self) -> Self { Self::from_index(self.index() + 1) }
}

// =============================================================================
// Transition
// =============================================================================

/// The active strategy and its progress.
pub enum Transition {
    SmoothScroll(SmoothScroll),
    CharacterScroll(CharacterScroll),
    LineSlide(LineSlide),
    CursorWipe(CursorWipe),
}

impl Transition {
    pub fn new(
        kind: TransitionType,
        smooth: bool,
        now_ms: u32,
    ) -> Self {
        match kind {
            TransitionType::SmoothScroll => Self::SmoothScroll(SmoothScroll::new(smooth, now_ms)),
            TransitionType::CharacterScroll => Self::CharacterScroll(CharacterScroll::new(smooth, now_ms)),
            TransitionType::LineSlide => Self::LineSlide(LineSlide::new(smooth, now_ms)),
            TransitionType::CursorWipe => Self::CursorWipe(CursorWipe::new(now_ms)),
        }
    }

    pub const fn transition_type(&self) -> TransitionType {
        match self {
            Self::SmoothScroll(_) => TransitionType::SmoothScroll,
            Self::CharacterScroll(_) => TransitionType::CharacterScroll,
            Self::LineSlide(_) => TransitionType::LineSlide,
            Self::CursorWipe(_) => TransitionType::CursorWipe,
        }
    }

    /// Restart from the top of the current story.
    pub fn reset(
        &mut self,
        now_ms: u32,
    ) {
        match self {
            Self::SmoothScroll(t) => t.reset(now_ms),
            Self::CharacterScroll(t) => t.reset(now_ms),
            Self::LineSlide(t) => t.reset(now_ms),
            Self::CursorWipe(t) => t.reset(now_ms),
        }
    }

    /// Toggle pre-roll fades and multi-step slides.
    pub fn set_smooth(
        &mut self,
        smooth: bool,
    ) {
        match self {
            Self::SmoothScroll(t) => t.set_smooth(smooth),
            Self::CharacterScroll(t) => t.set_smooth(smooth),
            Self::LineSlide(t) => t.set_smooth(smooth),
            Self::CursorWipe(_) => {}
        }
    }

    /// Run one tick. Returns `true` if the position advanced.
    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        content: &mut ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
    ) -> bool {
        match self {
            Self::SmoothScroll(t) => t.update(content, frame),
            Self::CharacterScroll(t) => t.update(content, frame),
            Self::LineSlide(t) => t.update(content, frame),
            Self::CursorWipe(t) => t.update(content, frame),
        }
    }
}

// =============================================================================
// Shared Painters
// =============================================================================

/// Paint the scroll window at story column `column`.
///
/// One cell more than the display is drawn so a sub-pixel shift never shows
/// an empty right edge.
fn paint_window<S: PixelSurface, R: RngCore>(
    content: &ContentManager<'_>,
    frame: &mut Frame<'_, S, R>,
    column: usize,
    dx: i32,
    brightness: u8,
) {
    let story = content.current_story().as_bytes();
    let window = story.get(column..).unwrap_or(&[]);
    let now = frame.now_ms;
    draw_row(frame.surface, frame.font, window, DISPLAY_CHARS + 1, dx, 0, |pos| {
        scale(content.character_color(story, pos, column, now), brightness)
    });
}

/// Paint one wrapped line at vertical offset `dy`.
fn paint_line<S: PixelSurface, R: RngCore>(
    content: &ContentManager<'_>,
    frame: &mut Frame<'_, S, R>,
    line: &[u8],
    dy: i32,
) {
    let now = frame.now_ms;
    draw_row(frame.surface, frame.font, line, DISPLAY_CHARS, 0, dy, |pos| {
        content.character_color(line, pos, 0, now)
    });
}

/// Reading time of a line with `printable` visible characters.
const fn reading_time_ms(printable: usize) -> u32 { (printable as u32 * 1000) / crate::config::CPS_TARGET }

// =============================================================================
// Test Support
// =============================================================================
