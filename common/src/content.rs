//! Story storage, word-wrap and per-character coloring.
//!
//! # Architecture
//!
//! [`ContentManager`] owns the story list (borrowed `&str`, never copied) and
//! the selection state:
//! - `current_story` plus byte-level navigation for the column scrollers
//! - `current_lines`, the word-wrapped view of the current story, rebuilt
//!   lazily the first time it is asked for after a story change
//! - `character_color`, the active [`ColorMode`]'s color policy
//!
//! Stories are addressed by byte: every byte is one character cell.
//!
//! # Word Wrap
//!
//! Each `\n`-separated segment is trimmed and, while longer than the display,
//! broken at the last space inside the first `DISPLAY_CHARS` bytes. A segment
//! with no usable space is hard-broken at exactly the display width. Every
//! emitted line is padded to the full width; blank segments are dropped.

use embedded_graphics::pixelcolor::Rgb888;
use heapless::Vec;
use rand::{Rng, RngCore};

use crate::colors::hsv;
use crate::config::{DISPLAY_CHARS, MAX_LINES, MAX_STORIES};
use crate::error::ConfigError;
use crate::log::log_warn;

// =============================================================================
// Line
// =============================================================================

/// One display-width row of wrapped story text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line(Vec<u8, DISPLAY_CHARS>);

/// Wrapped lines of one story.
pub type Lines = Vec<Line, MAX_LINES>;

impl Line {
    /// Copy `text` and right-pad it with spaces to `width` bytes.
    fn padded(
        text: &[u8],
        width: usize,
    ) -> Self {
        let mut line = Vec::new();
        for &b in text.iter().take(DISPLAY_CHARS) {
            line.push(b).ok();
        }
        while line.len() < width.min(DISPLAY_CHARS) {
            line.push(b' ').ok();
        }
        Self(line)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    #[inline]
    pub fn len(&self) -> usize { self.0.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// The line without leading and trailing whitespace.
    pub fn trimmed(&self) -> &[u8] { self.0.trim_ascii() }

    /// Copy of the line without leading and trailing whitespace.
    pub fn trimmed_copy(&self) -> Self { Self::padded(self.trimmed(), 0) }

    /// Number of cells left after trimming the padding.
    pub fn printable_len(&self) -> usize { self.trimmed().len() }
}

impl PartialEq<str> for Line {
    fn eq(
        &self,
        other: &str,
    ) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Line {
    fn eq(
        &self,
        other: &&str,
    ) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

// =============================================================================
// Word Wrap
// =============================================================================

/// Wrap `story` to the display width.
///
/// Lines past [`MAX_LINES`] are dropped.
pub fn extract_lines(story: &str) -> Lines {
    let mut lines = Lines::new();
    if !wrap_into(story.as_bytes(), DISPLAY_CHARS, &mut lines) {
        log_warn!("story wrapped past {=usize} lines, tail dropped", MAX_LINES);
    }
    lines
}

/// Greedy word-wrap of `text` to `width` bytes (at most `DISPLAY_CHARS`).
///
/// Returns `false` when `out` filled up and lines were dropped.
pub fn wrap_into<const N: usize>(
    text: &[u8],
    width: usize,
    out: &mut Vec<Line, N>,
) -> bool {
    let width = width.clamp(1, DISPLAY_CHARS);
    let mut complete = true;
    let mut emit = |line: Line| {
        if out.push(line).is_err() {
            complete = false;
        }
    };

    for segment in text.split(|&b| b == b'\n') {
        let mut rest = segment.trim_ascii();
        if rest.is_empty() {
            continue;
        }

        while rest.len() > width {
            match rest[..width].iter().rposition(|&b| b == b' ') {
                Some(space) if space > 0 => {
                    emit(Line::padded(&rest[..space], width));
                    rest = &rest[space + 1..];
                }
                _ => {
                    emit(Line::padded(&rest[..width], width));
                    rest = &rest[width..];
                }
            }
        }

        if !rest.is_empty() {
            emit(Line::padded(rest, width));
        }
    }

    complete
}

// =============================================================================
// Color Modes
// =============================================================================

/// Per-character color policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorMode {
    /// Hue keyed to the nearest preceding space.
    #[default]
    WordBased,
    /// Hue sweeps across the window.
    RainbowScroll,
    /// Stable pseudo-random hue per word.
    RandomWords,
    /// One slowly drifting hue with per-column brightness.
    SingleColor,
}

impl ColorMode {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [Self::WordBased, Self::RainbowScroll, Self::RandomWords, Self::SingleColor];

    pub const fn name(self) -> &'static str {
        match self {
            Self::WordBased => "Word-Based",
            Self::RainbowScroll => "Rainbow Scroll",
            Self::RandomWords => "Random Words",
            Self::SingleColor => "Single Color",
        }
    }

    pub const fn from_index(index: usize) -> Self { Self::ALL[index % Self::COUNT] }

    pub const fn index(self) -> usize {
        match self {
            Self::WordBased => 0,
            Self::RainbowScroll => 1,
            Self::RandomWords => 2,
            Self::SingleColor => 3,
        }
    }

    pub const fn next(self) -> Self { Self::from_index(self.index() + 1) }
}

const TEXT_SATURATION: u8 = 255;
const TEXT_VALUE: u8 = 180;

/// Hue wheel modulus. Hue 255 is never produced.
const HUE_RANGE: usize = 255;

fn word_color(
    text: &[u8],
    at: usize,
) -> Rgb888 {
    let start = at.min(text.len().saturating_sub(1));
    let prev_space = text
        .get(..=start)
        .and_then(|head| head.iter().rposition(|&b| b == b' '))
        .unwrap_or(0);
    hsv(((prev_space % 25) * 10) as u8, TEXT_SATURATION, TEXT_VALUE)
}

fn random_word_color(
    text: &[u8],
    at: usize,
) -> Rgb888 {
    let mut start = at;
    while start > 0 && text.get(start - 1).is_none_or(|&b| b != b' ') {
        start -= 1;
    }
    hsv(((start * 73) % HUE_RANGE) as u8, TEXT_SATURATION, TEXT_VALUE)
}

// =============================================================================
// Content Manager
// =============================================================================

pub struct ContentManager<'a> {
    stories: Vec<&'a str, MAX_STORIES>,
    current: usize,
    color_mode: ColorMode,
    lines: Lines,
    lines_stale: bool,
}

impl<'a> ContentManager<'a> {
    pub const fn new() -> Self {
        Self {
            stories: Vec::new(),
            current: 0,
            color_mode: ColorMode::WordBased,
            lines: Vec::new(),
            lines_stale: true,
        }
    }

    /// Build a manager from a story list.
    pub fn with_stories(stories: &[&'a str]) -> Result<Self, ConfigError> {
        let mut content = Self::new();
        for story in stories {
            content.add_story(story)?;
        }
        content.validate()?;
        Ok(content)
    }

    pub fn add_story(
        &mut self,
        story: &'a str,
    ) -> Result<(), ConfigError> {
        self.stories.push(story).map_err(|_| ConfigError::TooManyStories)?;
        self.lines_stale = true;
        Ok(())
    }

    /// Fails when there is nothing to show.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stories.is_empty() {
            Err(ConfigError::NoStories)
        } else {
            Ok(())
        }
    }

    #[inline]
    pub fn story_count(&self) -> usize { self.stories.len() }

    #[inline]
    pub const fn current_story_index(&self) -> usize { self.current }

    /// Select story `index`. Out-of-range indices are ignored.
    pub fn select_story(
        &mut self,
        index: usize,
    ) {
        if index < self.stories.len() {
            self.current = index;
            self.lines_stale = true;
        }
    }

    /// Select a story uniformly at random. No-op without stories.
    pub fn select_random_story<R: RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
    ) {
        if !self.stories.is_empty() {
            self.current = rng.random_range(0..self.stories.len());
            self.lines_stale = true;
        }
    }

    /// Current story, or `""` without stories.
    pub fn current_story(&self) -> &'a str { self.stories.get(self.current).copied().unwrap_or("") }

    #[inline]
    pub fn story_length(&self) -> usize { self.current_story().len() }

    /// Byte at `pos`, or a space past the end.
    pub fn character_at(
        &self,
        pos: usize,
    ) -> u8 {
        self.current_story().as_bytes().get(pos).copied().unwrap_or(b' ')
    }

    #[inline]
    pub fn is_at_story_end(
        &self,
        pos: usize,
    ) -> bool {
        pos >= self.story_length()
    }

    #[inline]
    pub fn has_newline_at(
        &self,
        pos: usize,
    ) -> bool {
        self.character_at(pos) == b'\n'
    }

    /// First position after `start` whose byte is not a space or newline.
    ///
    /// Returns a position at or past the end when only blanks remain.
    pub fn find_next_printable_char(
        &self,
        start: usize,
    ) -> usize {
        let story = self.current_story().as_bytes();
        let mut pos = start;
        while pos < story.len() {
            let next = story.get(pos + 1).copied();
            pos += 1;
            if !matches!(next, Some(b' ' | b'\n')) {
                break;
            }
        }
        pos
    }

    /// Mark the line cache stale.
    pub fn reset(&mut self) { self.lines_stale = true; }

    /// Wrapped lines of the current story, rebuilt if stale.
    pub fn current_lines(&mut self) -> &[Line] {
        if self.lines_stale {
            self.lines = extract_lines(self.current_story());
            self.lines_stale = false;
        }
        &self.lines
    }

    /// Copy of wrapped line `index` of the current story.
    pub fn line(
        &mut self,
        index: usize,
    ) -> Option<Line> {
        self.current_lines().get(index).cloned()
    }

    #[inline]
    pub const fn color_mode(&self) -> ColorMode { self.color_mode }

    pub fn set_color_mode(
        &mut self,
        mode: ColorMode,
    ) {
        self.color_mode = mode;
    }

    pub fn randomize_color_mode<R: RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> ColorMode {
        self.color_mode = ColorMode::from_index(rng.random_range(0..ColorMode::COUNT));
        self.color_mode
    }

    /// Color for window column `position` of `text` scrolled by `scroll`.
    pub fn character_color(
        &self,
        text: &[u8],
        position: usize,
        scroll: usize,
        now_ms: u32,
    ) -> Rgb888 {
        match self.color_mode {
            ColorMode::WordBased => word_color(text, position + scroll),
            ColorMode::RainbowScroll => hsv(((position * 10) % HUE_RANGE) as u8, TEXT_SATURATION, TEXT_VALUE),
            ColorMode::RandomWords => random_word_color(text, position + scroll),
            ColorMode::SingleColor => {
                let hue = ((now_ms / 1000) % HUE_RANGE as u32) as u8;
                let value = 120 + ((position * 20) % 135) as u8;
                hsv(hue, TEXT_SATURATION, value)
            }
        }
    }
}

impl Default for ContentManager<'_> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn wrap(
        text: &str,
        width: usize,
    ) -> Vec<Line, 16> {
        let mut out = Vec::new();
        assert!(wrap_into(text.as_bytes(), width, &mut out));
        out
    }

    #[test]
    fn test_wrap_prefers_space_break() {
        let lines = wrap("The quick brown fox jumps", 10);
        assert_eq!(lines[0], "The quick ");
        assert_eq!(lines[1], "brown fox ");
        assert_eq!(lines[2], "jumps     ");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_wrap_hard_breaks_long_words() {
        let lines = wrap("abcdefghijklmno", 10);
        assert_eq!(lines[0], "abcdefghij");
        assert_eq!(lines[1], "klmno     ");
    }

    #[test]
    fn test_wrap_hard_break_keeps_following_space() {
        let lines = wrap("abcdefghij klm", 10);
        assert_eq!(lines[0], "abcdefghij");
        assert_eq!(lines[1], " klm      ");
    }

    #[test]
    fn test_wrap_short_input_is_padded() {
        let lines = wrap("hello", 10);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "hello     ");
    }

    #[test]
    fn test_wrap_drops_blank_segments() {
        let lines = wrap("one\n\n   \ntwo\n", 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one       ");
        assert_eq!(lines[1], "two       ");
    }

    #[test]
    fn test_wrap_every_line_is_full_width() {
        let text = "It was a bright cold day in April, and the clocks were striking thirteen.\n\
                    Winston Smith, his chin nuzzled into his breast in an effort to escape the vile wind, \
                    slipped quickly through the glass doors of Victory Mansions.\n\
                    supercalifragilisticexpialidociousandthensome words";
        for width in [5, 10, 17, DISPLAY_CHARS] {
            let mut out: Vec<Line, 128> = Vec::new();
            assert!(wrap_into(text.as_bytes(), width, &mut out));
            assert!(!out.is_empty());
            for line in &out {
                assert_eq!(line.len(), width);
            }
        }
    }

    #[test]
    fn test_wrap_reports_overflow() {
        let mut out: Vec<Line, 2> = Vec::new();
        assert!(!wrap_into(b"a\nb\nc", 10, &mut out));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_extract_lines_uses_display_width() {
        let lines = extract_lines("Hi");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), DISPLAY_CHARS);
        assert_eq!(lines[0].printable_len(), 2);
    }

    #[test]
    fn test_empty_manager_degrades() {
        let content = ContentManager::new();
        assert_eq!(content.current_story(), "");
        assert_eq!(content.character_at(5), b' ');
        assert_eq!(content.validate(), Err(ConfigError::NoStories));
    }

    #[test]
    fn test_too_many_stories() {
        let mut content = ContentManager::new();
        for _ in 0..MAX_STORIES {
            content.add_story("s").unwrap();
        }
        assert_eq!(content.add_story("s"), Err(ConfigError::TooManyStories));
    }

    #[test]
    fn test_character_navigation() {
        let content = ContentManager::with_stories(&["ab\n  cd"]).unwrap();
        assert_eq!(content.character_at(0), b'a');
        assert_eq!(content.character_at(100), b' ');
        assert!(content.has_newline_at(2));
        assert_eq!(content.find_next_printable_char(2), 5);
        assert!(content.is_at_story_end(7));
        assert!(!content.is_at_story_end(6));
    }

    #[test]
    fn test_find_next_printable_past_trailing_blanks() {
        let content = ContentManager::with_stories(&["ab\n "]).unwrap();
        assert!(content.find_next_printable_char(2) >= content.story_length());
    }

    #[test]
    fn test_select_story_ignores_out_of_range() {
        let mut content = ContentManager::with_stories(&["a", "b"]).unwrap();
        content.select_story(1);
        assert_eq!(content.current_story(), "b");
        content.select_story(9);
        assert_eq!(content.current_story_index(), 1);
    }

    #[test]
    fn test_random_story_stays_in_range() {
        let mut content = ContentManager::with_stories(&["a", "b", "c"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..64 {
            content.select_random_story(&mut rng);
            seen[content.current_story_index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_line_cache_follows_story_switch() {
        let mut content = ContentManager::with_stories(&["first", "second\nthird"]).unwrap();
        assert_eq!(content.current_lines().len(), 1);
        content.select_story(1);
        assert_eq!(content.current_lines().len(), 2);
        assert_eq!(content.line(1).unwrap().trimmed(), b"third");
    }

    #[test]
    fn test_word_based_constant_within_word() {
        let content = ContentManager::with_stories(&["one lovely sentence"]).unwrap();
        let text = content.current_story().as_bytes();
        let first = content.character_color(text, 4, 0, 0);
        for pos in 5..10 {
            assert_eq!(content.character_color(text, pos, 0, 0), first);
        }
        // Scroll offset shifts the lookup, not the result for the same byte
        assert_eq!(content.character_color(text, 2, 3, 0), content.character_color(text, 5, 0, 0));
        // Past the end resolves against the last byte
        let _ = content.character_color(text, 500, 0, 0);
    }

    #[test]
    fn test_random_words_constant_within_word() {
        let mut content = ContentManager::with_stories(&["alpha beta gamma"]).unwrap();
        content.set_color_mode(ColorMode::RandomWords);
        let text = content.current_story().as_bytes();
        let beta = content.character_color(text, 6, 0, 0);
        for pos in 7..10 {
            assert_eq!(content.character_color(text, pos, 0, 0), beta);
        }
        assert_eq!(beta, hsv(((6 * 73) % 255) as u8, 255, 180));
        // Time does not matter
        assert_eq!(content.character_color(text, 6, 0, 99_000), beta);
    }

    #[test]
    fn test_rainbow_and_single_color() {
        let mut content = ContentManager::with_stories(&["x"]).unwrap();
        content.set_color_mode(ColorMode::RainbowScroll);
        assert_eq!(content.character_color(b"x", 26, 0, 0), hsv(5, 255, 180));

        content.set_color_mode(ColorMode::SingleColor);
        assert_eq!(content.character_color(b"x", 7, 0, 3_500), hsv(3, 255, 120 + 5));
    }

    #[test]
    fn test_color_mode_cycle_wraps() {
        assert_eq!(ColorMode::SingleColor.next(), ColorMode::WordBased);
        assert_eq!(ColorMode::from_index(5), ColorMode::RainbowScroll);
        assert_eq!(ColorMode::RandomWords.name(), "Random Words");
    }
}
