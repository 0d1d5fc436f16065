//! Typewriter reveal with a flashing cursor.
//!
//! Per line: `Idle` seeds a trimmed copy, `Revealing` uncovers one character
//! every [`WIPE_STEP_MS`] behind an inverted cursor cell, `Flashing` blinks a
//! block cursor after the text [`FLASH_STEPS`] times and then holds the text
//! until the line's reading time plus [`WIPE_LINE_HOLD_MS`] has passed.

use rand::RngCore;

use super::reading_time_ms;
use crate::colors::WHITE;
use crate::config::{DISPLAY_CHARS, FLASH_STEP_MS, FLASH_STEPS, WIPE_LINE_HOLD_MS, WIPE_STEP_MS};
use crate::content::{ContentManager, Line};
use crate::frame::Frame;
use crate::surface::PixelSurface;
use crate::text::{draw_char, draw_cursor};
use crate::timing::elapsed_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeState {
    Idle,
    /// Next frame reveals `step` characters with the cursor on cell `step`.
    Revealing { step: u8 },
    /// Cursor toggles done so far. Even counts paint the cursor.
    Flashing { toggles: u8 },
}

pub struct CursorWipe {
    line_index: usize,
    state: WipeState,
    /// Trimmed copy of the line being wiped.
    text: Line,
    last_state_ms: u32,
    last_line_ms: u32,
}

impl CursorWipe {
    pub fn new(now_ms: u32) -> Self {
        Self {
            line_index: 0,
            state: WipeState::Idle,
            text: Line::default(),
            last_state_ms: now_ms,
            last_line_ms: now_ms,
        }
    }

    pub fn reset(
        &mut self,
        now_ms: u32,
    ) {
        *self = Self::new(now_ms);
    }

    #[inline]
    pub const fn line_index(&self) -> usize { self.line_index }

    #[inline]
    pub const fn state(&self) -> WipeState { self.state }

    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        content: &mut ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
    ) -> bool {
        if content.current_lines().is_empty() {
            content.select_random_story(frame.rng);
            frame.blank();
            return true;
        }

        let Some(line) = content.line(self.line_index) else {
            self.line_index = 0;
            self.state = WipeState::Idle;
            content.select_random_story(frame.rng);
            frame.blank();
            return true;
        };

        let now = frame.now_ms;
        match self.state {
            WipeState::Idle => {
                if self.line_index == 0 {
                    frame.blank();
                }
                self.text = line.trimmed_copy();
                self.state = WipeState::Revealing { step: 0 };
                self.last_state_ms = now;
                false
            }
            WipeState::Revealing { step } => {
                if elapsed_ms(now, self.last_state_ms) < WIPE_STEP_MS {
                    return false;
                }
                self.paint(content, frame, usize::from(step), None);
                self.last_state_ms = now;

                self.state = if usize::from(step) + 1 > self.text.len() {
                    WipeState::Flashing { toggles: 0 }
                } else {
                    WipeState::Revealing { step: step + 1 }
                };
                false
            }
            WipeState::Flashing { toggles } if toggles < FLASH_STEPS => {
                if elapsed_ms(now, self.last_state_ms) >= FLASH_STEP_MS {
                    let cursor = (toggles % 2 == 0).then_some(self.text.len());
                    self.paint(content, frame, self.text.len(), cursor);
                    self.state = WipeState::Flashing { toggles: toggles + 1 };
                    self.last_state_ms = now;
                }
                false
            }
            WipeState::Flashing { .. } => {
                let hold = reading_time_ms(self.text.len()) + WIPE_LINE_HOLD_MS;
                if elapsed_ms(now, self.last_line_ms) < hold {
                    return false;
                }
                frame.chars_advanced += self.text.len() as u32;
                self.line_index += 1;
                self.last_line_ms = now;
                self.state = WipeState::Idle;
                true
            }
        }
    }

    /// Paint `revealed` characters, an inverted cursor on the next one while
    /// revealing, and optionally a block cursor at cell `block`.
    fn paint<S: PixelSurface, R: RngCore>(
        &self,
        content: &ContentManager<'_>,
        frame: &mut Frame<'_, S, R>,
        revealed: usize,
        block: Option<usize>,
    ) {
        let text = self.text.as_bytes();
        frame.surface.clear();
        for (pos, &code) in text.iter().enumerate() {
            if pos < revealed {
                let color = content.character_color(text, pos, 0, frame.now_ms);
                draw_char(frame.surface, frame.font, code, pos as i32, color, 0, 0);
            } else if pos == revealed {
                draw_cursor(frame.surface, frame.font, code, pos as i32, WHITE);
            }
        }
        if let Some(cell) = block.filter(|&cell| cell < DISPLAY_CHARS) {
            draw_cursor(frame.surface, frame.font, b' ', cell as i32, WHITE);
        }
        frame.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;
    use crate::config::GLYPH_HEIGHT;
    use crate::config::GLYPH_WIDTH;
    use crate::font::Font;
    use crate::transitions::test_support::Rig;

    fn run(
        t: &mut CursorWipe,
        content: &mut ContentManager<'_>,
        rig: &mut Rig,
    ) -> bool {
        let mut frame = rig.frame();
        t.update(content, &mut frame)
    }

    fn cell_fully_lit(
        rig: &Rig,
        cell: i32,
    ) -> bool {
        let x0 = cell * GLYPH_WIDTH as i32;
        (0..GLYPH_HEIGHT as i32).all(|y| (x0..x0 + GLYPH_WIDTH as i32).all(|x| rig.fb.pixel(x, y) == Some(WHITE)))
    }

    #[test]
    fn test_reveal_steps_every_interval() {
        let mut content = ContentManager::with_stories(&["abc"]).unwrap();
        let mut rig = Rig::new();
        let mut t = CursorWipe::new(rig.now);

        run(&mut t, &mut content, &mut rig);
        assert_eq!(t.state(), WipeState::Revealing { step: 0 });

        rig.advance(WIPE_STEP_MS - 1);
        run(&mut t, &mut content, &mut rig);
        assert_eq!(t.state(), WipeState::Revealing { step: 0 });

        // length + 1 reveal frames, then flashing
        for step in 1..=3 {
            rig.advance(WIPE_STEP_MS);
            run(&mut t, &mut content, &mut rig);
            assert_eq!(t.state(), WipeState::Revealing { step });
        }
        rig.advance(WIPE_STEP_MS);
        run(&mut t, &mut content, &mut rig);
        assert_eq!(t.state(), WipeState::Flashing { toggles: 0 });
    }

    fn cell_dark(
        rig: &Rig,
        cell: i32,
    ) -> bool {
        let x0 = cell * GLYPH_WIDTH as i32;
        (0..GLYPH_HEIGHT as i32).all(|y| (x0..x0 + GLYPH_WIDTH as i32).all(|x| rig.fb.pixel(x, y) == Some(BLACK)))
    }

    #[test]
    fn test_reveal_shows_inverted_cursor_ahead_of_text() {
        let mut content = ContentManager::with_stories(&["abcdef"]).unwrap();
        let mut rig = Rig::new();
        let mut t = CursorWipe::new(rig.now);
        run(&mut t, &mut content, &mut rig);

        // Frames for steps 0, 1 and 2: two characters shown, cursor on 'c'
        for _ in 0..3 {
            rig.advance(WIPE_STEP_MS);
            run(&mut t, &mut content, &mut rig);
        }
        assert_eq!(t.state(), WipeState::Revealing { step: 3 });

        assert!(!cell_dark(&rig, 0));
        assert!(!cell_dark(&rig, 1));
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                let expected = if rig.font.glyph(b'c', col, row) { BLACK } else { WHITE };
                assert_eq!(rig.fb.pixel(10 + col as i32, row as i32), Some(expected), "({col}, {row})");
            }
        }
        for cell in 3..DISPLAY_CHARS as i32 {
            assert!(cell_dark(&rig, cell), "cell {cell}");
        }
    }

    #[test]
    fn test_flash_shows_block_cursor_after_text() {
        let mut content = ContentManager::with_stories(&["ab"]).unwrap();
        let mut rig = Rig::new();
        let mut t = CursorWipe::new(rig.now);
        run(&mut t, &mut content, &mut rig);
        for _ in 0..3 {
            rig.advance(WIPE_STEP_MS);
            run(&mut t, &mut content, &mut rig);
        }
        assert_eq!(t.state(), WipeState::Flashing { toggles: 0 });

        rig.advance(FLASH_STEP_MS);
        run(&mut t, &mut content, &mut rig);
        assert!(cell_fully_lit(&rig, 2));

        rig.advance(FLASH_STEP_MS);
        run(&mut t, &mut content, &mut rig);
        assert!(!cell_fully_lit(&rig, 2));
    }

    #[test]
    fn test_exactly_three_flash_cycles_for_any_length() {
        for story in ["x", "medium length line", "a line that fills all 32 cells!!"] {
            let mut content = ContentManager::with_stories(&[story, story]).unwrap();
            let mut rig = Rig::new();
            let mut t = CursorWipe::new(rig.now);

            let mut cursor_on = 0;
            let mut flash_frames = 0;
            let mut advanced = false;
            for _ in 0..2000 {
                rig.advance(20);
                let before = rig.fb.flush_count();
                let was_flashing = matches!(t.state(), WipeState::Flashing { .. });
                let toggles = match t.state() {
                    WipeState::Flashing { toggles } => toggles,
                    _ => 0,
                };
                if run(&mut t, &mut content, &mut rig) {
                    advanced = true;
                    break;
                }
                if was_flashing && rig.fb.flush_count() > before {
                    flash_frames += 1;
                    if toggles % 2 == 0 {
                        cursor_on += 1;
                    }
                }
            }
            assert!(advanced, "{story}");
            assert_eq!(flash_frames, 6, "{story}");
            assert_eq!(cursor_on, 3, "{story}");
            assert_eq!(t.line_index(), 1);
        }
    }

    #[test]
    fn test_waits_for_line_hold_after_flashing() {
        let mut content = ContentManager::with_stories(&["x\ny"]).unwrap();
        let mut rig = Rig::new();
        let mut t = CursorWipe::new(rig.now);
        let start = rig.now;
        let mut advanced_at = None;
        for _ in 0..500 {
            rig.advance(20);
            if run(&mut t, &mut content, &mut rig) {
                advanced_at = Some(rig.now);
                break;
            }
        }
        let advanced_at = advanced_at.unwrap();
        assert!(advanced_at - start >= reading_time_ms(1) + WIPE_LINE_HOLD_MS);
        assert_eq!(t.state(), WipeState::Idle);
    }

    #[test]
    fn test_list_end_selects_new_story() {
        let mut content = ContentManager::with_stories(&["x"]).unwrap();
        let mut rig = Rig::new();
        let mut t = CursorWipe::new(rig.now);
        t.line_index = 1;
        assert!(run(&mut t, &mut content, &mut rig));
        assert_eq!(t.line_index(), 0);
        assert_eq!(rig.fb.lit_pixels(), 0);
    }
}
