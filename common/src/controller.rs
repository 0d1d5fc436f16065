//! Display controller.
//!
//! Owns the content, the active text transition and every decorative mode,
//! and drives exactly one of them per control-loop tick.
//!
//! # Architecture
//!
//! ```text
//! tick(surface, font, rng, clock)
//!   ├─ TextContent    → Transition::update(content, frame)
//!   ├─ SpaceAnimation → SpaceAnimation::update + render
//!   ├─ ColorShow      → ColorShow::update
//!   └─ TestPatterns   → TestPatterns::update
//!   then FrameMetrics::record_tick → EventLog
//! ```
//!
//! Setters called between ticks restart timers from the clock reading of the
//! last tick.

use rand::RngCore;

use crate::color_show::ColorShow;
use crate::config::{AUTO_TRANSITION_CYCLE_INTERVAL_MS, ENABLE_AUTO_TRANSITION_CYCLING, LINE_TRANSITION_SMOOTH};
use crate::content::ContentManager;
use crate::error::ConfigError;
use crate::font::Font;
use crate::frame::Frame;
use crate::log::EventLog;
use crate::metrics::{FrameMetrics, PerformanceReport};
use crate::space::SpaceAnimation;
use crate::surface::PixelSurface;
use crate::test_patterns::TestPatterns;
use crate::timing::{Clock, elapsed_ms};
use crate::transitions::{Transition, TransitionType};

// =============================================================================
// Display Mode
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Stories through the active transition.
    #[default]
    TextContent,
    SpaceAnimation,
    ColorShow,
    TestPatterns,
}

impl DisplayMode {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [Self::TextContent, Self::SpaceAnimation, Self::ColorShow, Self::TestPatterns];

    pub const fn name(self) -> &'static str {
        match self {
            Self::TextContent => "Text Content",
            Self::SpaceAnimation => "Space Animation",
            Self::ColorShow => "Color Show",
            Self::TestPatterns => "Test Patterns",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::TextContent => 0,
            Self::SpaceAnimation => 1,
            Self::ColorShow => 2,
            Self::TestPatterns => 3,
        }
    }

    /// Wraps modulo [`Self::COUNT`].
    pub const fn from_index(index: usize) -> Self { Self::ALL[index % Self::COUNT] }

    pub const fn next(self) -> Self { Self::from_index(self.index() + 1) }
}

// =============================================================================
// Display Controller
// =============================================================================

pub struct DisplayController<'a> {
    content: ContentManager<'a>,
    transition: Transition,
    space: SpaceAnimation,
    color_show: ColorShow,
    test_patterns: TestPatterns,

    mode: DisplayMode,
    smooth: bool,
    auto_cycling: bool,
    last_transition_change_ms: u32,
    now_ms: u32,

    metrics: FrameMetrics,
    log: EventLog,
}

impl<'a> DisplayController<'a> {
    /// Take ownership of `content`. Fails if it holds no stories.
    pub fn new(
        content: ContentManager<'a>,
        now_ms: u32,
    ) -> Result<Self, ConfigError> {
        content.validate()?;

        let mut log = EventLog::new();
        log.info(format_args!("{} stories loaded", content.story_count()));

        Ok(Self {
            content,
            transition: Transition::new(TransitionType::default(), LINE_TRANSITION_SMOOTH, now_ms),
            space: SpaceAnimation::new(now_ms),
            color_show: ColorShow::new(),
            test_patterns: TestPatterns::new(now_ms),
            mode: DisplayMode::default(),
            smooth: LINE_TRANSITION_SMOOTH,
            auto_cycling: ENABLE_AUTO_TRANSITION_CYCLING,
            last_transition_change_ms: now_ms,
            now_ms,
            metrics: FrameMetrics::new(now_ms),
            log,
        })
    }

    /// Run one control-loop tick.
    ///
    /// Samples `clock` once, runs the active mode and records metrics.
    /// Returns the performance report when one falls due.
    pub fn tick<S: PixelSurface, R: RngCore, C: Clock + ?Sized>(
        &mut self,
        surface: &mut S,
        font: &dyn Font,
        rng: &mut R,
        clock: &C,
    ) -> Option<PerformanceReport> {
        let now = clock.now_ms();
        self.now_ms = now;

        let mut frame = Frame::new(surface, font, rng, now);
        match self.mode {
            DisplayMode::TextContent => {
                let story = self.content.current_story_index();
                if self.transition.update(&mut self.content, &mut frame) && story != self.content.current_story_index()
                {
                    self.log.debug(format_args!("story {}", self.content.current_story_index()));
                }
            }
            DisplayMode::SpaceAnimation => {
                if self.space.update(&mut frame) {
                    self.space.render(&mut frame);
                }
            }
            DisplayMode::ColorShow => self.color_show.update(&mut frame),
            DisplayMode::TestPatterns => self.test_patterns.update(&mut frame),
        }
        let (flushes, chars) = (frame.flushes, frame.chars_advanced);

        if self.auto_cycling
            && self.mode == DisplayMode::TextContent
            && elapsed_ms(now, self.last_transition_change_ms) >= AUTO_TRANSITION_CYCLE_INTERVAL_MS
        {
            self.cycle_through_transitions();
        }

        let report = self.metrics.record_tick(now, flushes, chars)?;
        self.log.info(format_args!(
            "perf: {:.1} fps visual, {:.1} fps loop, {:.1} cps",
            report.visual_fps, report.loop_fps, report.cps
        ));
        Some(report)
    }

    // -------------------------------------------------------------------------
    // Mode Management
    // -------------------------------------------------------------------------

    /// Switch modes and restart the new mode from its beginning.
    pub fn set_display_mode(
        &mut self,
        mode: DisplayMode,
    ) {
        self.mode = mode;
        self.reset();
        self.log.info(format_args!("display mode: {}", mode.name()));
    }

    pub fn cycle_display_mode(&mut self) { self.set_display_mode(self.mode.next()); }

    #[inline]
    pub const fn display_mode(&self) -> DisplayMode { self.mode }

    // -------------------------------------------------------------------------
    // Transition Management
    // -------------------------------------------------------------------------

    /// Replace the active transition. The new one starts at the top of the
    /// current story.
    pub fn set_transition_type(
        &mut self,
        kind: TransitionType,
    ) {
        self.transition = Transition::new(kind, self.smooth, self.now_ms);
        self.content.reset();
        self.last_transition_change_ms = self.now_ms;
        self.log.info(format_args!("transition: {}", kind.name()));
    }

    pub fn cycle_through_transitions(&mut self) { self.set_transition_type(self.transition.transition_type().next()); }

    #[inline]
    pub const fn transition_type(&self) -> TransitionType { self.transition.transition_type() }

    #[inline]
    pub const fn transition(&self) -> &Transition { &self.transition }

    pub fn set_smooth_transitions(
        &mut self,
        smooth: bool,
    ) {
        self.smooth = smooth;
        self.transition.set_smooth(smooth);
    }

    #[inline]
    pub const fn smooth_transitions(&self) -> bool { self.smooth }

    /// Enable or disable cycling to the next transition every
    /// [`AUTO_TRANSITION_CYCLE_INTERVAL_MS`] in text mode.
    pub fn set_auto_transition_cycling(
        &mut self,
        enabled: bool,
    ) {
        self.auto_cycling = enabled;
        self.last_transition_change_ms = self.now_ms;
    }

    #[inline]
    pub const fn auto_transition_cycling(&self) -> bool { self.auto_cycling }

    // -------------------------------------------------------------------------
    // Button Actions
    // -------------------------------------------------------------------------

    /// Next display mode.
    pub fn handle_short_press(&mut self) { self.cycle_display_mode(); }

    /// Next transition in text mode, otherwise restart the active mode.
    pub fn handle_long_press(&mut self) {
        if self.mode == DisplayMode::TextContent {
            self.cycle_through_transitions();
        } else {
            self.reset();
        }
    }

    /// Restart the active mode.
    pub fn reset(&mut self) {
        let now = self.now_ms;
        match self.mode {
            DisplayMode::TextContent => {
                self.content.reset();
                self.transition.reset(now);
            }
            DisplayMode::SpaceAnimation => self.space.reset(now),
            DisplayMode::ColorShow => self.color_show.reset(),
            DisplayMode::TestPatterns => self.test_patterns.reset(now),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn content(&self) -> &ContentManager<'a> { &self.content }

    #[inline]
    pub fn content_mut(&mut self) -> &mut ContentManager<'a> { &mut self.content }

    #[inline]
    pub const fn space_animation(&self) -> &SpaceAnimation { &self.space }

    #[inline]
    pub fn space_animation_mut(&mut self) -> &mut SpaceAnimation { &mut self.space }

    #[inline]
    pub const fn color_show(&self) -> &ColorShow { &self.color_show }

    #[inline]
    pub const fn test_patterns(&self) -> &TestPatterns { &self.test_patterns }

    #[inline]
    pub const fn metrics(&self) -> &FrameMetrics { &self.metrics }

    #[inline]
    pub const fn event_log(&self) -> &EventLog { &self.log }

    #[inline]
    pub fn event_log_mut(&mut self) -> &mut EventLog { &mut self.log }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::color_show::ColorShowPhase;
    use crate::config::{FRAME_INTERVAL_MS, PERF_REPORT_INTERVAL_MS};
    use crate::font::Font5x7;
    use crate::log::Level;
    use crate::surface::Framebuffer;
    use crate::timing::ManualClock;

    const STORIES: [&str; 2] = [
        "The lamps are going out all over Europe.\nWe shall not see them lit again in our lifetime.",
        "It was the best of times, it was the worst of times, it was the age of wisdom.",
    ];

    struct Harness {
        fb: Framebuffer,
        font: Font5x7,
        rng: SmallRng,
        clock: ManualClock,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                fb: Framebuffer::new(),
                font: Font5x7::new(),
                rng: SmallRng::seed_from_u64(7),
                clock: ManualClock::new(0),
            }
        }

        fn tick(
            &mut self,
            ctrl: &mut DisplayController<'_>,
        ) -> Option<PerformanceReport> {
            self.clock.advance(FRAME_INTERVAL_MS);
            ctrl.tick(&mut self.fb, &self.font, &mut self.rng, &self.clock)
        }
    }

    fn controller() -> DisplayController<'static> {
        DisplayController::new(ContentManager::with_stories(&STORIES).unwrap(), 0).unwrap()
    }

    #[test]
    fn test_empty_content_is_rejected() {
        let result = DisplayController::new(ContentManager::new(), 0);
        assert_eq!(result.err(), Some(ConfigError::NoStories));
    }

    #[test]
    fn test_display_mode_cycle() {
        assert_eq!(DisplayMode::TestPatterns.next(), DisplayMode::TextContent);
        assert_eq!(DisplayMode::from_index(5), DisplayMode::SpaceAnimation);
        assert_eq!(DisplayMode::ColorShow.name(), "Color Show");
    }

    #[test]
    fn test_defaults() {
        let ctrl = controller();
        assert_eq!(ctrl.display_mode(), DisplayMode::TextContent);
        assert_eq!(ctrl.transition_type(), TransitionType::SmoothScroll);
        assert!(ctrl.smooth_transitions());
        assert!(!ctrl.auto_transition_cycling());
    }

    #[test]
    fn test_text_mode_renders_one_frame_per_tick() {
        let mut h = Harness::new();
        let mut ctrl = controller();
        for n in 1..=20 {
            h.tick(&mut ctrl);
            assert_eq!(h.fb.flush_count(), n);
        }
        assert!(h.fb.lit_pixels() > 0);
    }

    #[test]
    fn test_short_press_cycles_modes() {
        let mut ctrl = controller();
        for expected in [
            DisplayMode::SpaceAnimation,
            DisplayMode::ColorShow,
            DisplayMode::TestPatterns,
            DisplayMode::TextContent,
        ] {
            ctrl.handle_short_press();
            assert_eq!(ctrl.display_mode(), expected);
        }
    }

    #[test]
    fn test_long_press_cycles_transition_in_text_mode() {
        let mut ctrl = controller();
        ctrl.handle_long_press();
        assert_eq!(ctrl.transition_type(), TransitionType::CharacterScroll);
        ctrl.set_transition_type(TransitionType::CursorWipe);
        ctrl.cycle_through_transitions();
        assert_eq!(ctrl.transition_type(), TransitionType::SmoothScroll);
    }

    #[test]
    fn test_long_press_resets_decorative_mode() {
        let mut h = Harness::new();
        let mut ctrl = controller();
        ctrl.set_display_mode(DisplayMode::ColorShow);
        for _ in 0..10 {
            h.tick(&mut ctrl);
        }
        assert_eq!(ctrl.color_show().phase(), ColorShowPhase::Fill { index: 10 });
        ctrl.handle_long_press();
        assert_eq!(ctrl.color_show().phase(), ColorShowPhase::Fill { index: 0 });
        assert_eq!(ctrl.transition_type(), TransitionType::SmoothScroll);
    }

    #[test]
    fn test_space_mode_renders() {
        let mut h = Harness::new();
        let mut ctrl = controller();
        ctrl.set_display_mode(DisplayMode::SpaceAnimation);
        h.tick(&mut ctrl);
        assert_eq!(h.fb.flush_count(), 1);
        assert!(ctrl.space_animation().stars().active_count() > 0);
    }

    #[test]
    fn test_auto_cycling() {
        let mut h = Harness::new();
        let mut ctrl = controller();
        let ticks = AUTO_TRANSITION_CYCLE_INTERVAL_MS / FRAME_INTERVAL_MS;

        for _ in 0..ticks {
            h.tick(&mut ctrl);
        }
        assert_eq!(ctrl.transition_type(), TransitionType::SmoothScroll);

        ctrl.set_auto_transition_cycling(true);
        for _ in 0..ticks - 1 {
            h.tick(&mut ctrl);
        }
        assert_eq!(ctrl.transition_type(), TransitionType::SmoothScroll);
        h.tick(&mut ctrl);
        assert_eq!(ctrl.transition_type(), TransitionType::CharacterScroll);
    }

    #[test]
    fn test_smooth_flag_carries_to_new_transition() {
        let mut h = Harness::new();
        let mut ctrl = controller();
        ctrl.set_smooth_transitions(false);
        ctrl.set_transition_type(TransitionType::CharacterScroll);
        // Without smoothing the first tick paints text instead of a blank pause
        h.tick(&mut ctrl);
        assert!(h.fb.lit_pixels() > 0);
    }

    #[test]
    fn test_perf_report_logged() {
        let mut h = Harness::new();
        let mut ctrl = controller();
        let mut report = None;
        for _ in 0..PERF_REPORT_INTERVAL_MS / FRAME_INTERVAL_MS {
            if let Some(r) = h.tick(&mut ctrl) {
                report = Some(r);
            }
        }
        let report = report.unwrap();
        assert!((report.loop_fps - 50.0).abs() < 0.01);
        assert!((report.visual_fps - 50.0).abs() < 0.01);
        let last = ctrl.event_log().iter().last().unwrap();
        assert_eq!(last.level, Level::Info);
        assert!(last.text.starts_with("perf: 50.0 fps visual"));
    }

    #[test]
    fn test_mode_change_logged() {
        let mut ctrl = controller();
        ctrl.event_log_mut().pop_front();
        ctrl.set_display_mode(DisplayMode::TestPatterns);
        let line = ctrl.event_log_mut().pop_front().unwrap();
        assert_eq!(line.text.as_str(), "display mode: Test Patterns");
    }
}
