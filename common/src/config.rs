//! Display geometry and timing configuration constants.
//!
//! Every tunable of the engine is a compile-time constant. Runtime setters on
//! [`DisplayController`](crate::controller::DisplayController) and
//! [`SpaceAnimation`](crate::space::SpaceAnimation) only select between or
//! clamp against these values.

// =============================================================================
// Display Geometry
// =============================================================================

/// Number of character cells on the matrix.
pub const DISPLAY_CHARS: usize = 32;

/// Glyph width in pixels (one character cell).
pub const GLYPH_WIDTH: usize = 5;

/// Glyph height in pixels.
pub const GLYPH_HEIGHT: usize = 7;

/// Matrix width in pixels (32 cells x 5 columns).
pub const DISPLAY_WIDTH: usize = DISPLAY_CHARS * GLYPH_WIDTH;

/// Matrix height in pixels.
pub const DISPLAY_HEIGHT: usize = GLYPH_HEIGHT;

/// LEDs per character cell (5x7 block on the chain).
pub const LEDS_PER_CELL: usize = GLYPH_WIDTH * GLYPH_HEIGHT;

/// Total LEDs on the chain.
pub const LED_COUNT: usize = DISPLAY_CHARS * LEDS_PER_CELL;

/// Pre-computed as i32 to avoid casts in drawing code.
pub const DISPLAY_WIDTH_I32: i32 = DISPLAY_WIDTH as i32;

/// Pre-computed as i32 to avoid casts in drawing code.
pub const DISPLAY_HEIGHT_I32: i32 = DISPLAY_HEIGHT as i32;

// =============================================================================
// Content Configuration
// =============================================================================

/// Maximum number of stories held by the content manager.
pub const MAX_STORIES: usize = 16;

/// Maximum number of wrapped lines cached for the current story.
/// Lines past this limit are dropped.
pub const MAX_LINES: usize = 96;

/// Target reading speed in characters per second.
pub const CPS_TARGET: u32 = 15;

/// Minimum interval between character steps in character-scroll mode.
pub const CHAR_INTERVAL_MS: u32 = 1000 / CPS_TARGET;

// =============================================================================
// Transition Timing
// =============================================================================

/// Control loop cadence (~50 FPS). One tick renders at most one frame.
pub const FRAME_INTERVAL_MS: u32 = 20;

/// Sub-pixel steps rendered per character in smooth scroll.
pub const SMOOTH_SUBFRAMES: u8 = 6;

/// Frames in the dissolve burst played on a story line break.
pub const DISSOLVE_FRAMES: u8 = 30;

/// Frames in the fade-in played before scrolling resumes.
pub const PREROLL_FRAMES: u8 = 12;

/// Vertical slide steps with smoothing enabled.
pub const SLIDE_STEPS_SMOOTH: u8 = 9;

/// Vertical slide steps with smoothing disabled.
pub const SLIDE_STEPS_FAST: u8 = 1;

/// Rows between the bottom edge and the incoming line when a slide starts.
pub const SLIDE_GAP_ROWS: i32 = 2;

/// Interval between revealed characters in cursor wipe.
pub const WIPE_STEP_MS: u32 = 40;

/// Interval between cursor on/off toggles in cursor wipe.
pub const FLASH_STEP_MS: u32 = 200;

/// Cursor toggles per line (3 full on/off cycles).
pub const FLASH_STEPS: u8 = 6;

/// Extra hold added to the reading time of a line in cursor wipe.
pub const WIPE_LINE_HOLD_MS: u32 = 2000;

/// Interval for automatic transition cycling.
pub const AUTO_TRANSITION_CYCLE_INTERVAL_MS: u32 = 15_000;

/// Automatic transition cycling is off unless enabled at runtime.
pub const ENABLE_AUTO_TRANSITION_CYCLING: bool = false;

/// Smooth transitions are on by default.
pub const LINE_TRANSITION_SMOOTH: bool = true;

// =============================================================================
// Space Animation Configuration
// =============================================================================

/// Star pool capacity.
pub const SPACE_STAR_COUNT: usize = 40;

/// Comet pool capacity.
pub const SPACE_COMET_COUNT: usize = 3;

/// Planet pool capacity.
pub const SPACE_PLANET_COUNT: usize = 2;

/// Spaceship pool capacity.
pub const SPACE_SPACESHIP_COUNT: usize = 1;

/// Global parallax factor applied to star drift.
pub const SPACE_PARALLAX_SPEED: f32 = 1.0;

/// Slowest star drift in pixels per update.
pub const SPACE_STAR_SPEED_MIN: f32 = 0.1;

/// Fastest star drift in pixels per update.
pub const SPACE_STAR_SPEED_MAX: f32 = 2.0;

/// Minimum interval between space updates (~60 Hz).
pub const SPACE_UPDATE_INTERVAL_MS: u32 = 16;

pub const SPACE_COMET_SPAWN_INTERVAL_MS: u32 = 3000;
pub const SPACE_PLANET_SPAWN_INTERVAL_MS: u32 = 8000;
pub const SPACE_SPACESHIP_SPAWN_INTERVAL_MS: u32 = 12_000;

/// Spaceship sprite frame interval.
pub const SPACE_SHIP_FRAME_MS: u32 = 200;

/// Nebula phase step interval.
pub const SPACE_NEBULA_STEP_MS: u32 = 100;

// =============================================================================
// Decorative Modes
// =============================================================================

/// Hold after the color show fill completes.
pub const COLOR_SHOW_HOLD_MS: u32 = 1000;

/// Dissolve steps at the end of the color show.
pub const COLOR_SHOW_FADE_STEPS: u8 = 50;

/// Interval between color show dissolve steps.
pub const COLOR_SHOW_FADE_STEP_MS: u32 = 50;

/// Duration of each test pattern.
pub const TEST_PATTERN_STEP_MS: u32 = 1000;

// =============================================================================
// Performance Reporting
// =============================================================================

/// Interval between performance reports.
pub const PERF_REPORT_INTERVAL_MS: u32 = 2000;
