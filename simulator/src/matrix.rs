//! Matrix view: draws the LED grid and a status caption onto the simulator display.

use std::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;
use marquee_common::colors::{BLACK, ORANGE, WHITE};
use marquee_common::config::{DISPLAY_HEIGHT_I32, DISPLAY_WIDTH_I32};
use marquee_common::{DisplayController, DisplayMode, Framebuffer};
use profont::PROFONT_9_POINT;

/// Pixels between LED centers on the simulator display.
const LED_PITCH: i32 = 4;

/// Edge length of one drawn LED.
const LED_SIZE: u32 = 3;

/// Height of the caption strip below the matrix.
const CAPTION_HEIGHT: i32 = 14;

/// Color of an unlit LED.
const LED_OFF: Rgb888 = Rgb888::new(18, 18, 22);

const MATRIX_HEIGHT: i32 = DISPLAY_HEIGHT_I32 * LED_PITCH;

pub const VIEW_SIZE: Size = Size::new((DISPLAY_WIDTH_I32 * LED_PITCH) as u32, (MATRIX_HEIGHT + CAPTION_HEIGHT) as u32);

pub fn new_display() -> SimulatorDisplay<Rgb888> { SimulatorDisplay::new(VIEW_SIZE) }

/// Draw the last flushed frame of `fb` as a grid of LEDs.
pub fn draw_matrix(
    display: &mut SimulatorDisplay<Rgb888>,
    fb: &Framebuffer,
) {
    for y in 0..DISPLAY_HEIGHT_I32 {
        for x in 0..DISPLAY_WIDTH_I32 {
            let color = match fb.shown_pixel(x, y) {
                Some(c) if c != BLACK => c,
                _ => LED_OFF,
            };
            Rectangle::new(Point::new(x * LED_PITCH, y * LED_PITCH), Size::new(LED_SIZE, LED_SIZE))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(display)
                .ok();
        }
    }
}

/// Status line: mode, transition, color mode and the last measured frame rate.
pub fn caption(ctrl: &DisplayController<'_>) -> String<96> {
    let mut text = String::new();
    write!(text, "{}", ctrl.display_mode().name()).ok();
    if ctrl.display_mode() == DisplayMode::TextContent {
        write!(text, " | {} | {}", ctrl.transition_type().name(), ctrl.content().color_mode().name()).ok();
    }
    if let Some(report) = ctrl.metrics().last_report() {
        write!(text, " | {:.1} fps", report.visual_fps).ok();
    }
    text
}

/// Draw the matrix and the caption for the current controller state.
pub fn draw_view(
    display: &mut SimulatorDisplay<Rgb888>,
    fb: &Framebuffer,
    ctrl: &DisplayController<'_>,
) {
    display.clear(BLACK).ok();
    draw_matrix(display, fb);

    let color = if ctrl.auto_transition_cycling() { ORANGE } else { WHITE };
    let style = MonoTextStyle::new(&PROFONT_9_POINT, color);
    Text::with_baseline(&caption(ctrl), Point::new(2, MATRIX_HEIGHT + 2), style, Baseline::Top)
        .draw(display)
        .ok();
}
