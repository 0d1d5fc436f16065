//! Headless capture: drives the controller on a manual clock and writes one
//! PNG per step of the capture plan.

use std::fs;
use std::path::{Path, PathBuf};

use embedded_graphics_simulator::OutputSettingsBuilder;
use marquee_common::config::FRAME_INTERVAL_MS;
use marquee_common::{DisplayController, DisplayMode, Font5x7, Framebuffer, ManualClock, TransitionType};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::drain_log;
use crate::matrix;

/// Seed for the capture run. Every capture of the same plan is identical.
pub const SEED: u64 = 0x5EED_CAFE;

/// Default output directory, relative to the working directory.
pub const OUTPUT_DIR: &str = "capture";

/// One snapshot: run `ticks` ticks in `mode`, then save `<name>.png`.
pub struct CaptureStep {
    pub name: &'static str,
    pub mode: DisplayMode,
    pub transition: Option<TransitionType>,
    pub ticks: u32,
}

pub const CAPTURE_PLAN: &[CaptureStep] = &[
    CaptureStep {
        name: "01_smooth_scroll",
        mode: DisplayMode::TextContent,
        transition: Some(TransitionType::SmoothScroll),
        ticks: 90,
    },
    CaptureStep {
        name: "02_character_scroll",
        mode: DisplayMode::TextContent,
        transition: Some(TransitionType::CharacterScroll),
        ticks: 120,
    },
    CaptureStep {
        name: "03_line_slide",
        mode: DisplayMode::TextContent,
        transition: Some(TransitionType::LineSlide),
        ticks: 150,
    },
    CaptureStep {
        name: "04_cursor_wipe",
        mode: DisplayMode::TextContent,
        transition: Some(TransitionType::CursorWipe),
        ticks: 45,
    },
    CaptureStep {
        name: "05_space_animation",
        mode: DisplayMode::SpaceAnimation,
        transition: None,
        ticks: 400,
    },
    CaptureStep {
        name: "06_color_show",
        mode: DisplayMode::ColorShow,
        transition: None,
        ticks: 700,
    },
    CaptureStep {
        name: "07_test_patterns",
        mode: DisplayMode::TestPatterns,
        transition: None,
        ticks: 230,
    },
];

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("cannot create output directory {path}: {source}")]
    OutputDir { path: PathBuf, source: std::io::Error },
    #[error("cannot write {path}: {message}")]
    Png { path: PathBuf, message: String },
}

/// Run the whole plan and write the PNGs into `out_dir`.
pub fn run(
    ctrl: &mut DisplayController<'_>,
    out_dir: &Path,
) -> Result<(), CaptureError> {
    fs::create_dir_all(out_dir).map_err(|source| CaptureError::OutputDir { path: out_dir.to_path_buf(), source })?;

    let mut fb = Framebuffer::new();
    let font = Font5x7::new();
    let mut rng = SmallRng::seed_from_u64(SEED);
    let clock = ManualClock::new(0);
    let mut display = matrix::new_display();
    let output_settings = OutputSettingsBuilder::new().scale(2).build();

    for step in CAPTURE_PLAN {
        ctrl.set_display_mode(step.mode);
        if let Some(kind) = step.transition {
            ctrl.set_transition_type(kind);
        }
        for _ in 0..step.ticks {
            clock.advance(FRAME_INTERVAL_MS);
            ctrl.tick(&mut fb, &font, &mut rng, &clock);
        }
        drain_log(ctrl.event_log_mut());

        matrix::draw_view(&mut display, &fb, ctrl);
        let path = out_dir.join(format!("{}.png", step.name));
        display
            .to_rgb_output_image(&output_settings)
            .save_png(&path)
            .map_err(|e| CaptureError::Png { path: path.clone(), message: e.to_string() })?;
        println!("wrote {} after {} ticks ({})", path.display(), step.ticks, matrix::caption(ctrl));
    }

    let dropped = ctrl.event_log().dropped();
    if dropped > 0 {
        println!("{dropped} log lines dropped");
    }
    Ok(())
}
