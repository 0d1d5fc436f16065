//! Story marquee simulator for desktop.
//!
//! Runs the marquee engine against an in-memory framebuffer and renders the
//! 160x7 LED matrix with the embedded-graphics-simulator crate.
//!
//! By default the simulator runs headless: it plays through a fixed capture
//! plan on a manual clock and writes one PNG per step. Pass the output
//! directory as the first argument to override the default. Build with the
//! `window` feature to get an interactive SDL window instead.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[cfg(not(feature = "window"))]
mod capture;
mod matrix;
mod stories;
#[cfg(feature = "window")]
mod timing;
#[cfg(feature = "window")]
mod window;

use std::process::ExitCode;

use marquee_common::log::EventLog;
use marquee_common::{ContentManager, DisplayController};

use crate::stories::STORIES;

fn main() -> ExitCode {
    let mut ctrl = match ContentManager::with_stories(&STORIES).and_then(|content| DisplayController::new(content, 0)) {
        Ok(ctrl) => ctrl,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    drain_log(ctrl.event_log_mut());

    #[cfg(feature = "window")]
    {
        window::run(&mut ctrl);
        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "window"))]
    {
        let out_dir = std::env::args().nth(1).unwrap_or_else(|| capture::OUTPUT_DIR.to_string());
        match capture::run(&mut ctrl, std::path::Path::new(&out_dir)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("capture failed: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

/// Print and drop every buffered event line.
fn drain_log(log: &mut EventLog) {
    while let Some(line) = log.pop_front() {
        println!("[{:>5}] {}", line.level.name(), line.text);
    }
}
