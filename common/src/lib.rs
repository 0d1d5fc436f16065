//! Story marquee engine for a 32-character 5x7 LED matrix.
//!
//! This crate contains the platform-agnostic engine shared between the
//! desktop simulator and firmware targets:
//!
//! - [`content`]: Story list, word-wrap and per-character color modes
//! - [`transitions`]: The four text transitions
//! - [`space`]: Particle-based space animation
//! - [`color_show`], [`test_patterns`]: Decorative and diagnostic modes
//! - [`controller`]: Mode selection and the per-tick entry point
//! - [`surface`], [`font`], [`timing`]: Seams to the pixel driver, glyphs and clock
//! - [`metrics`], [`log`]: Performance counters and the event log
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and never allocates. Stories, wrapped
//! lines, particle pools and log lines all live in fixed-capacity
//! `heapless` containers or arrays.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod color_show;
pub mod colors;
pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod font;
pub mod frame;
pub mod log;
pub mod metrics;
pub mod space;
pub mod surface;
pub mod test_patterns;
pub mod text;
pub mod timing;
pub mod transitions;

// Re-export commonly used items
pub use config::*;
pub use content::{ColorMode, ContentManager};
pub use controller::{DisplayController, DisplayMode};
pub use error::ConfigError;
pub use font::{Font, Font5x7};
pub use frame::Frame;
pub use surface::{Framebuffer, PixelSurface};
pub use timing::{Clock, ManualClock};
pub use transitions::TransitionType;
