//! Timing for the simulator.
//!
//! These use `std::time` which is not available in `no_std` environments,
//! so they live here rather than in the common crate.

use std::time::{Duration, Instant};

use marquee_common::Clock;
use marquee_common::config::FRAME_INTERVAL_MS;

/// Target tick time (~50 FPS). The window loop sleeps if a tick completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(FRAME_INTERVAL_MS as u64);

/// Wall clock measured from simulator start.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self { Self { start: Instant::now() } }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 { self.start.elapsed().as_millis() as u32 }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}
