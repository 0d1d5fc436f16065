//! Monotonic millisecond clock seam.
//!
//! The engine never reads a global timer. The control loop samples a
//! [`Clock`] once per tick and hands the reading down in the
//! [`Frame`](crate::frame::Frame). Readings are wrapping `u32` milliseconds,
//! so all comparisons go through [`elapsed_ms`].

use core::cell::Cell;

/// Source of monotonic time in milliseconds.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch. Wraps after ~49 days.
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, correct across wrap-around.
#[inline]
pub const fn elapsed_ms(
    now: u32,
    since: u32,
) -> u32 {
    now.wrapping_sub(since)
}

/// Manually advanced clock for tests and deterministic capture.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub const fn new(start_ms: u32) -> Self { Self { now: Cell::new(start_ms) } }

    /// Move the clock forward.
    pub fn advance(
        &self,
        ms: u32,
    ) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(
        &self,
        ms: u32,
    ) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 { self.now.get() }
}
