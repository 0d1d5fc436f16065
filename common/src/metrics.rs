//! Performance monitor.
//!
//! Counts control-loop ticks, frames pushed to the surface and characters the
//! text transitions moved past, and turns them into rates once per
//! [`PERF_REPORT_INTERVAL_MS`].

use crate::config::PERF_REPORT_INTERVAL_MS;
use crate::timing::elapsed_ms;

/// Rates over one report window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceReport {
    /// Frames flushed per second.
    pub visual_fps: f32,
    /// Control-loop ticks per second.
    pub loop_fps: f32,
    /// Characters advanced per second.
    pub cps: f32,
    /// Length of the window the rates cover.
    pub window_ms: u32,
}

/// Frame counters and tick timing statistics.
pub struct FrameMetrics {
    // Current window
    pub loop_frames: u32,
    pub visual_updates: u32,
    pub chars_scrolled: u32,
    window_start_ms: u32,

    // Tick spacing (milliseconds)
    pub tick_interval_min_ms: u32,
    pub tick_interval_max_ms: u32,
    tick_interval_avg_ms: f32,
    last_tick_ms: Option<u32>,

    // Lifetime counters
    pub total_ticks: u64,
    pub total_chars: u64,

    last_report: Option<PerformanceReport>,
}

impl FrameMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub const fn new(now_ms: u32) -> Self {
        Self {
            loop_frames: 0,
            visual_updates: 0,
            chars_scrolled: 0,
            window_start_ms: now_ms,
            tick_interval_min_ms: u32::MAX,
            tick_interval_max_ms: 0,
            tick_interval_avg_ms: 0.0,
            last_tick_ms: None,
            total_ticks: 0,
            total_chars: 0,
            last_report: None,
        }
    }

    /// Record one control-loop tick.
    ///
    /// Returns a report when the window has run for at least
    /// [`PERF_REPORT_INTERVAL_MS`] and saw at least one tick; the window
    /// counters then start over.
    pub fn record_tick(
        &mut self,
        now_ms: u32,
        flushes: u32,
        chars: u32,
    ) -> Option<PerformanceReport> {
        if let Some(last) = self.last_tick_ms {
            let interval = elapsed_ms(now_ms, last);
            self.tick_interval_min_ms = self.tick_interval_min_ms.min(interval);
            self.tick_interval_max_ms = self.tick_interval_max_ms.max(interval);
            if self.total_ticks == 1 {
                self.tick_interval_avg_ms = interval as f32;
            } else {
                self.tick_interval_avg_ms = Self::EMA_ALPHA * interval as f32
                    + (1.0 - Self::EMA_ALPHA) * self.tick_interval_avg_ms;
            }
        }
        self.last_tick_ms = Some(now_ms);

        self.loop_frames += 1;
        self.visual_updates += flushes;
        self.chars_scrolled += chars;
        self.total_ticks += 1;
        self.total_chars += u64::from(chars);

        let window = elapsed_ms(now_ms, self.window_start_ms);
        if window < PERF_REPORT_INTERVAL_MS || self.loop_frames == 0 {
            return None;
        }

        let seconds = window as f32 / 1000.0;
        let report = PerformanceReport {
            visual_fps: self.visual_updates as f32 / seconds,
            loop_fps: self.loop_frames as f32 / seconds,
            cps: self.chars_scrolled as f32 / seconds,
            window_ms: window,
        };
        self.last_report = Some(report);
        self.start_window(now_ms);
        Some(report)
    }

    /// Drop the current window and start a new one at `now_ms`.
    pub fn start_window(
        &mut self,
        now_ms: u32,
    ) {
        self.loop_frames = 0;
        self.visual_updates = 0;
        self.chars_scrolled = 0;
        self.window_start_ms = now_ms;
    }

    /// Smoothed spacing between ticks.
    #[inline]
    pub const fn tick_interval_avg_ms(&self) -> u32 { self.tick_interval_avg_ms as u32 }

    #[inline]
    pub const fn last_report(&self) -> Option<PerformanceReport> { self.last_report }
}

impl Default for FrameMetrics {
    fn default() -> Self { Self::new(0) }
}
