//! Event logging.
//!
//! Two sinks, both optional at the call site:
//!
//! - `defmt`, when the `defmt` feature is enabled. The crate-internal
//!   `log_info!`/`log_warn!`/`log_debug!` macros compile to nothing otherwise.
//! - [`EventLog`], a bounded ring of formatted lines owned by the
//!   [`DisplayController`](crate::controller::DisplayController). Hosts drain it
//!   with [`EventLog::pop_front`]; the simulator prints it to stdout.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log.info(format_args!("display mode: {}", mode.name()));
//!
//! while let Some(line) = log.pop_front() {
//!     println!("[{}] {}", line.level.name(), line.text);
//! }
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of lines kept before the oldest is dropped.
pub const LOG_BUFFER_SIZE: usize = 32;

/// Maximum characters per line. Longer lines are truncated.
pub const LOG_LINE_LENGTH: usize = 64;

// =============================================================================
// defmt Forwarding Macros
// =============================================================================

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

#[allow(unused_imports)]
pub(crate) use {log_debug, log_info, log_warn};

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

impl Level {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub text: String<LOG_LINE_LENGTH>,
}

/// Ring buffer of recent events.
///
/// Stores the last [`LOG_BUFFER_SIZE`] lines; pushing onto a full log drops
/// the oldest line and bumps [`EventLog::dropped`].
pub struct EventLog {
    buffer: Deque<LogLine, LOG_BUFFER_SIZE>,
    dropped: u32,
}

impl EventLog {
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            dropped: 0,
        }
    }

    /// Format and record a line.
    pub fn record(
        &mut self,
        level: Level,
        args: fmt::Arguments<'_>,
    ) {
        let mut text = Truncating(String::new());
        text.write_fmt(args).ok();
        let text = text.0;

        match level {
            Level::Debug => log_debug!("{=str}", text.as_str()),
            Level::Info => log_info!("{=str}", text.as_str()),
            Level::Warn => log_warn!("{=str}", text.as_str()),
        }

        if self.buffer.is_full() {
            self.buffer.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
        }
        self.buffer.push_back(LogLine { level, text }).ok();
    }

    #[inline]
    pub fn info(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        self.record(Level::Info, args);
    }

    #[inline]
    pub fn warn(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        self.record(Level::Warn, args);
    }

    #[inline]
    pub fn debug(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        self.record(Level::Debug, args);
    }

    /// Remove and return the oldest line.
    pub fn pop_front(&mut self) -> Option<LogLine> { self.buffer.pop_front() }

    /// Iterate over lines (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &LogLine> { self.buffer.iter() }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Lines lost to overflow since creation.
    #[inline]
    pub const fn dropped(&self) -> u32 { self.dropped }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

/// Writer that silently stops at capacity instead of failing the format.
struct Truncating(String<LOG_LINE_LENGTH>);

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
