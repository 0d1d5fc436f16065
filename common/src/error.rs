//! Configuration errors.
//!
//! Rendering never fails: out-of-range reads resolve to blanks and full
//! particle pools drop spawns. The only errors are setup mistakes, reported
//! once when the story list is built or the controller is created.

use thiserror::Error;

use crate::config::MAX_STORIES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The controller needs at least one story to show.
    #[error("no stories configured")]
    NoStories,

    #[error("story list is full ({} stories)", MAX_STORIES)]
    TooManyStories,
}
