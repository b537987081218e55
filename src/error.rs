//! Unified error types for the garage node firmware.
//!
//! A single `Error` enum that every construction step can convert into.
//! All variants are `Copy` so they can be returned from boot-time wiring
//! without allocation. Runtime callbacks never return errors: sensor read
//! failures are skipped and actuation is infallible at this layer.

use core::fmt;

use crate::channel_map::TagIdentity;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible construction step in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The tag's variant/revision and bus have no radio channel id.
    UnmappedChannel(TagIdentity),
    /// Configuration is invalid.
    Config(&'static str),
    /// The deferred-task table rejected a request.
    Scheduler(SchedulerError),
    /// A fixed-capacity container is full.
    Capacity(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedChannel(tag) => write!(f, "no radio channel for {tag}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Scheduler(e) => write!(f, "scheduler: {e}"),
            Self::Capacity(what) => write!(f, "capacity exceeded: {what}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Scheduler errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// Every task slot is taken.
    TableFull,
    /// The task id was never handed out by this scheduler.
    UnknownTask,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableFull => write!(f, "task table full"),
            Self::UnknownTask => write!(f, "unknown task id"),
        }
    }
}

impl core::error::Error for SchedulerError {}

impl From<SchedulerError> for Error {
    fn from(e: SchedulerError) -> Self {
        Self::Scheduler(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
