//! Debounced door-contact input.
//!
//! ## Hardware
//!
//! Normally-closed reed switch with a dynamic pull-up. The GPIO level is
//! sampled from the main loop; a new level is accepted only after it has
//! held for the contact's debounce time.
//!
//! ```text
//!   raw level ≠ stable ──▶ wait(since) ──held ≥ debounce──▶ stable = raw, emit event
//!        ▲                    │
//!        └── raw returns ─────┘ (no event)
//! ```

use core::time::Duration;

use crate::app::commands::SwitchEvent;
use crate::config::DoorConfig;
use crate::tick::Tick;

/// Debounce used when the config leaves it unset.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

pub struct DoorContact {
    label: char,
    gpio: i32,
    debounce: Duration,
    open: bool,
    /// When the raw level first differed from `open`.
    pending_since: Option<Tick>,
}

impl DoorContact {
    /// A contact that starts closed.
    pub fn new(config: &DoorConfig) -> Self {
        let debounce_ms = config.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS);
        Self {
            label: config.label,
            gpio: config.gpio,
            debounce: Duration::from_millis(u64::from(debounce_ms)),
            open: false,
            pending_since: None,
        }
    }

    pub fn label(&self) -> char {
        self.label
    }

    /// GPIO the contact is wired to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Debounced level; `true` = open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Feed one raw sample taken at `now`.
    /// Returns the transition once the new level has held long enough.
    pub fn sample(&mut self, raw_open: bool, now: Tick) -> Option<SwitchEvent> {
        if raw_open == self.open {
            self.pending_since = None;
            return None;
        }

        let since = *self.pending_since.get_or_insert(now);
        if now.since(since) < self.debounce {
            return None;
        }

        self.pending_since = None;
        self.open = raw_open;
        Some(if raw_open {
            SwitchEvent::Opened
        } else {
            SwitchEvent::Closed
        })
    }
}
