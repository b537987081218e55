//! Change-driven publish gate with heartbeat.
//!
//! A sample is published when it moved at least `change_threshold` away
//! from the last *published* value, or when the heartbeat deadline has
//! been reached. Small drifts therefore accumulate until they cross the
//! threshold, and a quiet sensor is still republished once per heartbeat.
//!
//! ```text
//!   |new - last| >= threshold ──┐
//!                               ├──▶ publish, last = new, deadline = now + heartbeat
//!   now >= deadline ────────────┘
//! ```
//!
//! The deadline starts at [`Tick::ZERO`], so the first sample after boot
//! always publishes.

use core::time::Duration;

use crate::tick::Tick;

/// Mutable half of a gate: what was last sent and when the next forced
/// publish is due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateState {
    pub last_published_value: f32,
    pub next_deadline: Tick,
}

impl GateState {
    /// Pre-publish state: sentinel value and an already elapsed deadline.
    pub const INITIAL: Self = Self {
        last_published_value: 0.0,
        next_deadline: Tick::ZERO,
    };
}

impl Default for GateState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Immutable publish policy of one monitored quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeGate {
    change_threshold: f32,
    heartbeat: Duration,
}

impl ChangeGate {
    pub const fn new(change_threshold: f32, heartbeat: Duration) -> Self {
        Self {
            change_threshold,
            heartbeat,
        }
    }

    /// Decide whether `value` sampled at `now` should be published.
    ///
    /// Returns the decision and the state to keep. A `false` decision
    /// returns `state` untouched.
    pub fn should_publish(&self, value: f32, state: GateState, now: Tick) -> (bool, GateState) {
        let changed = (value - state.last_published_value).abs() >= self.change_threshold;
        let due = now >= state.next_deadline;

        if changed || due {
            let next = GateState {
                last_published_value: value,
                next_deadline: now + self.heartbeat,
            };
            (true, next)
        } else {
            (false, state)
        }
    }
}
