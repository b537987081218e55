//! One-shot relay pulse.
//!
//! ```text
//!            trigger()                 off task fires
//!   Off ───────────────▶ Pulsing ───────────────────────▶ Off
//!                         │    ▲
//!                         └────┘ trigger(): move the off deadline
//! ```
//!
//! The actuator owns exactly one deferred-task slot. Re-triggering while
//! pulsing re-plans that slot, so the relay is released `pulse_length`
//! after the *last* trigger and only one release ever happens per pulse.

use core::time::Duration;

use log::{debug, info};

use crate::error::Result;
use crate::tick::Tick;

use super::ports::{RelayPort, TaskId, TimerPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseState {
    Off,
    Pulsing { release_at: Tick },
}

pub struct PulseActuator {
    pulse_length: Duration,
    off_task: TaskId,
    state: PulseState,
}

impl PulseActuator {
    /// Register the release slot with the scheduler. The slot starts unplanned.
    pub fn new(pulse_length: Duration, timers: &mut dyn TimerPort) -> Result<Self> {
        let off_task = timers.register("relay-off")?;
        Ok(Self {
            pulse_length,
            off_task,
            state: PulseState::Off,
        })
    }

    /// Energise the relay and (re-)plan its release.
    pub fn trigger(&mut self, now: Tick, relay: &mut impl RelayPort, timers: &mut dyn TimerPort) {
        relay.set_relay(true);

        let release_at = now + self.pulse_length;
        timers.plan_at(self.off_task, release_at);

        match self.state {
            PulseState::Off => info!("relay pulse until {}", release_at),
            PulseState::Pulsing { .. } => info!("relay pulse extended until {}", release_at),
        }
        self.state = PulseState::Pulsing { release_at };
    }

    /// Release the relay. Called when the off task fires.
    pub fn release(&mut self, relay: &mut impl RelayPort) {
        if self.state == PulseState::Off {
            debug!("relay release while already off");
        }
        relay.set_relay(false);
        self.state = PulseState::Off;
    }

    /// Slot the release is planned on.
    pub fn off_task(&self) -> TaskId {
        self.off_task
    }

    pub fn state(&self) -> PulseState {
        self.state
    }

    pub fn pulse_length(&self) -> Duration {
        self.pulse_length
    }
}
