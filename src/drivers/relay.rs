//! Power-module relay driver.
//!
//! A single digital output energises the relay coil. The driver is a dumb
//! actuator: pulse timing lives in [`PulseActuator`](crate::app::relay::PulseActuator).
//!
//! ## Dual-target design
//!
//! Generic over an `embedded-hal` [`OutputPin`]: an `esp-idf-hal`
//! `PinDriver` on the node, a [`SimPin`](super::sim_pin::SimPin) on the host.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Released,
    Energised,
}

pub struct RelayDriver<P> {
    pin: P,
    state: RelayState,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take ownership of the coil pin and drive it low.
    pub fn new(pin: P) -> Self {
        let mut driver = Self {
            pin,
            state: RelayState::Energised,
        };
        driver.set(false);
        driver
    }

    pub fn set(&mut self, energised: bool) {
        // Hardware faults are not recoverable here; report and carry on.
        if let Err(e) = self.pin.set_state(PinState::from(energised)) {
            warn!("relay pin write failed: {:?}", e);
        }
        self.state = if energised {
            RelayState::Energised
        } else {
            RelayState::Released
        };
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_energised(&self) -> bool {
        self.state == RelayState::Energised
    }

    /// Borrow the underlying pin (host tests inspect the simulated level).
    pub fn pin(&self) -> &P {
        &self.pin
    }
}
