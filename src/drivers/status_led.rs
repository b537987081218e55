//! Single-colour status LED with timed pulse.
//!
//! `pulse()` lights the LED and records when it should go dark; the main
//! loop calls [`StatusLed::poll`] with the current tick to end the pulse.

use core::time::Duration;

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::tick::Tick;

pub struct StatusLed<P> {
    pin: P,
    lit_until: Option<Tick>,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        let mut led = Self {
            pin,
            lit_until: None,
        };
        led.off();
        led
    }

    /// Light the LED from `now` for `length`. A new pulse replaces the old one.
    pub fn pulse(&mut self, now: Tick, length: Duration) {
        self.write(true);
        self.lit_until = Some(now + length);
    }

    pub fn off(&mut self) {
        self.write(false);
        self.lit_until = None;
    }

    /// End an expired pulse.
    pub fn poll(&mut self, now: Tick) {
        if self.lit_until.is_some_and(|until| now >= until) {
            self.off();
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit_until.is_some()
    }

    fn write(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("status LED pin write failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::sim_pin::SimPin;

    #[test]
    fn pulse_ends_at_deadline() {
        let mut led = StatusLed::new(SimPin::new(18));
        led.pulse(Tick::from_millis(100), Duration::from_millis(2000));
        assert!(led.is_lit());

        led.poll(Tick::from_millis(2099));
        assert!(led.is_lit());

        led.poll(Tick::from_millis(2100));
        assert!(!led.is_lit());
    }
}
