//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the relay and status-LED drivers, one debounced [`DoorContact`]
//! per configured door, and the radio. Exposes them through
//! [`RadioPort`], [`RelayPort`], [`SwitchPort`] and [`IndicatorPort`] so
//! a single `&mut HardwareAdapter` satisfies
//! [`NodeHardware`](crate::app::service::NodeHardware).

use core::time::Duration;

use embedded_hal::digital::OutputPin;
use heapless::Vec;
use log::{info, warn};

use crate::app::commands::SwitchEvent;
use crate::app::events::Publication;
use crate::app::ports::{IndicatorPort, RadioPort, RelayPort, SwitchPort};
use crate::config::{DoorConfig, MAX_DOORS};
use crate::drivers::door_contact::DoorContact;
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_led::StatusLed;
use crate::tick::Tick;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<R, L, Radio> {
    relay: RelayDriver<R>,
    led: StatusLed<L>,
    radio: Radio,
    doors: Vec<DoorContact, MAX_DOORS>,
}

impl<R: OutputPin, L: OutputPin, Radio: RadioPort> HardwareAdapter<R, L, Radio> {
    /// Wire the drivers and build one contact per entry of `doors`.
    pub fn new(
        relay: RelayDriver<R>,
        led: StatusLed<L>,
        radio: Radio,
        doors: &[DoorConfig],
    ) -> Self {
        let mut contacts = Vec::new();
        for door in doors {
            let contact = DoorContact::new(door);
            info!(
                "door '{}' on gpio{}, debounce {:?}",
                contact.label(),
                contact.gpio(),
                contact.debounce()
            );
            if contacts.push(contact).is_err() {
                warn!("door '{}' dropped: table full", door.label);
            }
        }
        Self {
            relay,
            led,
            radio,
            doors: contacts,
        }
    }

    /// Feed a raw level sample (`true` = open) for one door contact.
    ///
    /// Returns the debounced transition, if this sample completed one.
    pub fn sample_door(&mut self, label: char, raw_open: bool, now: Tick) -> Option<SwitchEvent> {
        let Some(contact) = self.doors.iter_mut().find(|c| c.label() == label) else {
            warn!("door '{}' has no contact", label);
            return None;
        };
        contact.sample(raw_open, now)
    }

    /// Housekeeping that runs every loop iteration.
    pub fn poll(&mut self, now: Tick) {
        self.led.poll(now);
    }

    pub fn relay(&self) -> &RelayDriver<R> {
        &self.relay
    }

    pub fn led(&self) -> &StatusLed<L> {
        &self.led
    }

    pub fn radio(&self) -> &Radio {
        &self.radio
    }

    pub fn doors(&self) -> &[DoorContact] {
        &self.doors
    }
}

// ── RadioPort implementation ──────────────────────────────────

impl<R, L, Radio: RadioPort> RadioPort for HardwareAdapter<R, L, Radio> {
    fn publish(&mut self, publication: &Publication) {
        self.radio.publish(publication);
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl<R: OutputPin, L, Radio> RelayPort for HardwareAdapter<R, L, Radio> {
    fn set_relay(&mut self, energised: bool) {
        self.relay.set(energised);
    }
}

// ── SwitchPort implementation ─────────────────────────────────

impl<R, L, Radio> SwitchPort for HardwareAdapter<R, L, Radio> {
    fn switch_state(&self, label: char) -> bool {
        self.doors
            .iter()
            .find(|c| c.label() == label)
            .is_some_and(DoorContact::is_open)
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<R, L: OutputPin, Radio> IndicatorPort for HardwareAdapter<R, L, Radio> {
    fn pulse(&mut self, now: Tick, length: Duration) {
        self.led.pulse(now, length);
    }
}
