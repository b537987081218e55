//! System configuration parameters
//!
//! All tunable parameters for the garage node. The defaults are the
//! reference deployment; the host binary may override them from JSON.

use core::time::Duration;

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::app::events::Quantity;
use crate::channel_map::{HumidityRevision, I2cBus, TagAddress, TagIdentity, TagVariant};
use crate::error::{Error, Result};
use crate::pins;

/// Maximum number of door inputs tracked by the node.
pub const MAX_DOORS: usize = 4;

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    // --- Identity ---
    /// Firmware name announced in the pairing request
    pub firmware: String<16>,
    /// Firmware version announced in the pairing request
    pub version: String<8>,

    // --- Sensor channels ---
    pub temperature: ChannelConfig,
    pub humidity: ChannelConfig,
    pub lux_meter: ChannelConfig,

    // --- Doors ---
    pub doors: Vec<DoorConfig, MAX_DOORS>,
    /// Unconditional door-state republish interval (milliseconds)
    pub door_heartbeat_ms: u32,

    // --- Relay ---
    /// How long the relay stays energised after the last trigger (milliseconds)
    pub relay_pulse_ms: u32,

    // --- Status LED ---
    /// Length of the boot indication pulse (milliseconds)
    pub boot_led_pulse_ms: u32,
}

/// Publish policy and identity of one sensor tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub tag: TagIdentity,
    /// Minimum absolute change that forces a publish
    pub change_threshold: f32,
    /// Maximum time between publishes without a qualifying change (milliseconds)
    pub heartbeat_ms: u32,
    /// Driver acquisition interval (milliseconds)
    pub update_interval_ms: u32,
}

impl ChannelConfig {
    pub fn heartbeat(&self) -> Duration {
        Duration::from_millis(u64::from(self.heartbeat_ms))
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.update_interval_ms))
    }

    fn validate(&self, slot: Quantity, wrong_tag: &'static str) -> Result<()> {
        if self.tag.quantity() != slot {
            return Err(Error::Config(wrong_tag));
        }
        if !self.change_threshold.is_finite() || self.change_threshold < 0.0 {
            return Err(Error::Config("change_threshold must be finite and non-negative"));
        }
        if self.heartbeat_ms == 0 {
            return Err(Error::Config("heartbeat_ms must be non-zero"));
        }
        if self.update_interval_ms == 0 {
            return Err(Error::Config("update_interval_ms must be non-zero"));
        }
        Ok(())
    }
}

/// A door-contact input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorConfig {
    /// Stable label used in the topic (`door-sensor/<label>/state`)
    pub label: char,
    /// GPIO the contact is wired to
    pub gpio: i32,
    /// Debounce time requested from the switch driver; `None` = driver default
    pub debounce_ms: Option<u32>,
}

impl NodeConfig {
    pub fn door_heartbeat(&self) -> Duration {
        Duration::from_millis(u64::from(self.door_heartbeat_ms))
    }

    pub fn relay_pulse(&self) -> Duration {
        Duration::from_millis(u64::from(self.relay_pulse_ms))
    }

    pub fn boot_led_pulse(&self) -> Duration {
        Duration::from_millis(u64::from(self.boot_led_pulse_ms))
    }

    /// Reject values that would break the publish or pulse timing.
    pub fn validate(&self) -> Result<()> {
        self.temperature
            .validate(Quantity::Temperature, "temperature slot needs a temperature tag")?;
        self.humidity
            .validate(Quantity::Humidity, "humidity slot needs a humidity tag")?;
        self.lux_meter
            .validate(Quantity::Illuminance, "lux_meter slot needs a lux meter tag")?;

        if self.door_heartbeat_ms == 0 {
            return Err(Error::Config("door_heartbeat_ms must be non-zero"));
        }
        if self.relay_pulse_ms == 0 {
            return Err(Error::Config("relay_pulse_ms must be non-zero"));
        }
        for (i, door) in self.doors.iter().enumerate() {
            if self.doors[..i].iter().any(|d| d.label == door.label) {
                return Err(Error::Config("duplicate door label"));
            }
        }
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        let mut doors = Vec::new();
        // Both pushes fit: MAX_DOORS >= 2.
        let _ = doors.push(DoorConfig {
            label: 'a',
            gpio: pins::DOOR_A_GPIO,
            debounce_ms: Some(1000),
        });
        let _ = doors.push(DoorConfig {
            label: 'b',
            gpio: pins::DOOR_B_GPIO,
            debounce_ms: None,
        });

        Self {
            firmware: String::try_from("garage").unwrap_or_default(),
            version: String::try_from("1.0").unwrap_or_default(),

            temperature: ChannelConfig {
                tag: TagIdentity::new(TagVariant::Temperature(TagAddress::Default), I2cBus::I2c0),
                change_threshold: 0.2,  // degC
                heartbeat_ms: 15 * 60 * 1000,
                update_interval_ms: 2 * 1000,
            },
            humidity: ChannelConfig {
                tag: TagIdentity::new(TagVariant::Humidity(HumidityRevision::R3), I2cBus::I2c0),
                change_threshold: 2.0,  // %RH
                heartbeat_ms: 15 * 60 * 1000,
                update_interval_ms: 2 * 1000,
            },
            lux_meter: ChannelConfig {
                tag: TagIdentity::new(TagVariant::LuxMeter(TagAddress::Default), I2cBus::I2c0),
                change_threshold: 25.0, // lux
                heartbeat_ms: 15 * 60 * 1000,
                update_interval_ms: 5 * 1000,
            },

            doors,
            door_heartbeat_ms: 5 * 60 * 1000,

            relay_pulse_ms: 1000,

            boot_led_pulse_ms: 2000,
        }
    }
}
