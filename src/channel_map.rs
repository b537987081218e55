//! Radio channel id assignment for sensor tags.
//!
//! Receivers already in the field decode publications by channel id, so
//! this table is wire format: change a value here and existing gateways
//! will mislabel the sensor.
//!
//! | Tag         | Selector          | I2C0 | I2C1 |
//! |-------------|-------------------|------|------|
//! | Temperature | address default   | 0x00 | 0x00 |
//! | Temperature | address alternate | 0x01 | 0x01 |
//! | Lux meter   | address default   | 0x00 | 0x00 |
//! | Lux meter   | address alternate | 0x01 | 0x01 |
//! | Humidity    | revision R1       | 0x00 | 0x80 |
//! | Humidity    | revision R2       | 0x02 | 0x82 |
//! | Humidity    | revision R3       | 0x04 | 0x84 |
//! | Humidity    | revision R4       |  --  |  --  |
//!
//! Temperature and lux tags do not encode the bus.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::app::events::Quantity;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Base channel ids
// ---------------------------------------------------------------------------

pub const CHANNEL_R1_I2C0_ADDRESS_DEFAULT: u8 = 0x00;
pub const CHANNEL_R1_I2C0_ADDRESS_ALTERNATE: u8 = 0x01;
pub const CHANNEL_R2_I2C0_ADDRESS_DEFAULT: u8 = 0x02;
pub const CHANNEL_R3_I2C0_ADDRESS_DEFAULT: u8 = 0x04;

/// Set on the channel id of a humidity tag wired to the secondary bus.
pub const SECONDARY_BUS_FLAG: u8 = 0x80;

// ---------------------------------------------------------------------------
// Tag identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum I2cBus {
    I2c0,
    I2c1,
}

/// Strap-selected I2C address of a temperature or lux tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagAddress {
    Default,
    Alternate,
}

/// Hardware revision of the humidity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumidityRevision {
    R1,
    R2,
    R3,
    R4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagVariant {
    Temperature(TagAddress),
    Humidity(HumidityRevision),
    LuxMeter(TagAddress),
}

/// Everything needed to pick a channel id for one physical tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagIdentity {
    pub variant: TagVariant,
    pub bus: I2cBus,
}

impl TagIdentity {
    pub const fn new(variant: TagVariant, bus: I2cBus) -> Self {
        Self { variant, bus }
    }

    /// The physical quantity this tag measures.
    pub const fn quantity(&self) -> Quantity {
        match self.variant {
            TagVariant::Temperature(_) => Quantity::Temperature,
            TagVariant::Humidity(_) => Quantity::Humidity,
            TagVariant::LuxMeter(_) => Quantity::Illuminance,
        }
    }
}

impl fmt::Display for TagIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} on {:?}", self.variant, self.bus)
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Resolve the radio channel id for a tag.
///
/// Fails for combinations with no entry in the table instead of leaving
/// the channel unwired.
pub fn radio_channel(tag: TagIdentity) -> Result<u8> {
    match tag.variant {
        TagVariant::Temperature(address) | TagVariant::LuxMeter(address) => Ok(match address {
            TagAddress::Default => CHANNEL_R1_I2C0_ADDRESS_DEFAULT,
            TagAddress::Alternate => CHANNEL_R1_I2C0_ADDRESS_ALTERNATE,
        }),
        TagVariant::Humidity(revision) => {
            let base = match revision {
                HumidityRevision::R1 => CHANNEL_R1_I2C0_ADDRESS_DEFAULT,
                HumidityRevision::R2 => CHANNEL_R2_I2C0_ADDRESS_DEFAULT,
                HumidityRevision::R3 => CHANNEL_R3_I2C0_ADDRESS_DEFAULT,
                HumidityRevision::R4 => return Err(Error::UnmappedChannel(tag)),
            };
            Ok(match tag.bus {
                I2cBus::I2c0 => base,
                I2cBus::I2c1 => base | SECONDARY_BUS_FLAG,
            })
        }
    }
}
