//! Outbound publications.
//!
//! The application core hands these to the [`RadioPort`](super::ports::RadioPort).
//! Adapters on the other side decide how they reach the air: a radio
//! frame on the node, a log line on the host.

use core::fmt;

use heapless::String;

/// Capacity of a boolean topic string.
pub const TOPIC_CAP: usize = 64;

/// Physical quantity carried by a numeric publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Degrees Celsius.
    Temperature,
    /// Relative humidity, percent.
    Humidity,
    /// Illuminance, lux.
    Illuminance,
}

impl Quantity {
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "\u{00b0}C",
            Self::Humidity => "%",
            Self::Illuminance => "lx",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
            Self::Illuminance => write!(f, "illuminance"),
        }
    }
}

/// Messages the node sends over the radio link.
#[derive(Debug, Clone, PartialEq)]
pub enum Publication {
    /// A sensor value on a numeric channel.
    Numeric {
        quantity: Quantity,
        channel: u8,
        value: f32,
    },

    /// A boolean state under a string topic.
    Boolean {
        topic: String<TOPIC_CAP>,
        value: bool,
    },

    /// Announce the node to the gateway after boot.
    PairingRequest {
        firmware: String<16>,
        version: String<8>,
    },
}
