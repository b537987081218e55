//! Inbound events to the application service.
//!
//! Every external callback (sensor driver, switch debouncer, button,
//! radio command intake) is translated into one [`NodeEvent`] and handed
//! to [`GatewayNode::handle`](super::service::GatewayNode::handle).

/// Which sensor channel an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSource {
    Temperature,
    Humidity,
    LuxMeter,
}

/// Event raised by a sensor tag driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    /// A measurement cycle finished. `None` when the driver could not
    /// produce a valid value.
    Update(Option<f32>),
    /// The driver reported a bus or device error.
    Error,
}

/// Debounced transition of a door contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchEvent {
    Opened,
    Closed,
}

/// Events raised by the push-button driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Press,
    Release,
    Click,
    Hold,
}

/// Node state ids addressable by a remote state-set request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StateId {
    Led = 0x00,
    RelayModule0 = 0x01,
    RelayModule1 = 0x02,
    PowerModuleRelay = 0x03,
}

impl StateId {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::Led),
            0x01 => Some(Self::RelayModule0),
            0x02 => Some(Self::RelayModule1),
            0x03 => Some(Self::PowerModuleRelay),
            _ => None,
        }
    }
}

/// Commands received over the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Request to set a node state. `value` is whatever the sender put in
    /// the frame; a pulse output ignores it.
    StateSet { state: StateId, value: Option<bool> },
}

/// Everything the node reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeEvent {
    Sensor {
        source: SensorSource,
        event: SensorEvent,
    },
    Door {
        label: char,
        event: SwitchEvent,
    },
    Button(ButtonEvent),
    Remote(RemoteCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_id_round_trips_known_values() {
        for id in [
            StateId::Led,
            StateId::RelayModule0,
            StateId::RelayModule1,
            StateId::PowerModuleRelay,
        ] {
            assert_eq!(StateId::from_u8(id as u8), Some(id));
        }
        assert_eq!(StateId::from_u8(0x7f), None);
    }
}
