//! One sensor tag bound to its radio channel and publish gate.

use core::time::Duration;

use log::{debug, trace};

use crate::channel_map::{self, TagIdentity};
use crate::config::ChannelConfig;
use crate::error::Result;
use crate::tick::Tick;

use super::commands::SensorEvent;
use super::events::{Publication, Quantity};
use super::gate::{ChangeGate, GateState};
use super::ports::RadioPort;

/// A sensor tag wired to the radio.
///
/// Reacts to driver events only; it has no timers of its own.
#[derive(Debug, Clone)]
pub struct SensorChannel {
    tag: TagIdentity,
    channel_id: u8,
    gate: ChangeGate,
    state: GateState,
    update_interval: Duration,
}

impl SensorChannel {
    /// Build a channel, resolving its radio id from the tag identity.
    pub fn new(config: &ChannelConfig) -> Result<Self> {
        let channel_id = channel_map::radio_channel(config.tag)?;
        Ok(Self {
            tag: config.tag,
            channel_id,
            gate: ChangeGate::new(config.change_threshold, config.heartbeat()),
            state: GateState::INITIAL,
            update_interval: config.update_interval(),
        })
    }

    /// Handle a driver event. Returns `true` if a value was published.
    pub fn handle(&mut self, event: SensorEvent, now: Tick, radio: &mut impl RadioPort) -> bool {
        let SensorEvent::Update(reading) = event else {
            trace!("{}: ignoring {:?}", self.quantity(), event);
            return false;
        };

        let value = match reading {
            Some(v) if v.is_finite() => v,
            _ => {
                debug!("{} ch{:#04x}: no valid reading", self.quantity(), self.channel_id);
                return false;
            }
        };

        let (publish, next) = self.gate.should_publish(value, self.state, now);
        if !publish {
            return false;
        }

        radio.publish(&Publication::Numeric {
            quantity: self.quantity(),
            channel: self.channel_id,
            value,
        });
        self.state = next;
        true
    }

    pub fn quantity(&self) -> Quantity {
        self.tag.quantity()
    }

    pub fn tag(&self) -> TagIdentity {
        self.tag
    }

    pub fn channel_id(&self) -> u8 {
        self.channel_id
    }

    /// Acquisition interval the driver should be programmed with.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn gate_state(&self) -> GateState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel_map::{HumidityRevision, I2cBus, TagVariant};
    use crate::config::NodeConfig;
    use crate::error::Error;

    #[derive(Default)]
    struct Recorder(Vec<Publication>);

    impl RadioPort for Recorder {
        fn publish(&mut self, publication: &Publication) {
            self.0.push(publication.clone());
        }
    }

    #[test]
    fn failed_read_leaves_state_untouched() {
        let mut ch = SensorChannel::new(&NodeConfig::default().temperature).unwrap();
        let mut radio = Recorder::default();

        assert!(!ch.handle(SensorEvent::Update(None), Tick::ZERO, &mut radio));
        assert!(!ch.handle(SensorEvent::Update(Some(f32::NAN)), Tick::ZERO, &mut radio));
        assert!(radio.0.is_empty());
        assert_eq!(ch.gate_state(), GateState::INITIAL);
    }

    #[test]
    fn error_event_is_ignored() {
        let mut ch = SensorChannel::new(&NodeConfig::default().lux_meter).unwrap();
        let mut radio = Recorder::default();
        assert!(!ch.handle(SensorEvent::Error, Tick::ZERO, &mut radio));
        assert!(radio.0.is_empty());
    }

    #[test]
    fn publishes_on_resolved_channel() {
        let mut ch = SensorChannel::new(&NodeConfig::default().humidity).unwrap();
        let mut radio = Recorder::default();

        assert!(ch.handle(SensorEvent::Update(Some(45.0)), Tick::ZERO, &mut radio));
        assert_eq!(
            radio.0,
            vec![Publication::Numeric {
                quantity: Quantity::Humidity,
                channel: 0x04,
                value: 45.0,
            }]
        );
    }

    #[test]
    fn unmapped_revision_fails_construction() {
        let mut cfg = NodeConfig::default().humidity;
        cfg.tag = TagIdentity::new(TagVariant::Humidity(HumidityRevision::R4), I2cBus::I2c1);
        assert_eq!(
            SensorChannel::new(&cfg).unwrap_err(),
            Error::UnmappedChannel(cfg.tag)
        );
    }
}
