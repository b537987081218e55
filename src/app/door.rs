//! Door-contact state publisher.
//!
//! Every debounced transition publishes the input's current state, and a
//! periodic heartbeat republishes every tracked input whether it changed
//! or not. There is no filtering here: the debouncer upstream already
//! decided that a transition is real.

use core::fmt::Write;

use heapless::{String, Vec};
use log::warn;

use crate::config::{DoorConfig, MAX_DOORS};
use crate::error::{Error, Result};

use super::events::{Publication, TOPIC_CAP};
use super::ports::{RadioPort, SwitchPort};

/// Topic a door input publishes under.
pub fn door_topic(label: char) -> String<TOPIC_CAP> {
    let mut topic = String::new();
    // A char label always fits in 64 bytes.
    let _ = write!(topic, "door-sensor/{}/state", label);
    topic
}

/// Publishes the state of a fixed set of door inputs.
#[derive(Debug, Clone, Default)]
pub struct BinaryStatePublisher {
    labels: Vec<char, MAX_DOORS>,
}

impl BinaryStatePublisher {
    pub fn new(doors: &[DoorConfig]) -> Result<Self> {
        let mut publisher = Self::default();
        for door in doors {
            publisher.track(door.label)?;
        }
        Ok(publisher)
    }

    /// Start tracking an input.
    pub fn track(&mut self, label: char) -> Result<()> {
        if self.labels.contains(&label) {
            return Err(Error::Config("duplicate door label"));
        }
        self.labels
            .push(label)
            .map_err(|_| Error::Capacity("door inputs"))
    }

    /// Read `label`'s current state and publish it.
    ///
    /// `hw` satisfies both [`SwitchPort`] and [`RadioPort`] so the read
    /// and the publish go through one borrow.
    pub fn publish_state(&self, label: char, hw: &mut (impl SwitchPort + RadioPort)) {
        if !self.labels.contains(&label) {
            warn!("door '{}' is not tracked, not publishing", label);
            return;
        }
        let value = hw.switch_state(label);
        hw.publish(&Publication::Boolean {
            topic: door_topic(label),
            value,
        });
    }

    /// Republish every tracked input.
    pub fn publish_all(&self, hw: &mut (impl SwitchPort + RadioPort)) {
        for &label in &self.labels {
            self.publish_state(label, hw);
        }
    }

    pub fn labels(&self) -> &[char] {
        &self.labels
    }
}
