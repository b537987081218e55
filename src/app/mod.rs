//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the publish and actuation rules of the garage
//! node: the change gate shared by every sensor channel, the door-state
//! publisher and the relay pulse. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod channel;
pub mod commands;
pub mod door;
pub mod events;
pub mod gate;
pub mod ports;
pub mod relay;
pub mod service;
