//! Input and actuator drivers, plus host-side pin simulation.

pub mod door_contact;
pub mod relay;
pub mod sim_pin;
pub mod status_led;
