//! Fuzz target: `NodeConfig` JSON override
//!
//! Parses arbitrary bytes as the JSON config file and checks that:
//! - Parsing and validation never panic
//! - A config that passes `validate()` either builds a node or fails
//!   only with `UnmappedChannel`
//! - Every channel of a built node measures the quantity of its slot
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use garage::Error;
use garage::app::commands::SensorSource;
use garage::app::events::Quantity;
use garage::app::service::GatewayNode;
use garage::config::NodeConfig;
use garage::scheduler::Scheduler;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<NodeConfig>(data) else {
        return;
    };
    if config.validate().is_err() {
        return;
    }

    let mut sched = Scheduler::new();
    match GatewayNode::new(&config, &mut sched) {
        Ok(node) => {
            for (source, quantity) in [
                (SensorSource::Temperature, Quantity::Temperature),
                (SensorSource::Humidity, Quantity::Humidity),
                (SensorSource::LuxMeter, Quantity::Illuminance),
            ] {
                assert_eq!(node.channel(source).quantity(), quantity);
            }
        }
        Err(Error::UnmappedChannel(_)) => {}
        Err(e) => panic!("validated config rejected: {e}"),
    }
});
