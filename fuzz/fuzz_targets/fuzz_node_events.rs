//! Fuzz target: `GatewayNode` event stream
//!
//! Decodes fuzz bytes into a stream of timed node events and drives the
//! reference node through them. Invariants checked:
//! - No panics under any event order or timing
//! - The relay is never energised without a future release planned
//!
//! cargo fuzz run fuzz_node_events

#![no_main]

use std::time::Duration;

use garage::app::commands::{
    ButtonEvent, NodeEvent, RemoteCommand, SensorEvent, SensorSource, StateId, SwitchEvent,
};
use garage::app::events::Publication;
use garage::app::ports::{IndicatorPort, RadioPort, RelayPort, SwitchPort, TimerPort};
use garage::app::service::{GatewayNode, TaskDispatch};
use garage::config::NodeConfig;
use garage::scheduler::Scheduler;
use garage::tick::Tick;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct NullHw {
    relay: bool,
    doors: u8,
}

impl RadioPort for NullHw {
    fn publish(&mut self, _publication: &Publication) {}
}

impl RelayPort for NullHw {
    fn set_relay(&mut self, energised: bool) {
        self.relay = energised;
    }
}

impl SwitchPort for NullHw {
    fn switch_state(&self, label: char) -> bool {
        self.doors & (1 << (label as u32 % 8)) != 0
    }
}

impl IndicatorPort for NullHw {
    fn pulse(&mut self, _now: Tick, _length: Duration) {}
}

fn decode(op: u8, arg: u8) -> NodeEvent {
    let source = match arg % 3 {
        0 => SensorSource::Temperature,
        1 => SensorSource::Humidity,
        _ => SensorSource::LuxMeter,
    };
    match op % 6 {
        0 => NodeEvent::Sensor {
            source,
            event: SensorEvent::Update(Some(f32::from(arg) / 4.0)),
        },
        1 => NodeEvent::Sensor {
            source,
            event: SensorEvent::Update(None),
        },
        2 => NodeEvent::Door {
            label: if arg & 1 == 0 { 'a' } else { 'b' },
            event: if arg & 2 == 0 {
                SwitchEvent::Opened
            } else {
                SwitchEvent::Closed
            },
        },
        3 => NodeEvent::Button(ButtonEvent::Press),
        4 => NodeEvent::Button(ButtonEvent::Click),
        _ => NodeEvent::Remote(RemoteCommand::StateSet {
            state: StateId::from_u8(arg % 5).unwrap_or(StateId::Led),
            value: Some(arg & 1 == 1),
        }),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut sched = Scheduler::new();
    let Ok(mut node) = GatewayNode::new(&NodeConfig::default(), &mut sched) else {
        return;
    };
    let mut hw = NullHw::default();
    let mut now = Tick::ZERO;
    node.start(now, &mut hw, &mut sched);

    for chunk in data.chunks_exact(3) {
        now = now + Duration::from_millis(u64::from(chunk[0]) * 16);
        hw.doors ^= chunk[2];
        sched.run_due(now, &mut TaskDispatch { node: &mut node, hw: &mut hw });
        node.handle(decode(chunk[1], chunk[2]), now, &mut hw, &mut sched);

        match sched.deadline(node.relay().off_task()) {
            Some(release_at) => assert!(release_at > now, "stale release deadline"),
            None => assert!(!hw.relay, "relay on with no release planned"),
        }
    }
});
