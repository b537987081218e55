//! Integration tests for the GatewayNode → ports pipeline.
//!
//! Boot sequence, button and remote-command routing, and the deferred
//! relay release, all through the real scheduler.

use std::time::Duration;

use crate::mock_hw::{Bench, HwCall};

use garage::app::commands::{
    ButtonEvent, NodeEvent, RemoteCommand, SensorEvent, SensorSource, StateId, SwitchEvent,
};
use garage::app::door::door_topic;
use garage::app::events::{Publication, Quantity};
use garage::app::ports::TimerPort;
use garage::app::relay::PulseState;
use garage::config::NodeConfig;
use garage::tick::Tick;

fn press() -> NodeEvent {
    NodeEvent::Button(ButtonEvent::Press)
}

fn set_state(state: StateId, value: Option<bool>) -> NodeEvent {
    NodeEvent::Remote(RemoteCommand::StateSet { state, value })
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_releases_relay_pairs_and_flashes_led() {
    let bench = Bench::start(&NodeConfig::default());

    assert_eq!(bench.hw.calls[0], HwCall::SetRelay(false));
    assert_eq!(
        bench.hw.calls[1],
        HwCall::Publish(Publication::PairingRequest {
            firmware: "garage".try_into().unwrap(),
            version: "1.0".try_into().unwrap(),
        })
    );
    assert_eq!(
        bench.hw.calls[2],
        HwCall::LedPulse {
            at: Tick::ZERO,
            length: Duration::from_millis(2000),
        }
    );
}

#[test]
fn boot_publishes_every_door_at_tick_zero() {
    let bench = Bench::start(&NodeConfig::default());

    assert_eq!(bench.hw.door('a'), vec![false]);
    assert_eq!(bench.hw.door('b'), vec![false]);
    assert_eq!(
        bench.sched.deadline(bench.node.door_heartbeat_task()),
        Some(Tick::from_millis(300_000))
    );
}

#[test]
fn boot_pairing_uses_configured_identity() {
    let mut config = NodeConfig::default();
    config.firmware = "garage-west".try_into().unwrap();
    config.version = "1.1".try_into().unwrap();
    let bench = Bench::start(&config);

    assert!(bench.hw.publications().contains(&Publication::PairingRequest {
        firmware: "garage-west".try_into().unwrap(),
        version: "1.1".try_into().unwrap(),
    }));
}

// ── Button ────────────────────────────────────────────────────

#[test]
fn button_press_pulses_relay_for_one_second() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();

    bench.handle_at(10, press());
    assert_eq!(bench.hw.relay_writes(), vec![true]);
    assert_eq!(
        bench.node.relay().state(),
        PulseState::Pulsing {
            release_at: Tick::from_millis(1010)
        }
    );

    bench.advance_to(1009);
    assert_eq!(bench.hw.relay_writes(), vec![true]);

    bench.advance_to(1010);
    assert_eq!(bench.hw.relay_writes(), vec![true, false]);
    assert_eq!(bench.node.relay().state(), PulseState::Off);
}

#[test]
fn non_press_button_events_are_ignored() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();

    for event in [ButtonEvent::Release, ButtonEvent::Click, ButtonEvent::Hold] {
        bench.handle(NodeEvent::Button(event));
    }
    assert!(bench.hw.calls.is_empty());
    assert_eq!(bench.sched.deadline(bench.node.relay().off_task()), None);
}

// ── Remote commands ───────────────────────────────────────────

#[test]
fn power_module_relay_set_pulses_regardless_of_value() {
    for value in [Some(true), Some(false), None] {
        let mut bench = Bench::start(&NodeConfig::default());
        bench.hw.clear();

        bench.handle_at(100, set_state(StateId::PowerModuleRelay, value));
        assert_eq!(bench.hw.relay_writes(), vec![true], "value {:?}", value);

        bench.advance_to(1100);
        assert_eq!(bench.hw.relay_writes(), vec![true, false]);
    }
}

#[test]
fn other_state_ids_do_not_touch_the_relay() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();

    for state in [StateId::Led, StateId::RelayModule0, StateId::RelayModule1] {
        bench.handle(set_state(state, Some(true)));
    }
    assert!(bench.hw.calls.is_empty());
}

#[test]
fn state_ids_decode_from_wire_values() {
    assert_eq!(StateId::from_u8(0x03), Some(StateId::PowerModuleRelay));
    assert_eq!(StateId::from_u8(0x00), Some(StateId::Led));
    assert_eq!(StateId::from_u8(0x04), None);
}

// ── Routing ───────────────────────────────────────────────────

#[test]
fn sensor_events_reach_their_own_channel() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();

    bench.handle(NodeEvent::Sensor {
        source: SensorSource::LuxMeter,
        event: SensorEvent::Update(Some(310.0)),
    });
    bench.handle(NodeEvent::Sensor {
        source: SensorSource::Humidity,
        event: SensorEvent::Update(Some(52.5)),
    });

    assert_eq!(
        bench.hw.publications(),
        vec![
            Publication::Numeric {
                quantity: Quantity::Illuminance,
                channel: 0x00,
                value: 310.0,
            },
            Publication::Numeric {
                quantity: Quantity::Humidity,
                channel: 0x04,
                value: 52.5,
            },
        ]
    );
}

#[test]
fn door_event_for_unknown_label_is_dropped() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();

    bench.handle(NodeEvent::Door {
        label: 'z',
        event: SwitchEvent::Opened,
    });
    assert!(bench.hw.calls.is_empty());
}

#[test]
fn door_publish_reads_level_not_event_kind() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();
    bench.hw.doors.insert('b', true);

    // The event kind is informational; the current level is what counts.
    bench.handle(NodeEvent::Door {
        label: 'b',
        event: SwitchEvent::Closed,
    });
    assert_eq!(
        bench.hw.publications(),
        vec![Publication::Boolean {
            topic: door_topic('b'),
            value: true,
        }]
    );
}
