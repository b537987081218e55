//! End-to-end behaviour of the reference deployment.

use crate::mock_hw::Bench;

use garage::app::commands::{ButtonEvent, NodeEvent, SensorEvent, SensorSource, SwitchEvent};
use garage::app::events::Quantity;
use garage::config::NodeConfig;

const MINUTE_MS: u64 = 60_000;

fn reading(source: SensorSource, value: f32) -> NodeEvent {
    NodeEvent::Sensor {
        source,
        event: SensorEvent::Update(Some(value)),
    }
}

// ── Scenario 1: threshold crossing ────────────────────────────

#[test]
fn temperature_publishes_first_sample_then_threshold_crossings() {
    let mut bench = Bench::start(&NodeConfig::default());

    bench.handle_at(0, reading(SensorSource::Temperature, 20.00));
    bench.handle_at(5_000, reading(SensorSource::Temperature, 20.10));
    bench.handle_at(10_000, reading(SensorSource::Temperature, 20.25));

    assert_eq!(bench.hw.numeric(Quantity::Temperature), vec![20.00, 20.25]);
    let state = bench.node.channel(SensorSource::Temperature).gate_state();
    assert_eq!(state.last_published_value, 20.25);
}

// ── Scenario 2: heartbeat ─────────────────────────────────────

#[test]
fn constant_humidity_republishes_once_at_fifteen_minutes() {
    let mut bench = Bench::start(&NodeConfig::default());

    for ms in (0..=16 * MINUTE_MS).step_by(2_000) {
        bench.handle_at(ms, reading(SensorSource::Humidity, 45.0));
    }

    assert_eq!(bench.hw.numeric(Quantity::Humidity), vec![45.0, 45.0]);
    let state = bench.node.channel(SensorSource::Humidity).gate_state();
    assert_eq!(state.next_deadline.as_millis(), 30 * MINUTE_MS);
}

// ── Scenario 3: re-trigger extends the pulse ──────────────────

#[test]
fn second_press_inside_window_moves_release() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();

    bench.handle_at(0, NodeEvent::Button(ButtonEvent::Press));
    bench.handle_at(500, NodeEvent::Button(ButtonEvent::Press));

    bench.advance_to(1_000);
    assert_eq!(bench.hw.relay_writes(), vec![true, true], "still on at 1000 ms");

    bench.advance_to(1_499);
    assert_eq!(bench.hw.relay_writes(), vec![true, true]);

    bench.advance_to(1_500);
    assert_eq!(bench.hw.relay_writes(), vec![true, true, false]);

    bench.advance_to(5_000);
    assert_eq!(bench.hw.relay_writes(), vec![true, true, false], "one release only");
}

// ── Scenario 4: door transitions and heartbeat ────────────────

#[test]
fn door_open_publishes_now_and_heartbeat_covers_quiet_door() {
    let mut bench = Bench::start(&NodeConfig::default());
    bench.hw.clear();

    bench.hw.doors.insert('a', true);
    bench.handle_at(
        1_000,
        NodeEvent::Door {
            label: 'a',
            event: SwitchEvent::Opened,
        },
    );
    assert_eq!(bench.hw.door('a'), vec![true]);
    assert!(bench.hw.door('b').is_empty());

    bench.advance_to(5 * MINUTE_MS - 1);
    assert!(bench.hw.door('b').is_empty());

    bench.advance_to(5 * MINUTE_MS);
    assert_eq!(bench.hw.door('a'), vec![true, true]);
    assert_eq!(bench.hw.door('b'), vec![false]);

    bench.advance_to(10 * MINUTE_MS);
    assert_eq!(bench.hw.door('b'), vec![false, false]);
}
