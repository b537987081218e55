//! Garage node firmware: main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter              LogRadio        MonotonicClock   │
//! │  (Relay+Indicator+Switch)     (RadioPort)     (ClockPort)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              GatewayNode (pure logic)                  │    │
//! │  │  SensorChannel ×3 · BinaryStatePublisher · PulseActuator│   │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven deferred tasks)                    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On the host the sensor, door and button drivers are replaced by a
//! deterministic stimulus generator so the whole node can be watched
//! in the log.
//!
//! On `target_os = "espidf"` only the relay and status LED are wired to
//! GPIO. No sensor tag, door contact, button or radio-command driver is
//! connected there yet, so after boot the node only runs its door
//! heartbeat and LED timing.
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use embedded_hal::digital::OutputPin;
use log::info;

use garage::adapters::hardware::HardwareAdapter;
use garage::adapters::log_radio::LogRadio;
use garage::adapters::time::MonotonicClock;
use garage::app::ports::ClockPort;
use garage::app::service::{GatewayNode, TaskDispatch};
use garage::config::NodeConfig;
use garage::drivers::relay::RelayDriver;
use garage::drivers::status_led::StatusLed;
use garage::scheduler::Scheduler;

/// Idle time between loop iterations (milliseconds).
const LOOP_INTERVAL_MS: u64 = 50;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Platform bootstrap + logging ───────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;
    info!("╔══════════════════════════════════════╗");
    info!("║  {} v{}                         ║", config.firmware, config.version);
    info!("╚══════════════════════════════════════╝");

    // ── 3. Adapters ───────────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut hw = build_hardware(&config)?;
    let mut sched = Scheduler::new();

    // ── 4. Node ───────────────────────────────────────────────
    let mut node = GatewayNode::new(&config, &mut sched).context("building node")?;
    node.start(clock.now(), &mut hw, &mut sched);

    #[cfg(not(target_os = "espidf"))]
    let mut stimulus = sim::Stimulus::new(&node, clock.now());

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    loop {
        std::thread::sleep(std::time::Duration::from_millis(LOOP_INTERVAL_MS));
        let now = clock.now();

        #[cfg(not(target_os = "espidf"))]
        for event in stimulus.poll(now, &mut hw) {
            node.handle(event, now, &mut hw, &mut sched);
        }

        sched.run_due(
            now,
            &mut TaskDispatch {
                node: &mut node,
                hw: &mut hw,
            },
        );
        hw.poll(now);
    }
}

/// Defaults, optionally replaced by the JSON file named in `GARAGE_CONFIG`.
fn load_config() -> Result<NodeConfig> {
    let Ok(path) = std::env::var("GARAGE_CONFIG") else {
        info!("Config: built-in defaults");
        return Ok(NodeConfig::default());
    };

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: NodeConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config
        .validate()
        .with_context(|| format!("validating {path}"))?;
    info!("Config loaded from {}", path);
    Ok(config)
}

#[cfg(target_os = "espidf")]
fn build_hardware(
    config: &NodeConfig,
) -> Result<HardwareAdapter<impl OutputPin, impl OutputPin, LogRadio>> {
    use esp_idf_hal::gpio::PinDriver;
    use esp_idf_hal::peripherals::Peripherals;

    let p = Peripherals::take()?;
    let relay = PinDriver::output(p.pins.gpio12)?;
    let led = PinDriver::output(p.pins.gpio18)?;
    Ok(HardwareAdapter::new(
        RelayDriver::new(relay),
        StatusLed::new(led),
        LogRadio::new(),
        &config.doors,
    ))
}

#[cfg(not(target_os = "espidf"))]
fn build_hardware(
    config: &NodeConfig,
) -> Result<HardwareAdapter<impl OutputPin, impl OutputPin, LogRadio>> {
    use garage::drivers::sim_pin::SimPin;
    use garage::pins;

    Ok(HardwareAdapter::new(
        RelayDriver::new(SimPin::new(pins::RELAY_GPIO)),
        StatusLed::new(SimPin::new(pins::LED_GPIO)),
        LogRadio::new(),
        &config.doors,
    ))
}

// ── Host stimulus ─────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::time::Duration;

    use embedded_hal::digital::OutputPin;
    use garage::adapters::hardware::HardwareAdapter;
    use garage::adapters::log_radio::LogRadio;
    use garage::app::commands::{
        ButtonEvent, NodeEvent, RemoteCommand, SensorEvent, SensorSource, StateId,
    };
    use garage::app::service::GatewayNode;
    use garage::tick::Tick;

    const SOURCES: [SensorSource; 3] = [
        SensorSource::Temperature,
        SensorSource::Humidity,
        SensorSource::LuxMeter,
    ];

    /// Door 'a' toggles at this period.
    const DOOR_PERIOD: Duration = Duration::from_secs(7);
    /// The reed switch bounces for this long after each toggle.
    const DOOR_CHATTER: Duration = Duration::from_millis(300);
    /// A button press lands at this period.
    const BUTTON_PERIOD: Duration = Duration::from_secs(20);
    /// A remote relay request lands at this period.
    const REMOTE_PERIOD: Duration = Duration::from_secs(45);

    /// Stand-in for the sensor, door and button drivers.
    pub struct Stimulus {
        intervals: [Duration; 3],
        next_sample: [Tick; 3],
        door_toggled: Tick,
        door_open: bool,
        next_button: Tick,
        next_remote: Tick,
    }

    impl Stimulus {
        pub fn new(node: &GatewayNode, now: Tick) -> Self {
            let intervals = SOURCES.map(|s| node.channel(s).update_interval());
            Self {
                intervals,
                next_sample: intervals.map(|i| now + i),
                door_toggled: now,
                door_open: false,
                next_button: now + BUTTON_PERIOD,
                next_remote: now + REMOTE_PERIOD,
            }
        }

        /// Events the drivers would have raised by `now`.
        pub fn poll<R: OutputPin, L: OutputPin>(
            &mut self,
            now: Tick,
            hw: &mut HardwareAdapter<R, L, LogRadio>,
        ) -> Vec<NodeEvent> {
            let mut events = Vec::new();

            for (i, source) in SOURCES.into_iter().enumerate() {
                if now >= self.next_sample[i] {
                    self.next_sample[i] = now + self.intervals[i];
                    events.push(NodeEvent::Sensor {
                        source,
                        event: SensorEvent::Update(reading(source, now)),
                    });
                }
            }

            if now.since(self.door_toggled) >= DOOR_PERIOD {
                self.door_toggled = now;
                self.door_open = !self.door_open;
            }
            let bouncing = now.since(self.door_toggled) < DOOR_CHATTER
                && (now.as_millis() / 50) % 2 == 1;
            let raw_a = self.door_open ^ bouncing;
            for (label, raw_open) in [('a', raw_a), ('b', false)] {
                if let Some(event) = hw.sample_door(label, raw_open, now) {
                    events.push(NodeEvent::Door { label, event });
                }
            }

            if now >= self.next_button {
                self.next_button = now + BUTTON_PERIOD;
                events.push(NodeEvent::Button(ButtonEvent::Press));
            }

            if now >= self.next_remote {
                self.next_remote = now + REMOTE_PERIOD;
                events.push(NodeEvent::Remote(RemoteCommand::StateSet {
                    state: StateId::PowerModuleRelay,
                    value: Some(true),
                }));
            }

            events
        }
    }

    /// Slow sinusoid around a plausible indoor value; every 13th humidity
    /// read fails.
    fn reading(source: SensorSource, now: Tick) -> Option<f32> {
        let secs = now.as_millis() as f32 / 1000.0;
        match source {
            SensorSource::Temperature => Some(18.0 + 1.5 * (secs / 60.0).sin()),
            SensorSource::Humidity if (now.as_millis() / 2000) % 13 == 12 => None,
            SensorSource::Humidity => Some(55.0 + 6.0 * (secs / 90.0).sin()),
            SensorSource::LuxMeter => Some(120.0 + 80.0 * (secs / 30.0).sin()),
        }
    }
}
