//! Application service: the hexagonal core.
//!
//! [`GatewayNode`] owns the three sensor channels, the door publisher and
//! the relay pulse. It exposes the callback entry points the host wires to
//! its drivers. All I/O flows through port traits injected at call sites,
//! making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorEvent ──▶ ┌──────────────────────────┐ ──▶ RadioPort
//!  SwitchEvent ──▶ │        GatewayNode        │ ──▶ RelayPort
//!  ButtonEvent ──▶ │ channels · doors · relay  │ ──▶ IndicatorPort
//!  RemoteCommand ▶ └──────────────────────────┘ ◀── SwitchPort
//!                              ▲
//!                  TimerPort / SchedulerDelegate
//! ```

use core::time::Duration;

use log::{debug, info};

use crate::config::NodeConfig;
use crate::error::Result;
use crate::tick::Tick;

use super::channel::SensorChannel;
use super::commands::{ButtonEvent, NodeEvent, RemoteCommand, SensorSource, StateId};
use super::door::BinaryStatePublisher;
use super::events::Publication;
use super::ports::{
    IndicatorPort, RadioPort, RelayPort, SchedulerDelegate, SwitchPort, TaskId, TimerPort,
};
use super::relay::PulseActuator;

// ───────────────────────────────────────────────────────────────
// Hardware bundle
// ───────────────────────────────────────────────────────────────

/// Everything the node drives or reads, as one borrow.
///
/// Mirrors a single hardware adapter implementing every port, which
/// avoids juggling several mutable borrows at each call site.
pub trait NodeHardware: RadioPort + RelayPort + SwitchPort + IndicatorPort {}

impl<T: RadioPort + RelayPort + SwitchPort + IndicatorPort> NodeHardware for T {}

// ───────────────────────────────────────────────────────────────
// GatewayNode
// ───────────────────────────────────────────────────────────────

pub struct GatewayNode {
    temperature: SensorChannel,
    humidity: SensorChannel,
    lux_meter: SensorChannel,
    doors: BinaryStatePublisher,
    relay: PulseActuator,
    door_heartbeat_task: TaskId,
    door_heartbeat: Duration,
    boot_led_pulse: Duration,
    pairing: Publication,
}

impl GatewayNode {
    /// Build every component and register the deferred tasks.
    ///
    /// Fails on invalid configuration or a sensor tag without a radio
    /// channel. Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: &NodeConfig, timers: &mut dyn TimerPort) -> Result<Self> {
        config.validate()?;

        let temperature = SensorChannel::new(&config.temperature)?;
        let humidity = SensorChannel::new(&config.humidity)?;
        let lux_meter = SensorChannel::new(&config.lux_meter)?;
        let doors = BinaryStatePublisher::new(&config.doors)?;
        let relay = PulseActuator::new(config.relay_pulse(), timers)?;
        let door_heartbeat_task = timers.register("door-heartbeat")?;

        for ch in [&temperature, &humidity, &lux_meter] {
            info!(
                "{} tag {} -> ch{:#04x}, every {:?}",
                ch.quantity(),
                ch.tag(),
                ch.channel_id(),
                ch.update_interval()
            );
        }

        Ok(Self {
            temperature,
            humidity,
            lux_meter,
            doors,
            relay,
            door_heartbeat_task,
            door_heartbeat: config.door_heartbeat(),
            boot_led_pulse: config.boot_led_pulse(),
            pairing: Publication::PairingRequest {
                firmware: config.firmware.clone(),
                version: config.version.clone(),
            },
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot sequence: release the relay, request pairing, flash the
    /// status LED and plan the first door heartbeat for `now`.
    pub fn start(&mut self, now: Tick, hw: &mut impl NodeHardware, timers: &mut dyn TimerPort) {
        hw.set_relay(false);
        hw.publish(&self.pairing);
        hw.pulse(now, self.boot_led_pulse);
        timers.plan_at(self.door_heartbeat_task, now);
        info!("GatewayNode started at {}", now);
    }

    // ── Event dispatch ────────────────────────────────────────

    /// Process one external event.
    pub fn handle(
        &mut self,
        event: NodeEvent,
        now: Tick,
        hw: &mut impl NodeHardware,
        timers: &mut dyn TimerPort,
    ) {
        match event {
            NodeEvent::Sensor { source, event } => {
                self.channel_mut(source).handle(event, now, hw);
            }
            NodeEvent::Door { label, event } => {
                debug!("door '{}' {:?}", label, event);
                self.doors.publish_state(label, hw);
            }
            NodeEvent::Button(ButtonEvent::Press) => {
                self.relay.trigger(now, hw, timers);
            }
            NodeEvent::Button(_) => {}
            NodeEvent::Remote(cmd) => self.handle_remote(cmd, now, hw, timers),
        }
    }

    /// Dispatch a deferred task that came due.
    pub fn on_task_due(
        &mut self,
        task: TaskId,
        now: Tick,
        hw: &mut impl NodeHardware,
        timers: &mut dyn TimerPort,
    ) {
        if task == self.relay.off_task() {
            self.relay.release(hw);
        } else if task == self.door_heartbeat_task {
            self.doors.publish_all(hw);
            timers.plan_relative(task, now, self.door_heartbeat);
        } else {
            debug!("task {:?} is not owned by the node", task);
        }
    }

    fn handle_remote(
        &mut self,
        cmd: RemoteCommand,
        now: Tick,
        hw: &mut impl NodeHardware,
        timers: &mut dyn TimerPort,
    ) {
        match cmd {
            // The requested value is not consulted: any set request pulses.
            RemoteCommand::StateSet {
                state: StateId::PowerModuleRelay,
                ..
            } => self.relay.trigger(now, hw, timers),
            RemoteCommand::StateSet { state, .. } => {
                debug!("state-set for {:?} not handled by this node", state);
            }
        }
    }

    fn channel_mut(&mut self, source: SensorSource) -> &mut SensorChannel {
        match source {
            SensorSource::Temperature => &mut self.temperature,
            SensorSource::Humidity => &mut self.humidity,
            SensorSource::LuxMeter => &mut self.lux_meter,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn channel(&self, source: SensorSource) -> &SensorChannel {
        match source {
            SensorSource::Temperature => &self.temperature,
            SensorSource::Humidity => &self.humidity,
            SensorSource::LuxMeter => &self.lux_meter,
        }
    }

    pub fn relay(&self) -> &PulseActuator {
        &self.relay
    }

    pub fn doors(&self) -> &BinaryStatePublisher {
        &self.doors
    }

    pub fn door_heartbeat_task(&self) -> TaskId {
        self.door_heartbeat_task
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler bridge
// ───────────────────────────────────────────────────────────────

/// Routes due tasks from the scheduler into the node.
///
/// Built for the duration of one `run_due` call:
///
/// ```ignore
/// sched.run_due(now, &mut TaskDispatch { node: &mut node, hw: &mut hw });
/// ```
pub struct TaskDispatch<'a, H: NodeHardware> {
    pub node: &'a mut GatewayNode,
    pub hw: &'a mut H,
}

impl<H: NodeHardware> SchedulerDelegate for TaskDispatch<'_, H> {
    fn on_task_due(&mut self, task: TaskId, now: Tick, timers: &mut dyn TimerPort) {
        self.node.on_task_due(task, now, &mut *self.hw, timers);
    }
}
