//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full history
//! without touching real GPIO or a radio.

use std::collections::HashMap;
use std::time::Duration;

use garage::app::commands::NodeEvent;
use garage::app::door::door_topic;
use garage::app::events::{Publication, Quantity};
use garage::app::ports::{IndicatorPort, RadioPort, RelayPort, SwitchPort};
use garage::app::service::{GatewayNode, TaskDispatch};
use garage::config::NodeConfig;
use garage::scheduler::Scheduler;
use garage::tick::Tick;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Publish(Publication),
    SetRelay(bool),
    LedPulse { at: Tick, length: Duration },
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub doors: HashMap<char, bool>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publications(&self) -> Vec<Publication> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Publish(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    /// Values published on one numeric quantity, in order.
    pub fn numeric(&self, quantity: Quantity) -> Vec<f32> {
        self.publications()
            .into_iter()
            .filter_map(|p| match p {
                Publication::Numeric {
                    quantity: q, value, ..
                } if q == quantity => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Values published under one door's topic, in order.
    pub fn door(&self, label: char) -> Vec<bool> {
        let topic = door_topic(label);
        self.publications()
            .into_iter()
            .filter_map(|p| match p {
                Publication::Boolean { topic: t, value } if t == topic => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn relay_writes(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetRelay(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RadioPort for MockHardware {
    fn publish(&mut self, publication: &Publication) {
        self.calls.push(HwCall::Publish(publication.clone()));
    }
}

impl RelayPort for MockHardware {
    fn set_relay(&mut self, energised: bool) {
        self.calls.push(HwCall::SetRelay(energised));
    }
}

impl SwitchPort for MockHardware {
    fn switch_state(&self, label: char) -> bool {
        self.doors.get(&label).copied().unwrap_or(false)
    }
}

impl IndicatorPort for MockHardware {
    fn pulse(&mut self, now: Tick, length: Duration) {
        self.calls.push(HwCall::LedPulse { at: now, length });
    }
}

// ── Test bench ────────────────────────────────────────────────

/// Node, scheduler and mock hardware driven from a virtual clock.
pub struct Bench {
    pub node: GatewayNode,
    pub sched: Scheduler,
    pub hw: MockHardware,
    pub now: Tick,
}

#[allow(dead_code)]
impl Bench {
    /// Construct and start a node at tick zero.
    pub fn start(config: &NodeConfig) -> Self {
        let mut sched = Scheduler::new();
        let mut node = GatewayNode::new(config, &mut sched).expect("valid config");
        let mut hw = MockHardware::new();
        node.start(Tick::ZERO, &mut hw, &mut sched);
        let mut bench = Self {
            node,
            sched,
            hw,
            now: Tick::ZERO,
        };
        bench.run_due();
        bench
    }

    pub fn run_due(&mut self) -> usize {
        self.sched.run_due(
            self.now,
            &mut TaskDispatch {
                node: &mut self.node,
                hw: &mut self.hw,
            },
        )
    }

    /// Move the clock to `ms` and fire whatever came due.
    pub fn advance_to(&mut self, ms: u64) {
        self.now = Tick::from_millis(ms);
        self.run_due();
    }

    pub fn handle(&mut self, event: NodeEvent) {
        self.node
            .handle(event, self.now, &mut self.hw, &mut self.sched);
    }

    /// Deliver `event` at `ms`, firing due tasks first.
    pub fn handle_at(&mut self, ms: u64, event: NodeEvent) {
        self.advance_to(ms);
        self.handle(event);
    }
}
