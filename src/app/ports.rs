//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GatewayNode (domain)
//! ```
//!
//! Driven adapters (radio, relay line, door contacts, status LED, scheduler)
//! implement these traits. The [`GatewayNode`](super::service::GatewayNode)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Every call here is fire-and-forget from the core's point of view: no
//! port returns an error the core could act on.

use core::time::Duration;

use crate::error::SchedulerError;
use crate::tick::Tick;

use super::events::Publication;

// ───────────────────────────────────────────────────────────────
// Radio port (driven adapter: domain → air)
// ───────────────────────────────────────────────────────────────

/// Outbound radio link. No acknowledgement is observed by the caller.
pub trait RadioPort {
    fn publish(&mut self, publication: &Publication);
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The power-module relay line.
pub trait RelayPort {
    fn set_relay(&mut self, energised: bool);
}

/// Status LED used for user-visible indication.
pub trait IndicatorPort {
    /// Light the LED for `length`, starting at `now`.
    fn pulse(&mut self, now: Tick, length: Duration);
}

// ───────────────────────────────────────────────────────────────
// Input ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Debounced door contacts, addressed by label.
pub trait SwitchPort {
    /// Current debounced state; `true` = open.
    fn switch_state(&self, label: char) -> bool;
}

/// Monotonic time source.
pub trait ClockPort {
    fn now(&self) -> Tick;
}

// ───────────────────────────────────────────────────────────────
// Deferred tasks
// ───────────────────────────────────────────────────────────────

/// Handle to a deferred-task slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub(crate) u8);

impl TaskId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Single-shot deferred tasks.
///
/// A registered task starts unplanned. Planning a task that is already
/// planned moves its deadline; it never produces a second firing. A task
/// that fires is unplanned again until someone plans it.
pub trait TimerPort {
    fn register(&mut self, label: &'static str) -> Result<TaskId, SchedulerError>;

    fn plan_at(&mut self, task: TaskId, at: Tick);

    /// Shorthand for `plan_at(task, now + delay)`.
    fn plan_relative(&mut self, task: TaskId, now: Tick, delay: Duration) {
        self.plan_at(task, now + delay);
    }

    /// Deadline of a planned task, `None` while unplanned.
    fn deadline(&self, task: TaskId) -> Option<Tick>;
}

/// Callback trait the scheduler invokes when a task comes due.
///
/// The delegate receives the scheduler back as a [`TimerPort`] so a
/// periodic task can re-plan itself relative to the tick it ran at.
pub trait SchedulerDelegate {
    fn on_task_due(&mut self, task: TaskId, now: Tick, timers: &mut dyn TimerPort);
}
