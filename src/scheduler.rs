//! Deferred-task table.
//!
//! Host-side implementation of the single-shot task primitive the node
//! core relies on. The scheduler notifies a [`SchedulerDelegate`] when a
//! task comes due; the delegate decides what the task means.
//!
//! ```text
//!   register("relay-off") ──▶ slot 0  due: -
//!   plan_at(slot 0, 1500)  ──▶ slot 0  due: 1500
//!   plan_at(slot 0, 2000)  ──▶ slot 0  due: 2000   (moved, not duplicated)
//!   run_due(2000)          ──▶ delegate.on_task_due(slot 0) ; due: -
//! ```
//!
//! A periodic task is a single-shot task whose handler plans itself again
//! relative to the tick it ran at.

use log::{debug, info, warn};

use crate::app::ports::{SchedulerDelegate, TaskId, TimerPort};
use crate::error::SchedulerError;
use crate::tick::Tick;

/// Maximum number of task slots (stack-allocated).
const MAX_TASKS: usize = 8;

/// Internal bookkeeping for one registered task.
#[derive(Debug, Clone, Copy)]
struct TaskSlot {
    label: &'static str,
    due: Option<Tick>,
}

/// The deferred-task engine.
pub struct Scheduler {
    slots: heapless::Vec<TaskSlot, MAX_TASKS>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
        }
    }

    /// Run every task whose deadline is at or before `now`, earliest first.
    ///
    /// Only tasks due when the call starts are considered; a task that is
    /// re-planned to `now` from inside a handler fires on the next call.
    /// Returns the number of tasks that fired.
    pub fn run_due(&mut self, now: Tick, delegate: &mut impl SchedulerDelegate) -> usize {
        let mut due: heapless::Vec<(Tick, u8), MAX_TASKS> = heapless::Vec::new();
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(at) = slot.due.filter(|at| *at <= now) {
                // Same capacity as `slots`.
                let _ = due.push((at, i as u8));
            }
        }
        due.sort_unstable();

        let mut fired = 0;
        for (at, index) in due {
            let slot = &mut self.slots[index as usize];
            // An earlier handler may have moved this task.
            if slot.due != Some(at) {
                continue;
            }
            slot.due = None;
            debug!("Scheduler: '{}' due at {} fired at {}", slot.label, at, now);
            delegate.on_task_due(TaskId(index), now, self);
            fired += 1;
        }
        fired
    }

    /// Earliest planned deadline, if any task is planned.
    pub fn next_deadline(&self) -> Option<Tick> {
        self.slots.iter().filter_map(|s| s.due).min()
    }

    /// Number of tasks currently planned.
    pub fn planned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.due.is_some()).count()
    }

    /// Label a task was registered with.
    pub fn label(&self, task: TaskId) -> Option<&'static str> {
        self.slots.get(task.index()).map(|s| s.label)
    }
}

impl TimerPort for Scheduler {
    fn register(&mut self, label: &'static str) -> Result<TaskId, SchedulerError> {
        let index = self.slots.len() as u8;
        self.slots
            .push(TaskSlot { label, due: None })
            .map_err(|_| SchedulerError::TableFull)?;
        info!("Scheduler: registered '{}' at slot {}", label, index);
        Ok(TaskId(index))
    }

    fn plan_at(&mut self, task: TaskId, at: Tick) {
        match self.slots.get_mut(task.index()) {
            Some(slot) => slot.due = Some(at),
            None => warn!("Scheduler: {}", SchedulerError::UnknownTask),
        }
    }

    fn deadline(&self, task: TaskId) -> Option<Tick> {
        self.slots.get(task.index()).and_then(|s| s.due)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
