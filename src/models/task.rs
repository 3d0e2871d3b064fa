//! Periodic task state machine.
//!
//! A task is released every `period` ticks starting at `start_time`, owes
//! `burst_time` ticks of execution per instance, and must finish within
//! `relative_deadline` ticks of each release. The static parameters are
//! fixed at construction; the run-time counters advance through `update`
//! (once per tick, before any dispatch decision) and `execute` (one unit
//! of work).
//!
//! # Reference
//! Liu & Layland (1973), the periodic task model: (offset, period,
//! deadline, WCET) per task.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::models::Tick;

/// Run-time status of a task instance.
///
/// A freshly constructed task reports `Finished` until its first release
/// arms it; `Failed` marks a missed deadline and sticks until the next
/// release boundary re-arms the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Released and still owing execution time.
    Ready,
    /// Completed the current instance (or not yet released).
    Finished,
    /// Missed the current instance's deadline.
    Failed,
}

/// A periodic, deadline-constrained task.
///
/// Static parameters are immutable after construction, so [`reset`]
/// can always restore the pristine state for reuse across independent
/// simulation runs (e.g. running EDF and then round-robin over the same
/// task set).
///
/// [`reset`]: PeriodicTask::reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodicTask {
    name: String,
    start_time: Tick,
    period: Tick,
    relative_deadline: Tick,
    burst_time: Tick,

    executed_time: Tick,
    current_period_begin: Tick,
    current_deadline: Tick,
    started: bool,
    status: TaskStatus,
}

impl PeriodicTask {
    /// Creates a task.
    ///
    /// # Errors
    /// `InvalidTaskParameters` if `name` is empty, `period` or `burst_time`
    /// is zero, or `relative_deadline` falls after the second release
    /// (`start_time + period`).
    pub fn new(
        name: impl Into<String>,
        start_time: Tick,
        period: Tick,
        relative_deadline: Tick,
        burst_time: Tick,
    ) -> Result<Self, SimError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SimError::invalid_parameters("task name must not be empty"));
        }
        if period == 0 {
            return Err(SimError::invalid_parameters(format!(
                "task \"{name}\": period must be positive"
            )));
        }
        if burst_time == 0 {
            return Err(SimError::invalid_parameters(format!(
                "task \"{name}\": burst time must be positive"
            )));
        }
        if relative_deadline > start_time + period {
            return Err(SimError::invalid_parameters(format!(
                "task \"{name}\": relative deadline {relative_deadline} falls after the second release at tick {}",
                start_time + period
            )));
        }

        Ok(Self {
            executed_time: 0,
            current_period_begin: start_time,
            current_deadline: start_time + relative_deadline,
            started: false,
            status: TaskStatus::Finished,
            name,
            start_time,
            period,
            relative_deadline,
            burst_time,
        })
    }

    /// Advances the task to `time`. Called once per tick, before any
    /// dispatch decision for that tick.
    ///
    /// Arms the task at its first release, raises a deadline-miss fault
    /// when the instance's relative deadline elapses unfinished, and
    /// re-arms the next instance at every period boundary. The miss check
    /// runs before the boundary check, so a task whose deadline coincides
    /// with a period boundary both fails and re-arms in the same call: the
    /// fault is returned for the missed instance while the next instance
    /// starts fresh.
    ///
    /// # Errors
    /// `DeadlineMiss` when the current instance just ran out of time. The
    /// task remains usable; the caller logs the fault and continues.
    pub fn update(&mut self, time: Tick) -> Result<(), SimError> {
        if time >= self.start_time && !self.started {
            self.status = TaskStatus::Ready;
            self.started = true;
        }

        if self.started && time >= self.start_time {
            let elapsed = time - self.current_period_begin;

            let miss = if elapsed == self.relative_deadline && self.status != TaskStatus::Finished {
                self.status = TaskStatus::Failed;
                Some(SimError::deadline_miss(&self.name, time))
            } else {
                None
            };

            if elapsed % self.period == 0 {
                self.executed_time = 0;
                self.current_period_begin = time;
                self.current_deadline = time + self.relative_deadline;
                self.status = TaskStatus::Ready;
            }

            if let Some(fault) = miss {
                return Err(fault);
            }
        }

        Ok(())
    }

    /// Consumes one unit of execution at `time`.
    ///
    /// Misses are also detected lazily here, independent of [`update`]:
    /// executing past the current absolute deadline fails the task.
    /// Execution past `burst_time` is a no-op, so `executed_time` never
    /// exceeds the burst.
    ///
    /// # Errors
    /// `DeadlineMiss` if the task is (or just became) `Failed`;
    /// `ExecutionBeforeRelease` if `time < start_time`, which indicates a
    /// scheduler defect rather than a timing fault.
    ///
    /// [`update`]: PeriodicTask::update
    pub fn execute(&mut self, time: Tick) -> Result<(), SimError> {
        if self.current_deadline < time && self.status != TaskStatus::Finished {
            self.status = TaskStatus::Failed;
        }
        if self.status == TaskStatus::Failed {
            return Err(SimError::deadline_miss(&self.name, time));
        }
        if time < self.start_time {
            return Err(SimError::execution_before_release(
                &self.name,
                self.start_time,
                time,
            ));
        }

        if self.executed_time < self.burst_time {
            self.executed_time += 1;
            if self.executed_time == self.burst_time {
                self.status = TaskStatus::Finished;
            }
        }
        Ok(())
    }

    /// Restores the pristine post-construction state.
    pub fn reset(&mut self) {
        self.executed_time = 0;
        self.current_period_begin = self.start_time;
        self.current_deadline = self.start_time + self.relative_deadline;
        self.started = false;
        self.status = TaskStatus::Finished;
    }

    /// Task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tick of the first release.
    pub fn start_time(&self) -> Tick {
        self.start_time
    }

    /// Ticks between successive releases.
    pub fn period(&self) -> Tick {
        self.period
    }

    /// Ticks after a release by which the instance must complete.
    pub fn relative_deadline(&self) -> Tick {
        self.relative_deadline
    }

    /// Execution ticks one instance requires.
    pub fn burst_time(&self) -> Tick {
        self.burst_time
    }

    /// Absolute deadline of the active instance.
    pub fn current_deadline(&self) -> Tick {
        self.current_deadline
    }

    /// Ticks completed in the current instance.
    pub fn executed_time(&self) -> Tick {
        self.executed_time
    }

    /// Whether the first release has occurred.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Current status.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Whether the task is ready to run.
    pub fn is_ready(&self) -> bool {
        self.status == TaskStatus::Ready
    }

    /// Long-run processor demand, `burst_time / period`.
    pub fn utilization(&self) -> f64 {
        self.burst_time as f64 / self.period as f64
    }
}
