//! Fault and validation error types.
//!
//! Deadline misses are expected, recoverable domain events: schedulers
//! collect them into an ordered fault log instead of aborting, so a single
//! run can capture several independent misses. Construction-time problems
//! (bad task parameters, recorder capacity) use the same type but are
//! returned eagerly and stop the simulation from being built.

use serde::{Deserialize, Serialize};

use crate::models::Tick;

/// Categories of simulation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimErrorKind {
    /// Construction-time task validation failure.
    InvalidTaskParameters,
    /// Round-robin quantum is not a positive integer.
    InvalidQuantum,
    /// A task reached its deadline before finishing, or was executed past it.
    DeadlineMiss,
    /// `execute` was called before the task's first release.
    ExecutionBeforeRelease,
    /// More tasks than the timeline recorder can label.
    CapacityExceeded,
}

/// A simulation error or fault record.
///
/// Carries the task name and tick where they apply (faults raised during a
/// run) alongside a human-readable description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimError {
    /// Error category.
    pub kind: SimErrorKind,
    /// Name of the task involved, if any.
    pub task: Option<String>,
    /// Tick at which the fault occurred, for run-time faults.
    pub tick: Option<Tick>,
    /// Human-readable description.
    pub message: String,
}

impl SimError {
    fn new(kind: SimErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            task: None,
            tick: None,
            message: message.into(),
        }
    }

    /// Construction-time task validation failure.
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::new(SimErrorKind::InvalidTaskParameters, message)
    }

    /// Rejected round-robin quantum.
    pub fn invalid_quantum() -> Self {
        Self::new(
            SimErrorKind::InvalidQuantum,
            "round-robin quantum must be positive",
        )
    }

    /// Deadline-miss fault for `task` at `tick`.
    pub fn deadline_miss(task: impl Into<String>, tick: Tick) -> Self {
        let task = task.into();
        let mut err = Self::new(
            SimErrorKind::DeadlineMiss,
            format!("task \"{task}\" missed its deadline at tick {tick}"),
        );
        err.task = Some(task);
        err.tick = Some(tick);
        err
    }

    /// Execution requested at `tick`, before the task's release at `start_time`.
    pub fn execution_before_release(task: impl Into<String>, start_time: Tick, tick: Tick) -> Self {
        let task = task.into();
        let mut err = Self::new(
            SimErrorKind::ExecutionBeforeRelease,
            format!("task \"{task}\" executed at tick {tick} before its release at tick {start_time}"),
        );
        err.task = Some(task);
        err.tick = Some(tick);
        err
    }

    /// Task count exceeds the timeline recorder capacity.
    pub fn capacity_exceeded(supplied: usize, capacity: usize) -> Self {
        Self::new(
            SimErrorKind::CapacityExceeded,
            format!("{supplied} tasks exceed the recorder capacity of {capacity}"),
        )
    }
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SimError {}
