//! Scheduling policies and post-run metrics.
//!
//! Both policies drive the same per-tick cycle: update every task's state
//! machine with the current time, pick at most one ready task, execute one
//! unit of work on it, advance time by one. They differ only in how the
//! pick is made:
//!
//! - **`EdfScheduler`**: the ready task with the earliest absolute
//!   deadline, rotating round-robin among equal deadlines.
//! - **`RoundRobinScheduler`**: FIFO ready queue with a fixed quantum.
//!
//! Deadline misses and contract violations accumulate on the scheduler's
//! fault log; [`SchedulingPolicy::run`] stops at the end of the first tick
//! that logged a fault, while direct [`SchedulingPolicy::tick`] calls let a
//! driver keep collecting misses.
//!
//! # References
//!
//! - Liu & Layland (1973): EDF optimality on a uniprocessor
//! - Buttazzo (2011), "Hard Real-Time Computing Systems", Ch. 4

mod edf;
mod kpi;
mod round_robin;

pub use edf::EdfScheduler;
pub use kpi::SimulationKpi;
pub use round_robin::RoundRobinScheduler;

use crate::error::SimError;
use crate::models::{PeriodicTask, Tick, Timeline};

/// A scheduling policy driving one simulation run.
///
/// The policy owns its task set for the duration of the run; reuse across
/// runs goes through the concrete types' `into_tasks()` plus
/// [`PeriodicTask::reset`].
pub trait SchedulingPolicy {
    /// Policy name (e.g. "EDF").
    fn name(&self) -> &'static str;

    /// Executes one simulation tick: task updates, dispatch, one unit of
    /// execution (or idle), time advance.
    fn tick(&mut self);

    /// Current simulation time.
    fn time(&self) -> Tick;

    /// The task set, in construction order.
    fn tasks(&self) -> &[PeriodicTask];

    /// The per-tick dispatch record.
    fn timeline(&self) -> &Timeline;

    /// Faults recorded so far, in occurrence order.
    fn faults(&self) -> &[SimError];

    /// Advances the simulation by up to `n_ticks`, stopping at the end of
    /// the first tick that recorded any fault. Returns the fault log.
    fn run(&mut self, n_ticks: u64) -> &[SimError] {
        for _ in 0..n_ticks {
            self.tick();
            if !self.faults().is_empty() {
                break;
            }
        }
        self.faults()
    }
}
