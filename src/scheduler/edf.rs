//! Earliest-Deadline-First scheduler.
//!
//! # Algorithm
//!
//! Each tick, after updating every task, a single left-to-right pass over
//! the task list builds the set of ready tasks sharing the minimal current
//! deadline. A strictly earlier deadline replaces the set; an equal
//! deadline joins it and enables tie-mode, where dispatch rotates through
//! the set via a counter that persists across ticks. Without a tie the
//! front of the set runs; with no ready task the tick is idle.
//!
//! EDF always runs the nearest-deadline ready task, which is optimal for
//! uniprocessor feasibility; the tie rotation only makes equal-deadline
//! dispatch deterministic instead of starving one of the tied tasks.
//!
//! # Reference
//! Liu & Layland (1973), Theorem 7: EDF uniprocessor optimality.

use tracing::{trace, warn};

use crate::error::SimError;
use crate::models::{PeriodicTask, Tick, Timeline, SYMBOL_ALPHABET};
use crate::scheduler::SchedulingPolicy;
use crate::validation::validate_task_set;

/// Earliest-Deadline-First over a fixed task set.
#[derive(Debug, Clone)]
pub struct EdfScheduler {
    tasks: Vec<PeriodicTask>,
    time: Tick,
    tie_mode: bool,
    rotation: usize,
    timeline: Timeline,
    faults: Vec<SimError>,
}

impl EdfScheduler {
    /// Creates an EDF scheduler with the default recorder capacity.
    ///
    /// # Errors
    /// The first task-set validation error (duplicate names), or
    /// `CapacityExceeded` from the timeline recorder.
    pub fn new(tasks: Vec<PeriodicTask>) -> Result<Self, SimError> {
        Self::with_recorder_capacity(tasks, SYMBOL_ALPHABET.len())
    }

    /// Creates an EDF scheduler with an explicit recorder capacity.
    pub fn with_recorder_capacity(
        tasks: Vec<PeriodicTask>,
        capacity: usize,
    ) -> Result<Self, SimError> {
        if let Err(mut errors) = validate_task_set(&tasks) {
            return Err(errors.remove(0));
        }
        let timeline = Timeline::with_capacity(tasks.iter().map(|t| t.name()), capacity)?;
        Ok(Self {
            tasks,
            time: 0,
            tie_mode: false,
            rotation: 0,
            timeline,
            faults: Vec::new(),
        })
    }

    /// Releases the task set, e.g. to reset and rerun under another policy.
    pub fn into_tasks(self) -> Vec<PeriodicTask> {
        self.tasks
    }

    /// Builds the minimal-deadline candidate set in one left-to-right pass,
    /// updating the persistent tie-mode flag.
    fn build_candidates(&mut self) -> Vec<usize> {
        let mut candidates: Vec<usize> = Vec::new();
        if let Some(first) = self.tasks.iter().position(|t| t.is_ready()) {
            candidates.push(first);
            for (i, task) in self.tasks.iter().enumerate() {
                if !task.is_ready() {
                    continue;
                }
                let leader = self.tasks[candidates[0]].current_deadline();
                if task.current_deadline() < leader {
                    self.tie_mode = false;
                    candidates.clear();
                    candidates.push(i);
                } else if task.current_deadline() == leader {
                    // The seed task re-matches itself here, so in tie-mode
                    // the leader occupies two rotation slots.
                    candidates.push(i);
                    self.tie_mode = true;
                }
            }
        }
        candidates
    }
}

impl SchedulingPolicy for EdfScheduler {
    fn name(&self) -> &'static str {
        "EDF"
    }

    fn tick(&mut self) {
        for task in &mut self.tasks {
            if let Err(fault) = task.update(self.time) {
                warn!("{fault}");
                self.faults.push(fault);
            }
        }

        let candidates = self.build_candidates();
        if candidates.is_empty() {
            self.timeline.record_idle(self.time);
        } else {
            let chosen = if self.tie_mode {
                // The tie set can shrink between ticks; wrap a stale
                // counter back to the front before using it.
                if self.rotation >= candidates.len() {
                    self.rotation = 0;
                }
                let chosen = candidates[self.rotation];
                self.rotation += 1;
                if self.rotation == candidates.len() {
                    self.rotation = 0;
                }
                chosen
            } else {
                candidates[0]
            };

            trace!(tick = self.time, task = %self.tasks[chosen].name(), "dispatch");
            if let Err(fault) = self.tasks[chosen].execute(self.time) {
                warn!("{fault}");
                self.faults.push(fault);
            }
            self.timeline.record_run(self.time, chosen);
        }

        self.time += 1;
    }

    fn time(&self) -> Tick {
        self.time
    }

    fn tasks(&self) -> &[PeriodicTask] {
        &self.tasks
    }

    fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn faults(&self) -> &[SimError] {
        &self.faults
    }
}
