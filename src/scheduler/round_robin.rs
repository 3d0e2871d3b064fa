//! Quantum-based round-robin scheduler.
//!
//! # Algorithm
//!
//! A FIFO ready queue over task indices. Each tick, tasks that just became
//! ready are appended; the head task runs one unit and spends one tick of
//! quantum. After the tick, a finished head is removed (resetting the
//! quantum), otherwise an exhausted quantum rotates the head to the tail.
//! Finish-removal takes precedence over rotation, so a task never rotates
//! in the same tick it completes.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::error::SimError;
use crate::models::{PeriodicTask, TaskStatus, Tick, Timeline, SYMBOL_ALPHABET};
use crate::scheduler::SchedulingPolicy;
use crate::validation::validate_task_set;

/// Round-robin over a fixed task set with a configurable quantum.
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    tasks: Vec<PeriodicTask>,
    quantum: u64,
    remaining_quantum: u64,
    queue: VecDeque<usize>,
    time: Tick,
    timeline: Timeline,
    faults: Vec<SimError>,
}

impl RoundRobinScheduler {
    /// Creates a round-robin scheduler with the default recorder capacity.
    ///
    /// # Errors
    /// `InvalidQuantum` for a zero quantum, the first task-set validation
    /// error (duplicate names), or `CapacityExceeded` from the recorder.
    pub fn new(tasks: Vec<PeriodicTask>, quantum: u64) -> Result<Self, SimError> {
        Self::with_recorder_capacity(tasks, quantum, SYMBOL_ALPHABET.len())
    }

    /// Creates a round-robin scheduler with an explicit recorder capacity.
    pub fn with_recorder_capacity(
        tasks: Vec<PeriodicTask>,
        quantum: u64,
        capacity: usize,
    ) -> Result<Self, SimError> {
        if quantum == 0 {
            return Err(SimError::invalid_quantum());
        }
        if let Err(mut errors) = validate_task_set(&tasks) {
            return Err(errors.remove(0));
        }
        let timeline = Timeline::with_capacity(tasks.iter().map(|t| t.name()), capacity)?;
        Ok(Self {
            tasks,
            quantum,
            remaining_quantum: quantum,
            queue: VecDeque::new(),
            time: 0,
            timeline,
            faults: Vec::new(),
        })
    }

    /// Configured quantum.
    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    /// Queue of ready task indices, head first.
    pub fn queue(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    /// Releases the task set, e.g. to reset and rerun under another policy.
    pub fn into_tasks(self) -> Vec<PeriodicTask> {
        self.tasks
    }
}

impl SchedulingPolicy for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn tick(&mut self) {
        // Snapshot readiness to spot ready transitions caused by update.
        let was_ready: Vec<bool> = self.tasks.iter().map(|t| t.is_ready()).collect();
        for i in 0..self.tasks.len() {
            if let Err(fault) = self.tasks[i].update(self.time) {
                warn!("{fault}");
                self.faults.push(fault);
            }
            if self.tasks[i].is_ready() && !was_ready[i] && !self.queue.contains(&i) {
                self.queue.push_back(i);
            }
        }

        if let Some(&head) = self.queue.front() {
            trace!(tick = self.time, task = %self.tasks[head].name(), "dispatch");
            if let Err(fault) = self.tasks[head].execute(self.time) {
                warn!("{fault}");
                self.faults.push(fault);
            }
            self.timeline.record_run(self.time, head);
            self.remaining_quantum -= 1;
        } else {
            self.timeline.record_idle(self.time);
        }

        self.time += 1;

        if let Some(&head) = self.queue.front() {
            if self.tasks[head].status() == TaskStatus::Finished {
                self.queue.pop_front();
                self.remaining_quantum = self.quantum;
            } else if self.remaining_quantum == 0 {
                self.queue.rotate_left(1);
                self.remaining_quantum = self.quantum;
            }
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimErrorKind;
    use crate::scheduler::EdfScheduler;

    fn make_task(name: &str, start: Tick, period: Tick, deadline: Tick, burst: Tick) -> PeriodicTask {
        PeriodicTask::new(name, start, period, deadline, burst).unwrap()
    }

    fn overloaded_set() -> Vec<PeriodicTask> {
        vec![
            make_task("t1", 0, 16, 13, 10),
            make_task("t2", 1, 16, 14, 4),
            make_task("t3", 0, 24, 24, 4),
            make_task("t4", 1, 30, 25, 3),
        ]
    }

    #[test]
    fn test_rejects_zero_quantum() {
        let err = RoundRobinScheduler::new(overloaded_set(), 0).unwrap_err();
        assert_eq!(err.kind, SimErrorKind::InvalidQuantum);
    }

    #[test]
    fn test_overloaded_set_misses_at_tick_13() {
        let mut rr = RoundRobinScheduler::new(overloaded_set(), 5).unwrap();
        let faults = rr.run(180);

        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].kind, SimErrorKind::DeadlineMiss);
        assert_eq!(faults[0].task.as_deref(), Some("t1"));
        assert_eq!(faults[0].tick, Some(13));

        assert_eq!(rr.time(), 14);
        assert_eq!(rr.timeline().dispatch_string(), "00000222211113");
        assert_eq!(rr.timeline().row(0), "00000---------");
        assert_eq!(rr.timeline().row(2), "-----2222-----");
    }

    #[test]
    fn test_finish_removal_beats_quantum_rotation() {
        // A's burst equals the quantum: it must be dequeued as finished,
        // not rotated, so B follows immediately and the queue drains.
        let tasks = vec![
            make_task("A", 0, 20, 20, 5),
            make_task("B", 0, 20, 20, 3),
        ];
        let mut rr = RoundRobinScheduler::new(tasks, 5).unwrap();
        rr.run(20);
        assert_eq!(rr.timeline().dispatch_string(), "00000111............");
        assert!(rr.faults().is_empty());
        assert_eq!(rr.queue().count(), 0);
    }

    #[test]
    fn test_staggered_releases_interleave_with_idle() {
        let tasks = vec![
            make_task("A", 0, 8, 8, 2),
            make_task("B", 3, 8, 8, 2),
        ];
        let mut rr = RoundRobinScheduler::new(tasks, 3).unwrap();
        rr.run(16);
        assert_eq!(rr.timeline().dispatch_string(), "00.11...00.11...");
        assert!(rr.faults().is_empty());
    }

    #[test]
    fn test_head_runs_exclusively_until_quantum_or_finish() {
        let tasks = vec![
            make_task("A", 0, 30, 30, 7),
            make_task("B", 0, 30, 30, 7),
        ];
        let mut rr = RoundRobinScheduler::new(tasks, 3).unwrap();
        rr.run(14);
        // Alternating full quanta of 3, then the 7th unit of each burst.
        assert_eq!(rr.timeline().dispatch_string(), "00011100011101");
    }

    #[test]
    fn test_ticking_past_faults_does_not_duplicate_queue_entries() {
        // B cannot fit its burst before its deadline; A misses later when B
        // hogs the processor. Tick manually to keep going past the faults.
        let tasks = vec![
            make_task("A", 0, 6, 6, 4),
            make_task("B", 0, 6, 5, 4),
        ];
        let mut rr = RoundRobinScheduler::new(tasks, 2).unwrap();
        for _ in 0..13 {
            rr.tick();
        }
        assert_eq!(rr.timeline().dispatch_string(), "0011001100110");

        let context: Vec<(Option<&str>, Option<Tick>)> = rr
            .faults()
            .iter()
            .map(|f| (f.task.as_deref(), f.tick))
            .collect();
        assert_eq!(
            context,
            [
                (Some("B"), Some(5)),
                (Some("B"), Some(11)),
                (Some("B"), Some(11)),
                (Some("A"), Some(12)),
            ]
        );
        // Both tasks re-armed while still queued; neither was re-enqueued.
        assert_eq!(rr.queue().collect::<Vec<_>>(), [0, 1]);
        assert!(rr.tasks().iter().all(|t| t.is_ready()));
    }

    #[test]
    fn test_task_set_reuse_across_policies() {
        let mut edf = EdfScheduler::new(overloaded_set()).unwrap();
        edf.run(180);
        let edf_trace = edf.timeline().dispatch_string();

        let mut tasks = edf.into_tasks();
        for task in &mut tasks {
            task.reset();
        }
        let mut rr = RoundRobinScheduler::new(tasks, 5).unwrap();
        rr.run(180);

        assert_eq!(edf_trace, "000000000011112222333000000001");
        assert_eq!(rr.timeline().dispatch_string(), "00000222211113");
        assert_ne!(edf_trace, rr.timeline().dispatch_string());
    }
}
