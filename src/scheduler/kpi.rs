//! Simulation quality metrics.
//!
//! Computed once from a finished (or halted) run: the timeline, the task
//! set, and the fault log.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Processor utilization | busy ticks / simulated ticks |
//! | Dispatches by task | ticks each task held the processor |
//! | Deadline misses | `DeadlineMiss` entries on the fault log |
//! | Task-set utilization | Σ burst / period (offered demand) |
//!
//! A task-set utilization above 1.0 exceeds what any uniprocessor policy
//! can serve, so such a run is expected to end in misses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimErrorKind};
use crate::models::{PeriodicTask, Timeline};
use crate::validation::total_utilization;

/// Post-run performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Simulated ticks.
    pub ticks: u64,
    /// Ticks in which some task ran.
    pub busy_ticks: u64,
    /// busy_ticks / ticks (0.0 for an empty run).
    pub processor_utilization: f64,
    /// Per-task dispatch counts (task name → ticks).
    pub dispatches_by_task: HashMap<String, u64>,
    /// Deadline misses on the fault log.
    pub deadline_misses: u64,
    /// Offered demand of the task set, Σ burst / period.
    pub taskset_utilization: f64,
}

impl SimulationKpi {
    /// Computes KPIs from a run's timeline, task set, and fault log.
    pub fn calculate(timeline: &Timeline, tasks: &[PeriodicTask], faults: &[SimError]) -> Self {
        let ticks = timeline.len() as u64;
        let busy_ticks = timeline.busy_ticks() as u64;

        let dispatches_by_task = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| (task.name().to_string(), timeline.run_count(i) as u64))
            .collect();

        let deadline_misses = faults
            .iter()
            .filter(|f| f.kind == SimErrorKind::DeadlineMiss)
            .count() as u64;

        let taskset_utilization = total_utilization(tasks);

        let processor_utilization = if ticks == 0 {
            0.0
        } else {
            busy_ticks as f64 / ticks as f64
        };

        Self {
            ticks,
            busy_ticks,
            processor_utilization,
            dispatches_by_task,
            deadline_misses,
            taskset_utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{RoundRobinScheduler, SchedulingPolicy};

    fn overloaded_set() -> Vec<PeriodicTask> {
        vec![
            PeriodicTask::new("t1", 0, 16, 13, 10).unwrap(),
            PeriodicTask::new("t2", 1, 16, 14, 4).unwrap(),
            PeriodicTask::new("t3", 0, 24, 24, 4).unwrap(),
            PeriodicTask::new("t4", 1, 30, 25, 3).unwrap(),
        ]
    }

    #[test]
    fn test_kpi_of_halted_round_robin_run() {
        let mut rr = RoundRobinScheduler::new(overloaded_set(), 5).unwrap();
        rr.run(180);

        let kpi = SimulationKpi::calculate(rr.timeline(), rr.tasks(), rr.faults());
        assert_eq!(kpi.ticks, 14);
        assert_eq!(kpi.busy_ticks, 14);
        assert!((kpi.processor_utilization - 1.0).abs() < 1e-10);
        assert_eq!(kpi.dispatches_by_task["t1"], 5);
        assert_eq!(kpi.dispatches_by_task["t2"], 4);
        assert_eq!(kpi.dispatches_by_task["t3"], 4);
        assert_eq!(kpi.dispatches_by_task["t4"], 1);
        assert_eq!(kpi.deadline_misses, 1);
    }

    #[test]
    fn test_overload_shows_in_taskset_utilization() {
        let kpi = SimulationKpi::calculate(
            &Timeline::new(["t1", "t2", "t3", "t4"]).unwrap(),
            &overloaded_set(),
            &[],
        );
        // 10/16 + 4/16 + 4/24 + 3/30 ≈ 1.14: infeasible on one processor.
        assert!(kpi.taskset_utilization > 1.0);
    }

    #[test]
    fn test_empty_run() {
        let timeline = Timeline::new(["a"]).unwrap();
        let tasks = vec![PeriodicTask::new("a", 0, 10, 10, 1).unwrap()];
        let kpi = SimulationKpi::calculate(&timeline, &tasks, &[]);
        assert_eq!(kpi.ticks, 0);
        assert_eq!(kpi.processor_utilization, 0.0);
        assert_eq!(kpi.dispatches_by_task["a"], 0);
    }
}
