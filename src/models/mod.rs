//! Simulation domain models.
//!
//! Provides the core data types of the simulation: the periodic task state
//! machine and the passive timeline recorder. Scheduling policies live in
//! [`crate::scheduler`] and only touch these types through their public
//! operations.

mod task;
mod timeline;

pub use task::{PeriodicTask, TaskStatus};
pub use timeline::{Timeline, SYMBOL_ALPHABET};

/// Discrete simulation time, in ticks.
///
/// The simulation advances in unit steps; there is no sub-unit preemption
/// and no wall-clock coupling.
pub type Tick = u64;
