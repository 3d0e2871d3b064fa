//! Discrete-time simulation of preemptive real-time scheduling.
//!
//! Models a set of periodic, deadline-constrained tasks competing for a
//! single processor, one execution unit per tick. Scheduling policies
//! (EDF and quantum round-robin) decide which ready task runs; deadline
//! misses are detected and accumulated as fault records, and every tick
//! is logged to a timeline that a reporting layer can render.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `PeriodicTask`, `TaskStatus`, `Timeline`
//! - **`scheduler`**: The `SchedulingPolicy` trait, `EdfScheduler`,
//!   `RoundRobinScheduler`, and post-run `SimulationKpi`
//! - **`validation`**: Task-set integrity checks (duplicate names, demand)
//! - **`error`**: Fault and validation error types
//!
//! # Time Model
//!
//! Time is a bare `u64` tick counter with no wall-clock coupling. Each
//! `tick()` is a synchronous state transition: update every task, dispatch
//! at most one, execute one unit, advance time by one.
//!
//! # References
//!
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in
//!   a Hard-Real-Time Environment"
//! - Buttazzo (2011), "Hard Real-Time Computing Systems"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
