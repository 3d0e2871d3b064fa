//! Execution timeline recorder.
//!
//! Passive consumer of dispatch events: each tick a scheduler reports
//! either "task `i` ran" or "idle", and the timeline keeps the record for
//! later inspection. Tasks are labeled with single printable characters so
//! a run renders as one row per task plus a tick ruler. The recorder
//! itself never prints; it only produces data and `String` rows.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::models::Tick;

/// Printable symbols assigned to tasks, in task-index order.
///
/// 94 characters (the printable ASCII range), which bounds the default
/// recorder capacity.
pub const SYMBOL_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz\
     !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Per-tick record of which task ran.
///
/// One slot per simulated tick: `Some(task_index)` or `None` for an idle
/// tick. The capacity limit is a labeling concern of this recorder, not a
/// property of the schedulers; it defaults to the full symbol alphabet and
/// can be lowered per instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    names: Vec<String>,
    symbols: Vec<char>,
    slots: Vec<Option<usize>>,
    capacity: usize,
}

impl Timeline {
    /// Creates a recorder for the given task names with the default
    /// capacity (the full symbol alphabet).
    pub fn new<I, S>(names: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_capacity(names, SYMBOL_ALPHABET.len())
    }

    /// Creates a recorder with an explicit capacity.
    ///
    /// The capacity is clamped to the symbol alphabet size, since every
    /// task needs a distinct printable label.
    ///
    /// # Errors
    /// `CapacityExceeded` if there are more names than the capacity allows.
    pub fn with_capacity<I, S>(names: I, capacity: usize) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let capacity = capacity.min(SYMBOL_ALPHABET.len());
        if names.len() > capacity {
            return Err(SimError::capacity_exceeded(names.len(), capacity));
        }
        let symbols: Vec<char> = SYMBOL_ALPHABET.chars().take(names.len()).collect();
        Ok(Self {
            names,
            symbols,
            slots: Vec::new(),
            capacity,
        })
    }

    /// Records that task `task` ran at `tick`.
    pub fn record_run(&mut self, tick: Tick, task: usize) {
        debug_assert_eq!(tick as usize, self.slots.len());
        debug_assert!(task < self.names.len());
        self.slots.push(Some(task));
    }

    /// Records an idle tick.
    pub fn record_idle(&mut self, tick: Tick) {
        debug_assert_eq!(tick as usize, self.slots.len());
        self.slots.push(None);
    }

    /// Index of the task dispatched at `tick`, if any ran.
    pub fn dispatched(&self, tick: Tick) -> Option<usize> {
        self.slots.get(tick as usize).copied().flatten()
    }

    /// Name of the task dispatched at `tick`, if any ran.
    pub fn dispatched_name(&self, tick: Tick) -> Option<&str> {
        self.dispatched(tick).map(|i| self.names[i].as_str())
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no ticks have been recorded.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of labeled tasks.
    pub fn task_count(&self) -> usize {
        self.names.len()
    }

    /// Recorder capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Symbol assigned to task `task`.
    pub fn symbol(&self, task: usize) -> char {
        self.symbols[task]
    }

    /// Name of task `task`.
    pub fn name(&self, task: usize) -> &str {
        &self.names[task]
    }

    /// How many ticks task `task` was dispatched.
    pub fn run_count(&self, task: usize) -> usize {
        self.slots.iter().filter(|&&s| s == Some(task)).count()
    }

    /// Ticks in which some task ran.
    pub fn busy_ticks(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Ticks in which the processor was idle.
    pub fn idle_ticks(&self) -> usize {
        self.len() - self.busy_ticks()
    }

    /// Row for one task: its symbol where it ran, `-` elsewhere.
    pub fn row(&self, task: usize) -> String {
        self.slots
            .iter()
            .map(|&s| if s == Some(task) { self.symbols[task] } else { '-' })
            .collect()
    }

    /// One character per tick: the dispatched task's symbol, or `.` when
    /// idle.
    pub fn dispatch_string(&self) -> String {
        self.slots
            .iter()
            .map(|&s| s.map_or('.', |i| self.symbols[i]))
            .collect()
    }

    /// Tick ruler: the final digit of each tick index.
    pub fn ruler(&self) -> String {
        (0..self.len())
            .map(|t| char::from_digit((t % 10) as u32, 10).unwrap_or('?'))
            .collect()
    }
}
