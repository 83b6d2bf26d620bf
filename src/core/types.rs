/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// Process ID type
pub type Pid = u32;

/// Units of simulated execution
pub type WorkUnits = u64;

/// Simulated instruction pointer
pub type ProgramCounter = u64;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;

/// Maximum work units a process may execute per dispatch
///
/// Non-zero by construction, so a dispatch always makes progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    /// Returns `None` for a zero quantum
    #[inline]
    pub fn new(units: WorkUnits) -> Option<Self> {
        NonZeroU64::new(units).map(Self)
    }

    #[inline]
    pub fn get(self) -> WorkUnits {
        self.0.get()
    }

    /// Work executed by one dispatch of a process with `remaining` units left
    #[inline]
    pub fn clamp(self, remaining: WorkUnits) -> WorkUnits {
        remaining.min(self.get())
    }

    /// Number of dispatches needed to finish `work` units
    #[inline]
    pub fn slices_for(self, work: WorkUnits) -> u64 {
        work.div_ceil(self.get())
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One process as described by the input batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub work: WorkUnits,
}

impl ProcessSpec {
    pub fn new(pid: Pid, work: WorkUnits) -> Self {
        Self { pid, work }
    }
}

/// A validated batch: the quantum plus processes in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub quantum: Quantum,
    pub processes: Vec<ProcessSpec>,
}

impl Batch {
    pub fn new(quantum: Quantum, processes: Vec<ProcessSpec>) -> Self {
        Self { quantum, processes }
    }

    /// Total work across all processes, saturating at `WorkUnits::MAX`
    pub fn total_work(&self) -> WorkUnits {
        self.processes
            .iter()
            .fold(0, |acc: WorkUnits, p| acc.saturating_add(p.work))
    }

    /// Exact number of dispatches the batch needs to drain
    pub fn expected_dispatches(&self) -> u64 {
        self.processes
            .iter()
            .fold(0, |acc: u64, p| acc.saturating_add(self.quantum.slices_for(p.work)))
    }
}
