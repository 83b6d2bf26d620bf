/*!
 * Process Types
 * Common types for process management
 */

use crate::core::limits::INITIAL_PROGRAM_COUNTER;
use crate::core::types::{Pid, ProgramCounter, Quantum, WorkUnits};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Process not found: {0}")]
    NotFound(Pid),

    #[error("Handle {0} does not belong to this registry")]
    StaleHandle(usize),

    #[error("Process {0} already exists")]
    DuplicateId(Pid),

    #[error("Invalid work for process {pid}: {work} (must be at least 1)")]
    InvalidWork { pid: Pid, work: WorkUnits },

    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },

    #[error("Process {pid} cannot be retired while {state}")]
    NotRetirable { pid: Pid, state: ProcessState },
}

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created but not yet admitted
    New,
    /// Waiting in the ready queue
    Ready,
    /// Holding the CPU
    Running,
    /// Finished all work; terminal
    Terminated,
}

impl ProcessState {
    /// Whether the state machine has an edge from `self` to `next`
    pub fn can_transition_to(self, next: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, next),
            (New, Ready) | (Ready, Running) | (Running, Ready) | (Running, Terminated)
        )
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == ProcessState::Terminated
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessState::New => write!(f, "New"),
            ProcessState::Ready => write!(f, "Ready"),
            ProcessState::Running => write!(f, "Running"),
            ProcessState::Terminated => write!(f, "Terminated"),
        }
    }
}

/// Process Control Block
///
/// Mutated only through the registry and the scheduler; callers outside the
/// crate get read access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessControlBlock {
    pid: Pid,
    program_counter: ProgramCounter,
    state: ProcessState,
    remaining_work: WorkUnits,
    total_work: WorkUnits,
    dispatches: u64,
}

impl ProcessControlBlock {
    pub(crate) fn new(pid: Pid, work: WorkUnits) -> Self {
        Self {
            pid,
            program_counter: INITIAL_PROGRAM_COUNTER,
            state: ProcessState::New,
            remaining_work: work,
            total_work: work,
            dispatches: 0,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn program_counter(&self) -> ProgramCounter {
        self.program_counter
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline]
    pub fn remaining_work(&self) -> WorkUnits {
        self.remaining_work
    }

    #[inline]
    pub fn total_work(&self) -> WorkUnits {
        self.total_work
    }

    /// Number of times this process has been dispatched
    #[inline]
    pub fn dispatches(&self) -> u64 {
        self.dispatches
    }

    /// Move to `to`, refusing edges the state machine does not have
    pub(crate) fn transition(&mut self, to: ProcessState) -> ProcessResult<()> {
        super::validation::validate_transition(self.pid, self.state, to)?;
        if to == ProcessState::Running {
            self.dispatches += 1;
        }
        self.state = to;
        Ok(())
    }

    /// Run for up to one quantum and return the units executed
    ///
    /// Only valid while `Running`.
    pub(crate) fn execute(&mut self, quantum: Quantum) -> ProcessResult<WorkUnits> {
        if self.state != ProcessState::Running {
            return Err(ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to: ProcessState::Running,
            });
        }

        let work_done = quantum.clamp(self.remaining_work);
        self.remaining_work -= work_done;
        self.program_counter = self.program_counter.saturating_add(work_done);
        Ok(work_done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantum(units: u64) -> Quantum {
        Quantum::new(units).unwrap()
    }

    #[test]
    fn test_new_process_defaults() {
        let pcb = ProcessControlBlock::new(4, 10);
        assert_eq!(pcb.pid(), 4);
        assert_eq!(pcb.program_counter(), 1);
        assert_eq!(pcb.state(), ProcessState::New);
        assert_eq!(pcb.remaining_work(), 10);
        assert_eq!(pcb.dispatches(), 0);
    }

    #[test]
    fn test_legal_lifecycle() {
        let mut pcb = ProcessControlBlock::new(1, 4);
        pcb.transition(ProcessState::Ready).unwrap();
        pcb.transition(ProcessState::Running).unwrap();
        assert_eq!(pcb.execute(quantum(3)).unwrap(), 3);
        pcb.transition(ProcessState::Ready).unwrap();
        pcb.transition(ProcessState::Running).unwrap();
        assert_eq!(pcb.execute(quantum(3)).unwrap(), 1);
        pcb.transition(ProcessState::Terminated).unwrap();

        assert_eq!(pcb.remaining_work(), 0);
        assert_eq!(pcb.program_counter(), 5);
        assert_eq!(pcb.dispatches(), 2);
    }

    #[test]
    fn test_terminated_is_terminal() {
        let mut pcb = ProcessControlBlock::new(1, 1);
        pcb.transition(ProcessState::Ready).unwrap();
        pcb.transition(ProcessState::Running).unwrap();
        pcb.transition(ProcessState::Terminated).unwrap();

        for next in [
            ProcessState::New,
            ProcessState::Ready,
            ProcessState::Running,
            ProcessState::Terminated,
        ] {
            assert_eq!(
                pcb.transition(next),
                Err(ProcessError::InvalidStateTransition {
                    pid: 1,
                    from: ProcessState::Terminated,
                    to: next,
                })
            );
        }
    }

    #[test]
    fn test_execute_requires_running() {
        let mut pcb = ProcessControlBlock::new(2, 5);
        pcb.transition(ProcessState::Ready).unwrap();
        assert!(pcb.execute(quantum(2)).is_err());
        assert_eq!(pcb.remaining_work(), 5);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ProcessState::Ready.to_string(), "Ready");
        assert_eq!(ProcessState::Terminated.to_string(), "Terminated");
    }
}
