/*!
 * Round-Robin Dispatcher
 * Ready queue ownership, quantum accounting and per-dispatch transitions
 */

use super::events::{Event, EventSink};
use super::stats::SchedulerStats;
use super::status;
use crate::core::types::{Pid, ProgramCounter, Quantum, WorkUnits};
use crate::process::{Handle, ProcessResult, ProcessState, ProcessTable};
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

/// Where a process went when it gave up the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// Quantum expired with work left; re-enqueued at the tail
    Requeued,
    /// Work reached zero
    Terminated,
}

/// Result of one dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    pub pid: Pid,
    pub work_done: WorkUnits,
    pub remaining_work: WorkUnits,
    pub program_counter: ProgramCounter,
    pub outcome: DispatchOutcome,
}

/// Round-robin scheduler for a single simulated core
///
/// A handle is either in `ready_queue` or in `running`, never both.
#[derive(Debug)]
pub struct RoundRobin {
    quantum: Quantum,
    ready_queue: VecDeque<Handle>,
    running: Option<Handle>,
    stats: SchedulerStats,
}

impl RoundRobin {
    pub fn new(quantum: Quantum) -> Self {
        Self {
            quantum,
            ready_queue: VecDeque::new(),
            running: None,
            stats: SchedulerStats::new(quantum),
        }
    }

    #[inline]
    pub fn quantum(&self) -> Quantum {
        self.quantum
    }

    /// Handles waiting for the CPU, head first
    pub fn ready_queue(&self) -> impl Iterator<Item = Handle> + '_ {
        self.ready_queue.iter().copied()
    }

    #[inline]
    pub fn ready_len(&self) -> usize {
        self.ready_queue.len()
    }

    /// Handle holding the CPU; only `Some` in the middle of a dispatch
    #[inline]
    pub fn running(&self) -> Option<Handle> {
        self.running
    }

    /// True once the ready queue has drained
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.ready_queue.is_empty() && self.running.is_none()
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Admit every `New` record in the registry to the ready queue
    pub fn admit(&mut self, table: &mut ProcessTable) -> ProcessResult<usize> {
        table.admit_all(&mut self.ready_queue)
    }

    /// Run one dispatch cycle
    ///
    /// Dequeues the head process, reports the active set while it is
    /// running, executes up to one quantum and then either re-enqueues it at
    /// the tail or terminates it. Returns `None` when the queue is empty.
    pub fn dispatch_next<S: EventSink>(
        &mut self,
        table: &mut ProcessTable,
        sink: &mut S,
    ) -> ProcessResult<Option<Dispatch>> {
        let Some(handle) = self.ready_queue.pop_front() else {
            return Ok(None);
        };

        let pcb = table.get_mut(handle)?;
        pcb.transition(ProcessState::Running)?;
        let pid = pcb.pid();
        self.running = Some(handle);

        debug!(
            "Dispatching process {} ({} units remaining, quantum {})",
            pid,
            pcb.remaining_work(),
            self.quantum
        );
        sink.emit(Event::KernelLoading { pid });
        sink.emit(Event::Boundary);

        // The running record is never retired here; only records already
        // Terminated before this dispatch are.
        status::report(table, sink)?;

        let pcb = table.get_mut(handle)?;
        let work_done = pcb.execute(self.quantum)?;
        let remaining_work = pcb.remaining_work();
        let program_counter = pcb.program_counter();

        sink.emit(Event::KernelSaving {
            pid,
            work_done,
            remaining_work,
            program_counter,
        });
        self.stats.record_dispatch(pid, work_done);

        let outcome = if remaining_work > 0 {
            pcb.transition(ProcessState::Ready)?;
            self.ready_queue.push_back(handle);
            self.stats.record_preemption();
            DispatchOutcome::Requeued
        } else {
            pcb.transition(ProcessState::Terminated)?;
            self.stats.record_completion();
            DispatchOutcome::Terminated
        };
        self.running = None;

        debug!(
            "Process {} executed {} units ({} left, pc {}): {:?}",
            pid, work_done, remaining_work, program_counter, outcome
        );

        Ok(Some(Dispatch {
            pid,
            work_done,
            remaining_work,
            program_counter,
            outcome,
        }))
    }
}
