/*!
 * Simulation Driver
 * Runs a validated batch from admission to the last termination
 */

use super::events::{Event, EventSink};
use super::round_robin::{Dispatch, RoundRobin};
use super::stats::SchedulerStats;
use super::status;
use crate::core::types::Batch;
use crate::process::{ProcessResult, ProcessState, ProcessTable};
use log::info;

/// A batch loaded into a registry plus the scheduler that drains it
///
/// `run` drives everything; `start`, `step` and `finish` expose the same
/// sequence one transition at a time so callers can inspect the registry in
/// between.
#[derive(Debug)]
pub struct Simulation {
    table: ProcessTable,
    scheduler: RoundRobin,
    started: bool,
}

impl Simulation {
    /// Create one `New` record per process, in input order
    pub fn new(batch: &Batch) -> ProcessResult<Self> {
        let mut table = ProcessTable::with_capacity(batch.processes.len());
        for spec in &batch.processes {
            table.create(spec.pid, spec.work)?;
        }

        Ok(Self {
            table,
            scheduler: RoundRobin::new(batch.quantum),
            started: false,
        })
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn scheduler(&self) -> &RoundRobin {
        &self.scheduler
    }

    /// Announce created processes, admit them and emit the initial report
    ///
    /// Does nothing after the first call.
    pub fn start<S: EventSink>(&mut self, sink: &mut S) -> ProcessResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        for pcb in self
            .table
            .snapshot()
            .filter(|pcb| pcb.state() == ProcessState::New)
        {
            sink.emit(Event::Admitted { pid: pcb.pid() });
        }
        sink.emit(Event::Boundary);

        let admitted = self.scheduler.admit(&mut self.table)?;
        info!(
            "Simulation started: {} processes, quantum {}",
            admitted,
            self.scheduler.quantum()
        );

        status::report(&mut self.table, sink)?;
        Ok(())
    }

    /// Run one dispatch; `None` once the ready queue has drained
    pub fn step<S: EventSink>(&mut self, sink: &mut S) -> ProcessResult<Option<Dispatch>> {
        self.start(sink)?;
        self.scheduler.dispatch_next(&mut self.table, sink)
    }

    /// Emit the closing report and the final statistics
    ///
    /// The last process to terminate has not been shown in any report yet, so
    /// a final report runs whenever the active set is non-empty. Call after
    /// `step` has returned `None`.
    pub fn finish<S: EventSink>(&mut self, sink: &mut S) -> ProcessResult<SchedulerStats> {
        if !self.table.is_empty() {
            status::report(&mut self.table, sink)?;
        }

        let stats = self.scheduler.stats().clone();
        info!(
            "Simulation finished: {} dispatches, {} context switches, {} processes completed",
            stats.dispatches, stats.context_switches, stats.completed
        );
        sink.emit(Event::Finished(stats.clone()));
        Ok(stats)
    }

    /// Drive the batch to completion
    pub fn run<S: EventSink>(mut self, sink: &mut S) -> ProcessResult<SchedulerStats> {
        self.start(sink)?;
        while self.step(sink)?.is_some() {}
        self.finish(sink)
    }
}
