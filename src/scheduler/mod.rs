/*!
 * CPU Scheduler
 * Round-robin dispatch over a closed batch of processes
 *
 * One simulated core: the head of the ready queue runs for at most one
 * quantum, then goes back to the tail or terminates. Every transition is
 * reported through an `EventSink`.
 */

mod events;
mod round_robin;
mod simulation;
mod stats;
mod status;

pub use events::{Discard, Event, EventSink};
pub use round_robin::{Dispatch, DispatchOutcome, RoundRobin};
pub use simulation::Simulation;
pub use stats::SchedulerStats;
pub use status::{StatusDescriptor, StatusEntry, StatusReport};

use crate::core::types::Batch;
use crate::process::ProcessResult;

/// Run a batch to completion and collect its event stream
pub fn simulate(batch: &Batch) -> ProcessResult<(Vec<Event>, SchedulerStats)> {
    let mut events: Vec<Event> = Vec::new();
    let stats = Simulation::new(batch)?.run(&mut events)?;
    Ok((events, stats))
}
