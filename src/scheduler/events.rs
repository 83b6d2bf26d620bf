/*!
 * Scheduler Events
 * Chronological event stream consumed by the reporting layer
 */

use super::stats::SchedulerStats;
use super::status::StatusReport;
use crate::core::types::{Pid, ProgramCounter, WorkUnits};
use serde::Serialize;

/// One entry in the simulation transcript
///
/// Only content and ordering are normative; how each event is drawn is up
/// to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A process was created, announced in input order
    Admitted { pid: Pid },

    /// Section separator
    Boundary,

    /// A process was dispatched and now holds the CPU
    KernelLoading { pid: Pid },

    /// Snapshot of the active set
    Status(StatusReport),

    /// A process gave up the CPU after executing `work_done` units
    KernelSaving {
        pid: Pid,
        work_done: WorkUnits,
        remaining_work: WorkUnits,
        program_counter: ProgramCounter,
    },

    /// Every admitted process has terminated
    Finished(SchedulerStats),
}

/// Consumer of scheduler events
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    #[inline]
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

/// Sink that drops every event, for callers that only want statistics
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl EventSink for Discard {
    #[inline]
    fn emit(&mut self, _event: Event) {}
}
