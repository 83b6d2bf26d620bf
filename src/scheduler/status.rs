/*!
 * Status Reports
 * Snapshots of the active set and the retire-after-report rule
 */

use super::events::{Event, EventSink};
use crate::core::types::{Pid, ProgramCounter};
use crate::process::{ProcessControlBlock, ProcessResult, ProcessState, ProcessTable};
use log::trace;
use serde::Serialize;

/// State-dependent part of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatusDescriptor {
    Ready { program_counter: ProgramCounter },
    Running,
    Terminated,
}

impl StatusDescriptor {
    /// Descriptor for a record, or `None` for records still awaiting admission
    pub fn of(pcb: &ProcessControlBlock) -> Option<Self> {
        match pcb.state() {
            ProcessState::New => None,
            ProcessState::Ready => Some(StatusDescriptor::Ready {
                program_counter: pcb.program_counter(),
            }),
            ProcessState::Running => Some(StatusDescriptor::Running),
            ProcessState::Terminated => Some(StatusDescriptor::Terminated),
        }
    }
}

/// One line of a status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub pid: Pid,
    #[serde(flatten)]
    pub descriptor: StatusDescriptor,
}

/// Active-set snapshot in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub entries: Vec<StatusEntry>,
}

impl StatusReport {
    /// Pids of the entries reported as terminated
    pub fn terminated(&self) -> impl Iterator<Item = Pid> + '_ {
        self.entries
            .iter()
            .filter(|e| e.descriptor == StatusDescriptor::Terminated)
            .map(|e| e.pid)
    }

    pub fn running(&self) -> impl Iterator<Item = Pid> + '_ {
        self.entries
            .iter()
            .filter(|e| e.descriptor == StatusDescriptor::Running)
            .map(|e| e.pid)
    }
}

/// Emit a status report of the active set followed by a boundary.
///
/// Post-condition: every record the report showed as `Terminated` has been
/// retired, so a terminated process appears in exactly one report.
///
/// Returns the number of records retired.
pub(crate) fn report<S: EventSink>(table: &mut ProcessTable, sink: &mut S) -> ProcessResult<usize> {
    let mut finished = Vec::new();
    let entries = table
        .entries()
        .filter_map(|(handle, pcb)| {
            let descriptor = StatusDescriptor::of(pcb)?;
            if descriptor == StatusDescriptor::Terminated {
                finished.push(handle);
            }
            Some(StatusEntry {
                pid: pcb.pid(),
                descriptor,
            })
        })
        .collect();

    sink.emit(Event::Status(StatusReport { entries }));
    sink.emit(Event::Boundary);

    for handle in &finished {
        let pcb = table.retire(*handle)?;
        trace!("Process {} reported terminated and retired", pcb.pid());
    }
    Ok(finished.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Handle;
    use std::collections::VecDeque;

    #[test]
    fn test_new_records_are_invisible() {
        let mut table = ProcessTable::new();
        table.create(1, 3).unwrap();
        table.create(2, 3).unwrap();

        let mut events: Vec<Event> = Vec::new();
        assert_eq!(report(&mut table, &mut events).unwrap(), 0);
        assert_eq!(
            events,
            vec![Event::Status(StatusReport::default()), Event::Boundary]
        );
    }

    #[test]
    fn test_terminated_reported_once_then_retired() {
        let mut table = ProcessTable::new();
        let done = table.create(1, 1).unwrap();
        table.create(2, 4).unwrap();
        table.admit_all(&mut VecDeque::<Handle>::new()).unwrap();

        let pcb = table.get_mut(done).unwrap();
        pcb.transition(ProcessState::Running).unwrap();
        pcb.transition(ProcessState::Terminated).unwrap();

        let mut events: Vec<Event> = Vec::new();
        assert_eq!(report(&mut table, &mut events).unwrap(), 1);
        assert_eq!(report(&mut table, &mut events).unwrap(), 0);

        let reports: Vec<&StatusReport> = events
            .iter()
            .filter_map(|e| match e {
                Event::Status(r) => Some(r),
                _ => None,
            })
            .collect();

        assert_eq!(
            reports[0].entries,
            vec![
                StatusEntry {
                    pid: 1,
                    descriptor: StatusDescriptor::Terminated,
                },
                StatusEntry {
                    pid: 2,
                    descriptor: StatusDescriptor::Ready { program_counter: 1 },
                },
            ]
        );
        assert_eq!(reports[1].terminated().count(), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = StatusEntry {
            pid: 3,
            descriptor: StatusDescriptor::Ready { program_counter: 7 },
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"pid":3,"state":"ready","program_counter":7}"#
        );
    }
}
