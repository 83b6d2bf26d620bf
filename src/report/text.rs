/*!
 * Text Transcript
 * Classic line-oriented rendering of the event stream
 */

use crate::core::limits::{ADMISSION_HEADER, BOUNDARY_MARKER};
use crate::scheduler::{Event, StatusDescriptor, StatusEntry};
use std::io::{self, Write};

/// Write the transcript for `events`
pub fn write_text<W: Write>(events: &[Event], out: &mut W) -> io::Result<()> {
    let mut header_written = false;

    for event in events {
        match event {
            Event::Admitted { pid } => {
                if !header_written {
                    writeln!(out, "{ADMISSION_HEADER}")?;
                    header_written = true;
                }
                writeln!(out, "P{pid}")?;
            }
            Event::Boundary => writeln!(out, "{BOUNDARY_MARKER}")?,
            Event::KernelLoading { pid } => writeln!(out, "Kernel loading P{pid}")?,
            Event::Status(report) => {
                for entry in &report.entries {
                    write_entry(entry, out)?;
                }
            }
            Event::KernelSaving { pid, .. } => writeln!(out, "Kernel saving P{pid}")?,
            Event::Finished(_) => {}
        }
    }

    out.flush()
}

fn write_entry<W: Write>(entry: &StatusEntry, out: &mut W) -> io::Result<()> {
    match entry.descriptor {
        StatusDescriptor::Ready { program_counter } => {
            writeln!(out, "P{} Ready, pc {}", entry.pid, program_counter)
        }
        StatusDescriptor::Running => writeln!(out, "P{} Running", entry.pid),
        StatusDescriptor::Terminated => writeln!(out, "P{} Terminated", entry.pid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::StatusReport;
    use pretty_assertions::assert_eq;

    fn render(events: &[Event]) -> String {
        let mut out = Vec::new();
        write_text(events, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_written_once() {
        let text = render(&[
            Event::Admitted { pid: 1 },
            Event::Admitted { pid: 2 },
            Event::Boundary,
        ]);
        assert_eq!(text, "New processes:\nP1\nP2\n--\n");
    }

    #[test]
    fn test_status_lines() {
        let text = render(&[Event::Status(StatusReport {
            entries: vec![
                StatusEntry {
                    pid: 1,
                    descriptor: StatusDescriptor::Terminated,
                },
                StatusEntry {
                    pid: 2,
                    descriptor: StatusDescriptor::Running,
                },
                StatusEntry {
                    pid: 3,
                    descriptor: StatusDescriptor::Ready { program_counter: 4 },
                },
            ],
        })]);
        assert_eq!(text, "P1 Terminated\nP2 Running\nP3 Ready, pc 4\n");
    }

    #[test]
    fn test_no_header_without_admissions() {
        assert_eq!(render(&[Event::KernelLoading { pid: 5 }]), "Kernel loading P5\n");
    }
}
