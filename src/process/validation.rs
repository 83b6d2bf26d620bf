/*!
 * Process Validation
 * Registry-side checks on work amounts and lifecycle edges
 */

use super::types::{ProcessError, ProcessResult, ProcessState};
use crate::core::types::{Pid, WorkUnits};

/// Validate the work amount of a new process
pub(super) fn validate_work(pid: Pid, work: WorkUnits) -> ProcessResult<()> {
    if work == 0 {
        return Err(ProcessError::InvalidWork { pid, work });
    }
    Ok(())
}

/// Validate a lifecycle edge
pub(super) fn validate_transition(
    pid: Pid,
    from: ProcessState,
    to: ProcessState,
) -> ProcessResult<()> {
    if !from.can_transition_to(to) {
        return Err(ProcessError::InvalidStateTransition { pid, from, to });
    }
    Ok(())
}
