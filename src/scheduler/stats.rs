/*!
 * Scheduler Statistics
 * Counters accumulated by the dispatch loop
 */

use crate::core::serde::is_zero_u64;
use crate::core::types::{Pid, Quantum, WorkUnits};
use serde::Serialize;

/// Scheduler statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub quantum: WorkUnits,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub dispatches: u64,
    /// Dispatches that loaded a different process than the previous one
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub context_switches: u64,
    /// Quantum expiries that sent a process back to the ready queue
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub preemptions: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub completed: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub work_executed: WorkUnits,
    #[serde(skip)]
    last_dispatched: Option<Pid>,
}

impl SchedulerStats {
    pub fn new(quantum: Quantum) -> Self {
        Self {
            quantum: quantum.get(),
            dispatches: 0,
            context_switches: 0,
            preemptions: 0,
            completed: 0,
            work_executed: 0,
            last_dispatched: None,
        }
    }

    pub(super) fn record_dispatch(&mut self, pid: Pid, work_done: WorkUnits) {
        self.dispatches += 1;
        if self.last_dispatched != Some(pid) {
            self.context_switches += 1;
        }
        self.last_dispatched = Some(pid);
        self.work_executed = self.work_executed.saturating_add(work_done);
    }

    pub(super) fn record_preemption(&mut self) {
        self.preemptions += 1;
    }

    pub(super) fn record_completion(&mut self) {
        self.completed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_switch_counting() {
        let mut stats = SchedulerStats::new(Quantum::new(2).unwrap());
        stats.record_dispatch(1, 2);
        stats.record_dispatch(1, 2);
        stats.record_dispatch(2, 1);
        stats.record_dispatch(1, 1);

        assert_eq!(stats.dispatches, 4);
        assert_eq!(stats.context_switches, 3);
        assert_eq!(stats.work_executed, 6);
    }

    #[test]
    fn test_zero_counters_skipped() {
        let stats = SchedulerStats::new(Quantum::new(5).unwrap());
        assert_eq!(serde_json::to_string(&stats).unwrap(), r#"{"quantum":5}"#);
    }

    #[test]
    fn test_work_executed_saturates() {
        let huge = i64::MAX as u64;
        let mut stats = SchedulerStats::new(Quantum::new(huge).unwrap());
        for pid in 1..=3 {
            stats.record_dispatch(pid, huge);
        }
        assert_eq!(stats.dispatches, 3);
        assert_eq!(stats.work_executed, u64::MAX);
    }
}
