/*!
 * Process Registry
 * Arena of process control blocks addressed by handle
 *
 * Records are stored in insertion order and never move; a slot is emptied
 * when its record is retired. The ready queue and the running slot hold
 * `Handle`s into this arena rather than references, so a record has exactly
 * one owner for its whole lifetime.
 */

use super::types::{ProcessControlBlock, ProcessError, ProcessResult, ProcessState};
use super::validation::validate_work;
use crate::core::types::{Pid, WorkUnits};
use ahash::AHashMap;
use log::{debug, trace};

/// Stable index of a record in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

impl Handle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Process registry holding every not-yet-retired record
#[derive(Debug, Default)]
pub struct ProcessTable {
    slots: Vec<Option<ProcessControlBlock>>,
    pids: Vec<Pid>,
    // Retired pids stay indexed so ids remain unique across the whole batch
    index: AHashMap<Pid, Handle>,
    active: usize,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            pids: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
            active: 0,
        }
    }

    /// Create a record in the `New` state
    pub fn create(&mut self, pid: Pid, work: WorkUnits) -> ProcessResult<Handle> {
        if self.index.contains_key(&pid) {
            return Err(ProcessError::DuplicateId(pid));
        }
        validate_work(pid, work)?;

        let handle = Handle(self.slots.len());
        self.slots.push(Some(ProcessControlBlock::new(pid, work)));
        self.pids.push(pid);
        self.index.insert(pid, handle);
        self.active += 1;

        trace!("Process {} created with {} units of work", pid, work);
        Ok(handle)
    }

    /// Move every `New` record to `Ready` and append it to `queue` in
    /// registry order
    ///
    /// Returns the number of records admitted.
    pub fn admit_all<Q: Extend<Handle>>(&mut self, queue: &mut Q) -> ProcessResult<usize> {
        let mut admitted = Vec::new();

        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if let Some(pcb) = slot {
                if pcb.state() == ProcessState::New {
                    pcb.transition(ProcessState::Ready)?;
                    admitted.push(Handle(idx));
                }
            }
        }

        let count = admitted.len();
        queue.extend(admitted);
        debug!("Admitted {} processes to the ready queue", count);
        Ok(count)
    }

    /// Remove a `Terminated` record from the active set
    pub fn retire(&mut self, handle: Handle) -> ProcessResult<ProcessControlBlock> {
        let pcb = self.lookup(handle)?;
        if !pcb.state().is_terminal() {
            return Err(ProcessError::NotRetirable {
                pid: pcb.pid(),
                state: pcb.state(),
            });
        }

        let pcb = self
            .slots
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(ProcessError::StaleHandle(handle.0))?;
        self.active -= 1;
        trace!("Process {} retired", pcb.pid());
        Ok(pcb)
    }

    /// Active records in registry (insertion) order
    ///
    /// The iterator is lazy and can be cloned to restart the walk.
    pub fn snapshot(&self) -> impl Iterator<Item = &ProcessControlBlock> + Clone + '_ {
        self.slots.iter().flatten()
    }

    /// Active records paired with their handles, in registry order
    pub fn entries(&self) -> impl Iterator<Item = (Handle, &ProcessControlBlock)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|pcb| (Handle(idx), pcb)))
    }

    pub fn get(&self, handle: Handle) -> Option<&ProcessControlBlock> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> ProcessResult<&mut ProcessControlBlock> {
        self.lookup(handle)?;
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(ProcessError::StaleHandle(handle.0))
    }

    /// Resolve a handle, naming the pid when the record was already retired
    fn lookup(&self, handle: Handle) -> ProcessResult<&ProcessControlBlock> {
        match self.slots.get(handle.0) {
            Some(Some(pcb)) => Ok(pcb),
            Some(None) => Err(ProcessError::NotFound(self.pids[handle.0])),
            None => Err(ProcessError::StaleHandle(handle.0)),
        }
    }

    /// Handle of an active record by pid
    pub fn find(&self, pid: Pid) -> Option<Handle> {
        self.index
            .get(&pid)
            .copied()
            .filter(|handle| self.get(*handle).is_some())
    }

    /// Number of active records
    #[inline]
    pub fn len(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Number of records currently `Running`
    pub fn running_count(&self) -> usize {
        self.snapshot()
            .filter(|pcb| pcb.state() == ProcessState::Running)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn table_with(specs: &[(Pid, WorkUnits)]) -> ProcessTable {
        let mut table = ProcessTable::new();
        for &(pid, work) in specs {
            table.create(pid, work).unwrap();
        }
        table
    }

    #[test]
    fn test_create_assigns_handles_in_order() {
        let mut table = ProcessTable::new();
        let a = table.create(10, 3).unwrap();
        let b = table.create(4, 1).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.find(4), Some(b));
        assert_eq!(table.get(a).map(|p| p.state()), Some(ProcessState::New));
    }

    #[test]
    fn test_create_rejects_duplicates_and_zero_work() {
        let mut table = table_with(&[(7, 2)]);

        assert_eq!(table.create(7, 5), Err(ProcessError::DuplicateId(7)));
        assert_eq!(
            table.create(8, 0),
            Err(ProcessError::InvalidWork { pid: 8, work: 0 })
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_admit_all_preserves_input_order() {
        let mut table = table_with(&[(3, 1), (1, 1), (2, 1)]);
        let mut queue: VecDeque<Handle> = VecDeque::new();

        assert_eq!(table.admit_all(&mut queue).unwrap(), 3);

        let pids: Vec<Pid> = queue
            .iter()
            .map(|h| table.get(*h).unwrap().pid())
            .collect();
        assert_eq!(pids, vec![3, 1, 2]);
        assert!(table.snapshot().all(|p| p.state() == ProcessState::Ready));

        // A second admission finds nothing new
        assert_eq!(table.admit_all(&mut queue).unwrap(), 0);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_retire_requires_terminated() {
        let mut table = table_with(&[(1, 1)]);
        let handle = table.find(1).unwrap();

        assert_eq!(
            table.retire(handle),
            Err(ProcessError::NotRetirable {
                pid: 1,
                state: ProcessState::New,
            })
        );

        let pcb = table.get_mut(handle).unwrap();
        pcb.transition(ProcessState::Ready).unwrap();
        pcb.transition(ProcessState::Running).unwrap();
        pcb.transition(ProcessState::Terminated).unwrap();

        let retired = table.retire(handle).unwrap();
        assert_eq!(retired.pid(), 1);
        assert!(table.is_empty());
        assert_eq!(table.find(1), None);
        assert_eq!(table.retire(handle), Err(ProcessError::NotFound(1)));
    }

    #[test]
    fn test_retired_pid_stays_reserved() {
        let mut table = table_with(&[(5, 1)]);
        let handle = table.find(5).unwrap();
        let pcb = table.get_mut(handle).unwrap();
        pcb.transition(ProcessState::Ready).unwrap();
        pcb.transition(ProcessState::Running).unwrap();
        pcb.transition(ProcessState::Terminated).unwrap();
        table.retire(handle).unwrap();

        assert_eq!(table.create(5, 1), Err(ProcessError::DuplicateId(5)));
    }

    #[test]
    fn test_snapshot_is_restartable() {
        let table = table_with(&[(1, 1), (2, 2), (3, 3)]);
        let snapshot = table.snapshot();

        let first: Vec<Pid> = snapshot.clone().map(|p| p.pid()).collect();
        let second: Vec<Pid> = snapshot.map(|p| p.pid()).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }
}
