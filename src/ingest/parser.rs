/*!
 * Batch Parser
 * Token-level parsing and validation of the batch description
 */

use crate::core::errors::IngestError;
use crate::core::limits::{MIN_PROCESS_COUNT, MIN_QUANTUM, MIN_WORK};
use crate::core::types::{Batch, Pid, ProcessSpec, Quantum};
use ahash::AHashSet;
use log::debug;
use std::str::SplitWhitespace;

// Upper bound on up-front allocation; the declared count is untrusted
const PREALLOC_LIMIT: usize = 1024;

/// Whitespace-separated integer tokens
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
        }
    }

    fn next_int(&mut self, expected: &str) -> Result<i64, IngestError> {
        let token = self.inner.next().ok_or_else(|| IngestError::MalformedInput {
            expected: expected.to_string(),
            found: "end of input".to_string(),
        })?;

        token.parse::<i64>().map_err(|_| IngestError::MalformedInput {
            expected: expected.to_string(),
            found: format!("{token:?}"),
        })
    }
}

/// Parse and validate a batch description
///
/// Layout: `quantum count (id work){count}`. Tokens after the last declared
/// pair are ignored.
pub fn parse_batch(input: &str) -> Result<Batch, IngestError> {
    let mut tokens = Tokens::new(input);

    let quantum = tokens.next_int("an integer quantum")?;
    let count = tokens.next_int("an integer process count")?;

    let quantum = validate_quantum(quantum)?;
    let count = validate_count(count)?;

    let mut seen = AHashSet::with_capacity(count.min(PREALLOC_LIMIT));
    let mut processes = Vec::with_capacity(count.min(PREALLOC_LIMIT));

    for _ in 0..count {
        let id = tokens.next_int("an integer process id")?;
        let work = tokens.next_int("an integer work amount")?;

        let pid = validate_id(id)?;
        let work = validate_work(pid, work)?;
        if !seen.insert(pid) {
            return Err(IngestError::DuplicateId(pid));
        }

        processes.push(ProcessSpec::new(pid, work));
    }

    debug!(
        "Parsed batch: quantum {}, {} processes",
        quantum,
        processes.len()
    );
    Ok(Batch::new(quantum, processes))
}

fn validate_quantum(quantum: i64) -> Result<Quantum, IngestError> {
    if quantum < MIN_QUANTUM {
        return Err(IngestError::InvalidQuantum(quantum));
    }
    u64::try_from(quantum)
        .ok()
        .and_then(Quantum::new)
        .ok_or(IngestError::InvalidQuantum(quantum))
}

fn validate_count(count: i64) -> Result<usize, IngestError> {
    if count < MIN_PROCESS_COUNT {
        return Err(IngestError::InvalidProcessCount(count));
    }
    usize::try_from(count).map_err(|_| IngestError::InvalidProcessCount(count))
}

fn validate_id(id: i64) -> Result<Pid, IngestError> {
    Pid::try_from(id).map_err(|_| IngestError::InvalidId(id))
}

fn validate_work(pid: Pid, work: i64) -> Result<u64, IngestError> {
    if work < MIN_WORK {
        return Err(IngestError::InvalidWork { pid, work });
    }
    u64::try_from(work).map_err(|_| IngestError::InvalidWork { pid, work })
}
