/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::process::ProcessError;

/// Input validation errors with serialization support
///
/// Every variant aborts the run before the scheduler sees a single record.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum IngestError {
    #[error("Malformed input: expected {expected}, found {found}")]
    #[diagnostic(
        code(ingest::malformed_input),
        help("Input is whitespace-separated integers: quantum, process count, then one id/work pair per process.")
    )]
    MalformedInput { expected: String, found: String },

    #[error("Invalid quantum {0}: the quantum must be at least 1")]
    #[diagnostic(
        code(ingest::invalid_quantum),
        help("A zero or negative quantum would never let a process make progress.")
    )]
    InvalidQuantum(i64),

    #[error("Invalid process count {0}: at least one process is required")]
    #[diagnostic(
        code(ingest::invalid_process_count),
        help("The second token declares how many id/work pairs follow.")
    )]
    InvalidProcessCount(i64),

    #[error("Invalid process id {0}: ids must be between 0 and {max}", max = Pid::MAX)]
    #[diagnostic(
        code(ingest::invalid_id),
        help("Process ids are non-negative integers.")
    )]
    InvalidId(i64),

    #[error("Invalid work {work} for process {pid}: work must be at least 1")]
    #[diagnostic(
        code(ingest::invalid_work),
        help("Every process needs at least one unit of work to be scheduled.")
    )]
    InvalidWork { pid: Pid, work: i64 },

    #[error("Duplicate process id {0}")]
    #[diagnostic(
        code(ingest::duplicate_id),
        help("Each process in a batch must have a distinct id.")
    )]
    DuplicateId(Pid),

    #[error("Failed to read input: {0}")]
    #[diagnostic(
        code(ingest::io),
        help("Check that the input file exists and is readable.")
    )]
    Io(String),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error("Process error: {0}")]
    #[diagnostic(
        code(sim::process),
        help("The registry rejected an operation; this indicates an unvalidated batch.")
    )]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write transcript: {0}")]
    #[diagnostic(code(sim::output))]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_messages() {
        assert_eq!(
            IngestError::InvalidQuantum(0).to_string(),
            "Invalid quantum 0: the quantum must be at least 1"
        );
        assert_eq!(
            IngestError::DuplicateId(7).to_string(),
            "Duplicate process id 7"
        );
        assert!(IngestError::InvalidId(-1).to_string().contains("4294967295"));
    }

    #[test]
    fn test_ingest_error_serialization() {
        let json = serde_json::to_string(&IngestError::InvalidWork { pid: 3, work: 0 }).unwrap();
        assert_eq!(
            json,
            r#"{"error_type":"invalid_work","details":{"pid":3,"work":0}}"#
        );

        let back: IngestError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IngestError::InvalidWork { pid: 3, work: 0 });
    }

    #[test]
    fn test_sim_error_from_ingest() {
        let err: SimError = IngestError::InvalidProcessCount(0).into();
        assert!(matches!(err, SimError::Ingest(IngestError::InvalidProcessCount(0))));
        assert_eq!(
            err.to_string(),
            "Invalid process count 0: at least one process is required"
        );
    }

    #[test]
    fn test_sim_error_config_is_transparent() {
        let err: SimError = ConfigError::InvalidOutputFormat("xml".to_string()).into();
        assert_eq!(err.to_string(), r#"Unknown output format "xml""#);
    }
}
