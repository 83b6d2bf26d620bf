/*!
 * Round-Robin Scheduling Simulator
 * Single-core CPU scheduling over a closed batch of processes
 */

pub mod config;
pub mod core;
pub mod ingest;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;

// Re-exports
pub use crate::core::errors::{IngestError, SimError};
pub use crate::core::types::{Batch, Pid, ProcessSpec, Quantum, SimResult, WorkUnits};
pub use config::{ConfigError, OutputFormat, SimConfig};
pub use ingest::{parse_batch, read_batch, read_batch_from_path};
pub use monitoring::init_tracing;
pub use process::{ProcessControlBlock, ProcessError, ProcessState, ProcessTable};
pub use scheduler::{simulate, Event, EventSink, SchedulerStats, Simulation};
