/*!
 * Process Module
 * Process control blocks, lifecycle state and the registry that owns them
 */

pub mod registry;
pub mod types;
mod validation;

pub use registry::{Handle, ProcessTable};
pub use types::{ProcessControlBlock, ProcessError, ProcessResult, ProcessState};
