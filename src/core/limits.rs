/*!
 * Simulator Limits and Constants
 *
 * Centralized location for fixed values shared across modules.
 */

// =============================================================================
// PROCESS MODEL
// =============================================================================

/// Program counter value of a freshly created process
pub const INITIAL_PROGRAM_COUNTER: u64 = 1;

/// Smallest accepted quantum
pub const MIN_QUANTUM: i64 = 1;

/// Smallest accepted work amount per process
pub const MIN_WORK: i64 = 1;

/// Smallest accepted process count
pub const MIN_PROCESS_COUNT: i64 = 1;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Renderer selection (`text` or `json`)
pub const ENV_OUTPUT_FORMAT: &str = "RRSIM_OUTPUT";

/// Emit log lines as JSON (`1` or `true`)
pub const ENV_TRACE_JSON: &str = "RRSIM_TRACE_JSON";

/// Log filter used when `RUST_LOG` is unset
/// Logs go to stderr; keep the default quiet so a run only shows the transcript
pub const DEFAULT_LOG_FILTER: &str = "warn";

// =============================================================================
// TRANSCRIPT
// =============================================================================

/// Separator line between transcript sections
pub const BOUNDARY_MARKER: &str = "--";

/// Heading printed before admission announcements
pub const ADMISSION_HEADER: &str = "New processes:";
