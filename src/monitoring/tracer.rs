/*!
 * Structured Tracing
 * Subscriber setup and run correlation for the simulator
 *
 * Logs always go to stderr so stdout carries only the transcript. Library
 * code logs through the `log` facade; the subscriber bridges those records.
 */

use crate::config::SimConfig;
use tracing::{info_span, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &SimConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::core::limits::DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.trace_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    }
}

/// Generate a unique run ID for log correlation
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one simulator run
pub fn simulation_span(run_id: &str) -> Span {
    info_span!("simulation", run_id = %run_id)
}
