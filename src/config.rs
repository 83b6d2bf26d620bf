/*!
 * Runtime Configuration
 * Environment-driven settings for a simulator run
 */

use crate::core::limits::{DEFAULT_LOG_FILTER, ENV_OUTPUT_FORMAT, ENV_TRACE_JSON};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Unknown output format {0:?}")]
    #[diagnostic(
        code(config::invalid_output_format),
        help("Set RRSIM_OUTPUT to `text` or `json`.")
    )]
    InvalidOutputFormat(String),
}

/// Transcript renderer selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub output: OutputFormat,
    pub trace_json: bool,
    pub log_filter: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            trace_json: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SimConfig {
    /// Load settings from the environment
    ///
    /// Environment variables:
    /// - RRSIM_OUTPUT: `text` (default) or `json`
    /// - RRSIM_TRACE_JSON: emit JSON log lines (`1` or `true`)
    /// - RUST_LOG: log filter (default: warn)
    pub fn from_env() -> Result<Self, ConfigError> {
        let output = match env::var(ENV_OUTPUT_FORMAT) {
            Ok(value) => value.parse()?,
            Err(_) => OutputFormat::default(),
        };

        let trace_json = env::var(ENV_TRACE_JSON)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let log_filter =
            env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            output,
            trace_json,
            log_filter,
        })
    }
}
