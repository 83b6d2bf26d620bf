/*!
 * Reporting
 * Renders the scheduler's event stream for display
 */

mod json;
mod text;

pub use json::write_json_lines;
pub use text::write_text;

use crate::config::OutputFormat;
use crate::scheduler::Event;
use std::io::{self, Write};

/// Render `events` in the selected format
pub fn render<W: Write>(format: OutputFormat, events: &[Event], out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(events, out),
        OutputFormat::Json => write_json_lines(events, out),
    }
}
