/*!
 * JSON Lines
 * One serialized event per line, for machine consumers
 */

use crate::scheduler::Event;
use std::io::{self, Write};

/// Write each event as a single-line JSON object
pub fn write_json_lines<W: Write>(events: &[Event], out: &mut W) -> io::Result<()> {
    for event in events {
        serde_json::to_writer(&mut *out, event)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_object_per_line() {
        let mut out = Vec::new();
        write_json_lines(
            &[Event::Admitted { pid: 4 }, Event::Boundary],
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"event":"admitted","pid":4}"#, r#"{"event":"boundary"}"#]);

        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("event").is_some());
        }
    }
}
