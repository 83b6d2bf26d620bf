/*!
 * Batch Ingestion
 * Reads and validates the batch description before anything is scheduled
 *
 * Every rule violation aborts ingestion, so the scheduler only ever sees a
 * well-formed `Batch`.
 */

mod parser;

pub use parser::parse_batch;

use crate::core::errors::IngestError;
use crate::core::types::Batch;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read a whole batch description from `reader`
pub fn read_batch<R: Read>(mut reader: R) -> Result<Batch, IngestError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_batch(decode(&bytes)?)
}

/// Read a batch description from a file
pub fn read_batch_from_path(path: impl AsRef<Path>) -> Result<Batch, IngestError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| IngestError::Io(format!("{}: {}", path.display(), e)))?;
    parse_batch(decode(&bytes)?)
}

/// Input must be UTF-8; anything else is `MalformedInput`
fn decode(bytes: &[u8]) -> Result<&str, IngestError> {
    std::str::from_utf8(bytes).map_err(|e| IngestError::MalformedInput {
        expected: "UTF-8 text".to_string(),
        found: format!("invalid byte sequence at offset {}", e.valid_up_to()),
    })
}
