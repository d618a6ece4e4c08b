use crate::error::ArchiveError;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// One decoded archive line: a JSON object with dynamically typed values.
/// Typed shapes are projected from it downstream (see [`project`]).
pub type Record = Map<String, Value>;

/// Parse one line into a [`Record`]. `line_no` is the 1-based position of the line
/// in the decompressed stream and is carried into the error.
pub fn decode_record(line: &[u8], line_no: u64) -> Result<Record, ArchiveError> {
    serde_json::from_slice::<Record>(line).map_err(|source| ArchiveError::Decode {
        line_no,
        column: source.column(),
        line: String::from_utf8_lossy(line).into_owned(),
        source,
    })
}

/// Typed projection of a record into a collaborator's shape.
pub fn project<T: DeserializeOwned>(record: Record) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(record))?)
}
