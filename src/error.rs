//! Error taxonomy for archive reading.
//!
//! End of sequence is not an error: it is `Ok(None)` from
//! [`ArchiveReader::next_record`](crate::ArchiveReader::next_record).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file could not be opened.
    #[error("cannot open archive {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    /// The first frame was rejected: bad magic bytes, or a window larger than the limit.
    #[error("invalid archive header in {}: {source}", .path.display())]
    Header { path: PathBuf, source: io::Error },

    /// Decompression failed after the header was accepted (corrupt or truncated frame).
    #[error("decompression failed in {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// A line was not a well-formed JSON object.
    #[error("malformed record at line {line_no}, column {column}: {source} (line: {line:?})")]
    Decode {
        line_no: u64,
        column: usize,
        line: String,
        source: serde_json::Error,
    },
}

impl ArchiveError {
    /// True for the two failure modes raised while opening an archive.
    pub fn is_open_error(&self) -> bool {
        matches!(self, ArchiveError::Open { .. } | ArchiveError::Header { .. })
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, ArchiveError::Decode { .. })
    }
}
