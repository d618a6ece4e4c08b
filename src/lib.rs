//! Streaming reader for Reddit archive dumps: zstd-compressed, newline-delimited JSON,
//! decoded one record at a time without holding the decompressed file in memory.

mod bulk;
mod concurrency;
mod config;
mod error;
mod lines;
mod paths;
mod progress;
mod reader;
mod record;
mod source;
mod util;

pub mod schema;

pub use crate::config::{BulkOptions, ReaderOptions, DEFAULT_CHUNK_SIZE, DEFAULT_WINDOW_SIZE_LIMIT};
pub use crate::error::ArchiveError;
pub use crate::reader::ArchiveReader;
pub use crate::record::{decode_record, project, Record};

// Lower-level pieces of the reader, for callers that drive chunks themselves.
pub use crate::lines::LineReassembler;
pub use crate::source::{quick_validate_zst, validate_zst_full, ZstdSource};

// Discovery and multi-archive ingestion.
pub use crate::concurrency::apply_each_archive;
pub use crate::paths::{classify, discover_archives, ArchiveFile, ArchiveKind};

pub use crate::util::{init_tracing_once, window_log_for};
