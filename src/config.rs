/// Default number of decompressed bytes requested per pull (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 20;

/// Default maximum decompression window (2 GiB, i.e. window log 31).
/// Reddit dumps are compressed with `--long=31`, well above zstd's 128 MiB default.
pub const DEFAULT_WINDOW_SIZE_LIMIT: u64 = 1 << 31;

/// Per-reader options. Each reader owns a copy, so concurrent readers stay independent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    pub chunk_size: usize,        // bytes per underlying pull; performance only
    pub window_size_limit: u64,   // largest window accepted in the frame header
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            window_size_limit: DEFAULT_WINDOW_SIZE_LIMIT,
        }
    }
}

impl ReaderOptions {
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }
    pub fn with_window_size_limit(mut self, bytes: u64) -> Self {
        self.window_size_limit = bytes;
        self
    }
}

/// Options shared by `sample` and `apply`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkOptions {
    pub progress: bool,                 // show a progress bar over compressed bytes
    pub progress_label: Option<String>, // optional label for the bar
    pub stop_at: Option<u64>,           // None = no limit; Some(k) processes exactly k records
    pub reset_first: bool,              // restart from the beginning of the archive first
}

impl BulkOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_stop_at(mut self, stop_at: Option<u64>) -> Self {
        self.stop_at = stop_at;
        self
    }
    pub fn with_reset_first(mut self, yes: bool) -> Self {
        self.reset_first = yes;
        self
    }

    /// Whether `count` processed records already satisfy the stop limit.
    #[inline]
    pub(crate) fn reached(&self, count: u64) -> bool {
        matches!(self.stop_at, Some(limit) if count >= limit)
    }
}
