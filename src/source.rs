//! Compressed byte source: one open archive file plus one zstd decompression stream.

use crate::error::ArchiveError;
use crate::util::window_log_for;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use zstd::stream::read::Decoder;

/// Decompressed bytes pulled eagerly by `open` to validate the frame header.
const PRIME_BYTES: usize = 64 * 1024;

/// A `Read` wrapper that counts compressed bytes read.
struct CountingReader<R: Read> {
    inner: R,
    counter: Arc<AtomicU64>,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

type ArchiveDecoder = Decoder<'static, BufReader<CountingReader<File>>>;

/// Decompressed view of a single `.zst` archive.
///
/// `read` hands out raw decompressed bytes with no regard for line boundaries.
/// Dropping the source (or calling `close`) releases the file handle and decoder.
pub struct ZstdSource {
    path: PathBuf,
    decoder: Option<ArchiveDecoder>,
    primed: Vec<u8>,
    primed_pos: usize,
    compressed: Arc<AtomicU64>,
}

impl ZstdSource {
    /// Open `path` and validate the first frame header against `window_size_limit`.
    ///
    /// A missing file fails with [`ArchiveError::Open`]; bad magic bytes or an oversized
    /// window fail with [`ArchiveError::Header`].
    pub fn open(path: &Path, window_size_limit: u64) -> Result<Self, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let compressed = Arc::new(AtomicU64::new(0));
        let counting = CountingReader { inner: file, counter: compressed.clone() };

        let header_err = |source| ArchiveError::Header { path: path.to_path_buf(), source };
        let log = window_log_for(window_size_limit);
        let mut decoder = Decoder::new(counting).map_err(header_err)?;
        decoder.window_log_max(log).map_err(header_err)?;

        // zstd only parses the frame header on the first decompression call.
        let mut primed = vec![0u8; PRIME_BYTES];
        let n = read_retrying(&mut decoder, &mut primed).map_err(header_err)?;
        primed.truncate(n);

        tracing::debug!(path = %path.display(), window_log = log, primed = n, "opened archive");
        Ok(Self {
            path: path.to_path_buf(),
            decoder: Some(decoder),
            primed,
            primed_pos: 0,
            compressed,
        })
    }

    /// Fill up to `buf.len()` decompressed bytes. Returns 0 only at the true end of the
    /// stream (or after `close`).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ArchiveError> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.primed_pos < self.primed.len() {
            let rest = &self.primed[self.primed_pos..];
            let n = rest.len().min(buf.len());
            buf[..n].copy_from_slice(&rest[..n]);
            self.primed_pos += n;
            if self.primed_pos == self.primed.len() {
                self.primed = Vec::new();
                self.primed_pos = 0;
            }
            return Ok(n);
        }
        let Some(decoder) = self.decoder.as_mut() else {
            return Ok(0);
        };
        read_retrying(decoder, buf).map_err(|source| ArchiveError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Release the file handle and decoder. Idempotent.
    pub fn close(&mut self) {
        if self.decoder.take().is_some() {
            tracing::debug!(path = %self.path.display(), "closed archive");
        }
        self.primed = Vec::new();
        self.primed_pos = 0;
    }

    pub fn is_open(&self) -> bool {
        self.decoder.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compressed bytes consumed from the file so far.
    pub fn compressed_bytes_read(&self) -> u64 {
        self.compressed.load(Ordering::Relaxed)
    }
}

fn read_retrying<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match r.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

// ----------------------------- Integrity checks ----------------------------------

/// QUICK check: decode up to `max_decompressed_bytes` and stop.
/// Catches header and early corruption; cannot see trailing corruption.
pub fn quick_validate_zst(
    path: &Path,
    max_decompressed_bytes: u64,
    window_size_limit: u64,
) -> Result<(), ArchiveError> {
    let mut src = ZstdSource::open(path, window_size_limit)?;
    let mut remaining = max_decompressed_bytes;
    let mut buf = vec![0u8; PRIME_BYTES];
    while remaining > 0 {
        let want = buf.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
        let n = src.read(&mut buf[..want])?;
        if n == 0 {
            break;
        }
        remaining -= n as u64;
    }
    Ok(())
}

/// FULL check: decode the entire stream to EOF (validates checksums).
pub fn validate_zst_full(path: &Path, window_size_limit: u64) -> Result<(), ArchiveError> {
    let mut src = ZstdSource::open(path, window_size_limit)?;
    let mut buf = vec![0u8; PRIME_BYTES];
    while src.read(&mut buf)? > 0 {}
    Ok(())
}
