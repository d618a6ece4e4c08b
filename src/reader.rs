//! Lazy record sequence over one archive.
//!
//! `ArchiveReader` is a two-state machine (`Ready` → `Exhausted`, plus a terminal
//! `Failed` after an error). Each pull drains the line queue first and only asks the
//! byte source for another chunk once the queue is empty.

use crate::config::ReaderOptions;
use crate::error::ArchiveError;
use crate::lines::LineReassembler;
use crate::record::{decode_record, Record};
use crate::source::ZstdSource;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Ready,
    Exhausted,
    Failed,
}

pub struct ArchiveReader {
    path: PathBuf,
    opts: ReaderOptions,
    source: Option<ZstdSource>,
    lines: LineReassembler,
    queue: VecDeque<Vec<u8>>,
    chunk: Vec<u8>,
    state: State,
    lines_read: u64,
    records_read: u64,
    compressed_closed: u64,
}

impl ArchiveReader {
    /// Open an archive with the given options. Fails if the file is missing or its
    /// header is rejected.
    pub fn open(path: impl AsRef<Path>, opts: ReaderOptions) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();
        let source = ZstdSource::open(&path, opts.window_size_limit)?;
        tracing::info!(
            path = %path.display(),
            chunk_size = opts.chunk_size,
            window_size_limit = opts.window_size_limit,
            "reading archive"
        );
        Ok(Self {
            chunk: vec![0u8; opts.chunk_size.max(1)],
            path,
            opts,
            source: Some(source),
            lines: LineReassembler::new(),
            queue: VecDeque::new(),
            state: State::Ready,
            lines_read: 0,
            records_read: 0,
            compressed_closed: 0,
        })
    }

    /// Open with default options.
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        Self::open(path, ReaderOptions::default())
    }

    /// Pull one record. `Ok(None)` signals the end of the sequence, and keeps doing so
    /// until `reset`.
    ///
    /// A final line without a trailing `\n` is still decoded. Every line goes through the
    /// decoder, so an empty line is malformed like any other non-JSON line.
    /// A malformed line fails the reader: the error is returned once, the archive is
    /// closed, and later pulls return `Ok(None)`.
    pub fn next_record(&mut self) -> Result<Option<Record>, ArchiveError> {
        loop {
            if self.state != State::Ready {
                return Ok(None);
            }

            if let Some(line) = self.queue.pop_front() {
                self.lines_read += 1;
                return match decode_record(&line, self.lines_read) {
                    Ok(record) => {
                        self.records_read += 1;
                        Ok(Some(record))
                    }
                    Err(e) => {
                        tracing::warn!(path = %self.path.display(), line_no = self.lines_read, "malformed record");
                        self.fail();
                        Err(e)
                    }
                };
            }

            let Some(source) = self.source.as_mut() else {
                self.state = State::Exhausted;
                tracing::debug!(
                    path = %self.path.display(),
                    records = self.records_read,
                    lines = self.lines_read,
                    "archive exhausted"
                );
                return Ok(None);
            };

            let n = match source.read(&mut self.chunk) {
                Ok(n) => n,
                Err(e) => {
                    self.fail();
                    return Err(e);
                }
            };
            if n > 0 {
                self.lines.feed(&self.chunk[..n], &mut self.queue);
                continue;
            }

            // Byte source is done: the unterminated tail, if any, is the last line.
            self.release_source();
            if let Some(tail) = self.lines.flush() {
                self.queue.push_back(tail);
            }
        }
    }

    /// Pull until a record satisfies `pred`, discarding the ones that do not.
    pub fn next_matching<F>(&mut self, mut pred: F) -> Result<Option<Record>, ArchiveError>
    where
        F: FnMut(&Record) -> bool,
    {
        while let Some(record) = self.next_record()? {
            if pred(&record) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Restart from the beginning of the archive. The previous handle is released
    /// before the archive is reopened.
    pub fn reset(&mut self) -> Result<(), ArchiveError> {
        self.release_source();
        self.lines.clear();
        self.queue.clear();
        self.lines_read = 0;
        self.records_read = 0;
        self.compressed_closed = 0;
        match ZstdSource::open(&self.path, self.opts.window_size_limit) {
            Ok(source) => {
                self.source = Some(source);
                self.state = State::Ready;
                tracing::debug!(path = %self.path.display(), "reader reset");
                Ok(())
            }
            Err(e) => {
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    /// Release the archive now instead of at drop. Later pulls return `Ok(None)`.
    pub fn close(&mut self) {
        self.release_source();
        self.lines.clear();
        self.queue.clear();
        if self.state == State::Ready {
            self.state = State::Exhausted;
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.opts
    }

    /// True once the sequence has ended, normally or after an error.
    pub fn is_exhausted(&self) -> bool {
        self.state != State::Ready
    }

    pub fn is_open(&self) -> bool {
        self.source.as_ref().is_some_and(ZstdSource::is_open)
    }

    /// Records produced since open or the last reset.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Lines consumed since open or the last reset.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Compressed bytes consumed since open or the last reset.
    pub fn compressed_bytes_read(&self) -> u64 {
        self.source
            .as_ref()
            .map_or(self.compressed_closed, ZstdSource::compressed_bytes_read)
    }

    fn release_source(&mut self) {
        if let Some(mut source) = self.source.take() {
            self.compressed_closed = source.compressed_bytes_read();
            source.close();
        }
    }

    fn fail(&mut self) {
        self.release_source();
        self.lines.clear();
        self.queue.clear();
        self.state = State::Failed;
    }
}

impl Iterator for ArchiveReader {
    type Item = Result<Record, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl FusedIterator for ArchiveReader {}
