//! Bulk operations over a reader: `sample` collects parsed records, `apply` runs a
//! handler for its side effect. Both pull through `next_record`, so they share the
//! stop-count rule: with `stop_at = Some(k)` exactly the first k remaining records
//! are processed and no record past them is pulled.

use crate::config::BulkOptions;
use crate::progress::ArchiveProgress;
use crate::reader::ArchiveReader;
use crate::record::Record;
use anyhow::{Context, Result};

impl ArchiveReader {
    /// Pull records, map each through `parser`, and collect the results in order.
    /// Stops at `opts.stop_at` or at the end of the archive, whichever comes first.
    ///
    /// Stopping at the limit leaves the archive open so a later call can continue;
    /// call [`close`](ArchiveReader::close) when no further reads will follow.
    pub fn sample<T, F>(&mut self, mut parser: F, opts: &BulkOptions) -> Result<Vec<T>>
    where
        F: FnMut(Record) -> Result<T>,
    {
        let capacity = opts.stop_at.map_or(0, |n| n.min(1 << 16) as usize);
        let mut out = Vec::with_capacity(capacity);
        self.drive(opts, |record| {
            out.push(parser(record)?);
            Ok(())
        })?;
        Ok(out)
    }

    /// Pull records and hand each to `handler`. Returns how many were handled.
    ///
    /// Same stopping rule as `sample`: after an early stop the archive stays open
    /// until [`close`](ArchiveReader::close) or drop.
    pub fn apply<F>(&mut self, handler: F, opts: &BulkOptions) -> Result<u64>
    where
        F: FnMut(Record) -> Result<()>,
    {
        self.drive(opts, handler)
    }

    fn drive<F>(&mut self, opts: &BulkOptions, mut on_record: F) -> Result<u64>
    where
        F: FnMut(Record) -> Result<()>,
    {
        if opts.reset_first {
            self.reset()?;
        }
        let mut progress = ArchiveProgress::new(opts.progress, self.path(), opts.progress_label.as_deref());

        let mut count: u64 = 0;
        while !opts.reached(count) {
            let Some(record) = self.next_record()? else {
                break;
            };
            on_record(record)
                .with_context(|| format!("handling record {} of {}", count + 1, self.path().display()))?;
            count += 1;
            progress.record(self.compressed_bytes_read());
        }

        if opts.reached(count) {
            tracing::debug!(path = %self.path().display(), count, "stop count reached");
        }
        progress.finish();
        Ok(count)
    }
}
