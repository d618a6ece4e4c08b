//! Multi-archive ingestion: one independent reader per archive, at most `limit` in flight.
//! Readers are never shared between threads.

use crate::config::{BulkOptions, ReaderOptions};
use crate::paths::ArchiveFile;
use crate::progress::make_count_progress;
use crate::reader::ArchiveReader;
use crate::record::Record;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::PathBuf;

/// Run `handler` over every record of every archive. Returns `(path, records handled)`
/// in the order of `files`. The first failing archive aborts the run.
///
/// `bulk.stop_at` applies per archive; `bulk.reset_first` is moot since each archive
/// gets a fresh reader. With `bulk.progress`, one bar ticks per finished archive.
pub fn apply_each_archive<F>(
    files: &[ArchiveFile],
    limit: usize,
    reader_opts: &ReaderOptions,
    bulk: &BulkOptions,
    handler: F,
) -> Result<Vec<(PathBuf, u64)>>
where
    F: Sync + Fn(&ArchiveFile, Record) -> Result<()>,
{
    let per_file = BulkOptions { progress: false, reset_first: false, ..bulk.clone() };
    let pb = bulk
        .progress
        .then(|| make_count_progress(files.len() as u64, bulk.progress_label.as_deref().unwrap_or("archives")));

    let run_one = |file: &ArchiveFile| -> Result<(PathBuf, u64)> {
        let mut reader = ArchiveReader::open(&file.path, reader_opts.clone())?;
        let n = reader
            .apply(|record| handler(file, record), &per_file)
            .with_context(|| format!("processing {}", file.path.display()))?;
        tracing::info!(path = %file.path.display(), kind = %file.kind, records = n, "archive done");
        if let Some(pb) = &pb {
            pb.inc(1);
        }
        Ok((file.path.clone(), n))
    };

    let limit = limit.max(1);
    let mut out = Vec::with_capacity(files.len());
    if limit == 1 {
        for file in files {
            out.push(run_one(file)?);
        }
    } else {
        for chunk in files.chunks(limit) {
            let part: Vec<(PathBuf, u64)> = chunk.par_iter().map(|f| run_one(f)).collect::<Result<_>>()?;
            out.extend(part);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    Ok(out)
}
