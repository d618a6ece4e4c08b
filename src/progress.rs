//! Progress reporting: a byte-based bar over the compressed archive, advanced from the
//! reader's compressed-bytes counter, plus a per-archive count bar for multi-archive runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;

const BYTES_TEMPLATE: &str = "{spinner:.green} {msg} {bytes:>10}/{total_bytes:<10} [{bar:.cyan/blue}] {percent:>3}%  \
     {bytes_per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}";

pub fn make_progress_bar_labeled(total_bytes: u64, label: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    let style = ProgressStyle::with_template(BYTES_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if let Some(msg) = label {
        pb.set_message(msg.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

const COUNT_TEMPLATE: &str = "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
     it/s: {per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}";

/// Count-style progress bar (items processed out of total), with an optional label.
pub fn make_count_progress(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(COUNT_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Tracks one bulk run. Disabled scopes draw nothing.
pub struct ArchiveProgress {
    pb: Option<ProgressBar>,
    last: u64,
    records: u64,
}

impl ArchiveProgress {
    pub fn new(enabled: bool, path: &Path, label: Option<&str>) -> Self {
        let pb = enabled.then(|| {
            let total = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            let fallback = path.file_name().and_then(|n| n.to_str());
            make_progress_bar_labeled(total, label.or(fallback))
        });
        Self { pb, last: 0, records: 0 }
    }

    /// Advance to the reader's current compressed position after one more record.
    #[inline]
    pub fn record(&mut self, compressed_now: u64) {
        self.records += 1;
        if let Some(pb) = &self.pb {
            if compressed_now > self.last {
                pb.inc(compressed_now - self.last);
                self.last = compressed_now;
            }
        }
    }

    pub fn finish(self) {
        if let Some(pb) = self.pb {
            pb.finish_with_message(format!("{} records", self.records));
        }
    }
}
