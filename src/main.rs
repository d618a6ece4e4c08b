use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use redarch::{
    apply_each_archive, discover_archives, init_tracing_once, quick_validate_zst, validate_zst_full,
    ArchiveReader, BulkOptions, ReaderOptions, DEFAULT_CHUNK_SIZE, DEFAULT_WINDOW_SIZE_LIMIT,
};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Parser, Debug)]
#[command(name = "redarch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Decompressed bytes requested per read
    #[arg(long, global = true, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Largest zstd window accepted, in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW_SIZE_LIMIT)]
    window_size_limit: u64,

    /// Show a progress bar
    #[arg(long, global = true)]
    progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the first records of an archive as JSON lines
    Sample {
        archive: PathBuf,
        #[arg(short, default_value_t = 10)]
        n: u64,
    },
    /// Count records in an archive, or in every dump under a directory
    Count {
        path: PathBuf,
        /// Archives decoded at once when `path` is a directory
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
    },
    /// Check that archives decompress cleanly
    Check {
        path: PathBuf,
        /// Decode whole archives instead of a prefix
        #[arg(long)]
        full: bool,
        /// Decompressed bytes decoded per archive in quick mode
        #[arg(long, default_value_t = 64 * 1024 * 1024)]
        sample_bytes: u64,
    },
}

fn main() -> Result<()> {
    init_tracing_once();
    let cli = Cli::parse();
    let reader_opts = ReaderOptions::default()
        .with_chunk_size(cli.chunk_size)
        .with_window_size_limit(cli.window_size_limit);

    match cli.command {
        Command::Sample { archive, n } => {
            let mut reader = ArchiveReader::open(&archive, reader_opts)?;
            let opts = BulkOptions::new().with_progress(cli.progress).with_stop_at(Some(n));
            let mut out = BufWriter::new(io::stdout().lock());
            reader.apply(
                |record| {
                    serde_json::to_writer(&mut out, &record)?;
                    out.write_all(b"\n")?;
                    Ok(())
                },
                &opts,
            )?;
            out.flush()?;
        }
        Command::Count { path, jobs } => {
            let opts = BulkOptions::new().with_progress(cli.progress);
            if path.is_dir() {
                let files = discover_archives(&path);
                if files.is_empty() {
                    bail!("no dump archives found under {}", path.display());
                }
                let total = AtomicU64::new(0);
                let per_file = apply_each_archive(&files, jobs, &reader_opts, &opts, |_, _| {
                    total.fetch_add(1, Ordering::Relaxed);
                    Ok(())
                })?;
                for (p, n) in per_file {
                    println!("{}\t{}", n, p.display());
                }
                println!("{}\ttotal", total.load(Ordering::Relaxed));
            } else {
                let mut reader = ArchiveReader::open(&path, reader_opts)?;
                let n = reader.apply(|_| Ok(()), &opts)?;
                println!("{}", n);
            }
        }
        Command::Check { path, full, sample_bytes } => {
            let targets: Vec<PathBuf> = if path.is_dir() {
                discover_archives(&path).into_iter().map(|f| f.path).collect()
            } else {
                vec![path]
            };
            let bad = check_all(&targets, full, sample_bytes, cli.window_size_limit);
            if bad > 0 {
                bail!("{} of {} archives failed the integrity check", bad, targets.len());
            }
            println!("{} archives ok", targets.len());
        }
    }
    Ok(())
}

fn check_all(targets: &[PathBuf], full: bool, sample_bytes: u64, window: u64) -> usize {
    let check = |p: &Path| {
        if full {
            validate_zst_full(p, window)
        } else {
            quick_validate_zst(p, sample_bytes, window)
        }
    };
    let mut bad = 0;
    for p in targets {
        if let Err(e) = check(p) {
            eprintln!("FAILED {}: {}", p.display(), e);
            tracing::warn!(path = %p.display(), error = %e, "integrity check failed");
            bad += 1;
        }
    }
    bad
}
