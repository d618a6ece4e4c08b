#![allow(dead_code)]

use serde_json::json;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Compress `raw` bytes into a `.zst` archive at `path`.
pub fn write_zst_bytes(path: &Path, raw: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    enc.write_all(raw).unwrap();
    enc.finish().unwrap();
}

/// Write JSONL lines, each terminated by `\n`, as a `.zst` archive.
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    let mut raw = Vec::new();
    for l in lines {
        raw.extend_from_slice(l.as_bytes());
        raw.push(b'\n');
    }
    write_zst_bytes(path, &raw);
}

/// Tiny monthly comments dump mirroring the RC_ files: c1..c3 in r/programming,
/// with nested objects, nulls and a multi-byte author name.
pub fn comment_lines() -> Vec<String> {
    vec![
        json!({
            "id":"c1", "author":"alice", "body":"I love Rust http://rust-lang.org",
            "subreddit":"programming", "parent_id":"t3_s1", "score":2, "edited":false,
            "distinguished":null, "created_utc":1136074600, "gildings":{"gid_1":0}
        }).to_string(),
        json!({
            "id":"c2", "author":"charlie", "body":"reply to alice\nwith an escaped newline",
            "subreddit":"programming", "parent_id":"t1_c1", "score":5, "edited":1136074900,
            "distinguished":null, "created_utc":1136074700, "all_awardings":[]
        }).to_string(),
        json!({
            "id":"c3", "author":"zoë", "body":"[deleted msg]",
            "subreddit":"programming", "parent_id":"t3_s1", "score":-1, "edited":false,
            "distinguished":"moderator", "created_utc":1136074800, "ratio":0.25
        }).to_string(),
    ]
}

/// Create a base dir holding `comments/RC_2006-01.zst` built from `comment_lines()`.
pub fn make_comment_archive() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments").join("RC_2006-01.zst");
    write_zst_lines(&path, &comment_lines());
    (dir, path)
}

/// `n` generated records of varying length, so lines straddle chunk boundaries unevenly.
pub fn generated_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            json!({"id": format!("r{i}"), "n": i, "pad": "x".repeat(i * 7 % 53)}).to_string()
        })
        .collect()
}

pub fn parse_lines(lines: &[String]) -> Vec<redarch::Record> {
    lines.iter().map(|l| serde_json::from_str(l).unwrap()).collect()
}
