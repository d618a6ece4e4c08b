#[path = "common/mod.rs"]
mod common;

use common::*;
use redarch::schema::{Submission, SubredditRow};
use redarch::{
    apply_each_archive, discover_archives, quick_validate_zst, validate_zst_full, ArchiveKind,
    ArchiveReader, BulkOptions, ReaderOptions,
};
use serde_json::json;
use std::sync::Mutex;

/// Builds a small corpus: one RC month, one RS month and a subreddits dump.
/// Multi-archive apply counts every record per archive, in discovery order.
#[test]
fn apply_each_archive_counts_per_file() {
    let (dir, _rc) = make_comment_archive();
    write_zst_lines(&dir.path().join("submissions").join("RS_2006-01.zst"), &generated_lines(5));
    write_zst_lines(&dir.path().join("reddit_subreddits.zst"), &generated_lines(2));

    let files = discover_archives(dir.path());
    let kinds: Vec<_> = files.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![ArchiveKind::Comments, ArchiveKind::Submissions, ArchiveKind::Subreddits]);

    let authors = Mutex::new(Vec::new());
    let counts = apply_each_archive(&files, 3, &ReaderOptions::default(), &BulkOptions::new(), |file, rec| {
        if file.kind == ArchiveKind::Comments {
            authors.lock().unwrap().push(rec["author"].as_str().unwrap_or_default().to_string());
        }
        Ok(())
    })
    .unwrap();

    let n: Vec<u64> = counts.iter().map(|(_, n)| *n).collect();
    assert_eq!(n, vec![3, 5, 2]);
    let mut authors = authors.into_inner().unwrap();
    authors.sort();
    assert_eq!(authors, vec!["alice", "charlie", "zoë"]);
}

/// `stop_at` applies to each archive separately.
#[test]
fn apply_each_archive_honors_per_archive_limit() {
    let dir = tempfile::tempdir().unwrap();
    write_zst_lines(&dir.path().join("RC_2006-01.zst"), &generated_lines(10));
    write_zst_lines(&dir.path().join("RC_2006-02.zst"), &generated_lines(1));

    let files = discover_archives(dir.path());
    let counts = apply_each_archive(
        &files,
        1,
        &ReaderOptions::default().with_chunk_size(32),
        &BulkOptions::new().with_stop_at(Some(4)),
        |_, _| Ok(()),
    )
    .unwrap();
    let n: Vec<u64> = counts.iter().map(|(_, n)| *n).collect();
    assert_eq!(n, vec![4, 1]);
}

/// A corrupt month (plain text named like a dump) fails both integrity modes and
/// aborts a multi-archive run with the offending path in the error chain.
#[test]
fn corrupt_month_is_detected() {
    let (dir, good) = make_comment_archive();
    let bad = dir.path().join("comments").join("RC_2006-02.zst");
    std::fs::write(&bad, "{\"id\":\"bad\",\"author\":\"mallory\"}\n").unwrap();

    assert!(quick_validate_zst(&good, 64 * 1024, 1 << 31).is_ok());
    assert!(validate_zst_full(&good, 1 << 31).is_ok());
    assert!(quick_validate_zst(&bad, 64 * 1024, 1 << 31).is_err());
    assert!(validate_zst_full(&bad, 1 << 31).is_err());

    let files = discover_archives(dir.path());
    let err = apply_each_archive(&files, 2, &ReaderOptions::default(), &BulkOptions::new(), |_, _| Ok(()))
        .unwrap_err();
    assert!(format!("{err:#}").contains("RC_2006-02.zst"));
}

/// Schema collaborators project typed rows from generic records.
#[test]
fn sample_into_typed_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let rs = dir.path().join("RS_2006-01.zst");
    write_zst_lines(
        &rs,
        &[
            json!({"is_self":false, "created_utc":1136073600, "selftext":"", "title":"Rust news",
                   "score":183, "permalink":"/r/programming/comments/s1/", "over_18":false,
                   "num_comments":10, "id":"s1", "media_embed":{}, "edited":false,
                   "thumbnail":"default", "subreddit":"programming"}).to_string(),
            json!({"is_self":true, "created_utc":"1136073601", "selftext":"body", "title":"Ask",
                   "score":1, "permalink":"/r/programming/comments/s2/", "over_18":false,
                   "num_comments":0, "id":"s2", "media_embed":{}, "edited":1136080000,
                   "thumbnail":"self"}).to_string(),
        ],
    );
    let mut reader = ArchiveReader::open_default(&rs).unwrap();
    let subs = reader.sample(Submission::from_record, &BulkOptions::new()).unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].subreddit.as_deref(), Some("programming"));
    assert_eq!(subs[1].created_at().unwrap().unix_timestamp(), 1136073601);

    let srs = dir.path().join("reddit_subreddits.zst");
    write_zst_lines(
        &srs,
        &[json!({"created_utc":1137537905.0, "name":"t5_6", "display_name":"reddit.com",
                 "title":"reddit.com", "public_description":"", "lang":"en", "over18":false}).to_string()],
    );
    let mut reader = ArchiveReader::open_default(&srs).unwrap();
    let rows = reader.sample(SubredditRow::from_record, &BulkOptions::new()).unwrap();
    assert_eq!(rows[0].guid, "t5_6");
    assert_eq!(rows[0].url(), "https://old.reddit.com/r/reddit.com");
}
