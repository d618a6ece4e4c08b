use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// What a dump file holds, judged by its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchiveKind {
    Comments,    // RC_YYYY-MM.zst
    Submissions, // RS_YYYY-MM.zst
    Subreddits,  // *subreddits*.zst
    Users,       // *authors*.zst / *users*.zst
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArchiveKind::Comments => "comments",
            ArchiveKind::Submissions => "submissions",
            ArchiveKind::Subreddits => "subreddits",
            ArchiveKind::Users => "users",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveFile {
    pub kind: ArchiveKind,
    pub month: Option<(u16, u8)>, // monthly RC/RS dumps only
    pub path: PathBuf,
}

fn monthly_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(RC|RS)_(\d{4})-(\d{2})\.zst$").expect("static regex"))
}

/// Classify a file name; `None` for anything that is not a recognized dump.
pub fn classify(name: &str) -> Option<(ArchiveKind, Option<(u16, u8)>)> {
    if let Some(caps) = monthly_re().captures(name) {
        let kind = if &caps[1] == "RC" { ArchiveKind::Comments } else { ArchiveKind::Submissions };
        let year: u16 = caps[2].parse().ok()?;
        let month: u8 = caps[3].parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        return Some((kind, Some((year, month))));
    }
    let lower = name.to_ascii_lowercase();
    if !lower.ends_with(".zst") {
        return None;
    }
    if lower.contains("subreddits") {
        Some((ArchiveKind::Subreddits, None))
    } else if lower.contains("authors") || lower.contains("users") {
        Some((ArchiveKind::Users, None))
    } else {
        None
    }
}

/// Find dump archives under `dir` (recursively), ordered by kind, then month, then path.
pub fn discover_archives(dir: &Path) -> Vec<ArchiveFile> {
    let mut out = Vec::new();
    if !dir.exists() {
        return out;
    }
    for ent in WalkDir::new(dir).min_depth(1).into_iter().flatten() {
        if !ent.file_type().is_file() {
            continue;
        }
        let Some(name) = ent.file_name().to_str() else { continue };
        if let Some((kind, month)) = classify(name) {
            out.push(ArchiveFile { kind, month, path: ent.path().to_path_buf() });
        }
    }
    out.sort_by(|a, b| (a.kind, a.month, &a.path).cmp(&(b.kind, b.month, &b.path)));
    out
}
