//! Directory reading helpers shared by `ls` and `search`.

use std::fmt;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "FILE"),
            EntryKind::Dir => write!(f, "DIR "),
        }
    }
}

/// A single row of an `ls` listing.
///
/// Directories and anything that is not a regular file report a size of
/// `0`. Broken symlinks are listed as files with no timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl EntryInfo {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Follow symlinks like a plain stat would, falling back to the link
        // itself when its target is gone.
        match fs::metadata(path).or_else(|_| fs::symlink_metadata(path)) {
            Ok(meta) => Self::with_metadata(name, &meta),
            Err(_) => Self {
                name,
                kind: EntryKind::File,
                size: 0,
                modified: None,
            },
        }
    }

    fn with_metadata(name: String, meta: &Metadata) -> Self {
        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };

        Self {
            name,
            kind,
            size: if meta.is_file() { meta.len() } else { 0 },
            modified: meta.modified().ok(),
        }
    }
}

impl fmt::Display for EntryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp = self
            .modified
            .map(format_timestamp)
            .unwrap_or_else(|| "-".repeat(19));
        write!(f, "{} {:>10} {} {}", self.kind, self.size, stamp, self.name)
    }
}

pub fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format(TIMESTAMP_FORMAT).to_string()
}

/// Reads the immediate children of `dir`, sorted by name.
///
/// Entries that vanish or cannot be read mid-iteration are skipped.
pub fn read_entries(dir: &Path) -> io::Result<Vec<EntryInfo>> {
    let mut entries: Vec<EntryInfo> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| EntryInfo::from_path(&entry.path()))
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Result of a recursive name search.
#[derive(Debug, Default)]
pub struct SearchResult {
    pub matches: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, io::Error)>,
}

/// Walks `root` depth-first and collects every path whose file name contains
/// `pattern`.
///
/// Parents are visited before their children and siblings in name order.
/// Symlinked directories are reported if they match but never descended.
/// Only a failure to read `root` itself is an error; unreadable directories
/// further down end up in [`SearchResult::skipped`].
pub fn search_names(root: &Path, pattern: &str) -> io::Result<SearchResult> {
    let mut result = SearchResult::default();
    let children = sorted_children(root)?;
    walk(children, pattern, &mut result);
    Ok(result)
}

fn walk(children: Vec<fs::DirEntry>, pattern: &str, result: &mut SearchResult) {
    for entry in children {
        let path = entry.path();

        if entry.file_name().to_string_lossy().contains(pattern) {
            result.matches.push(path.clone());
        }

        // file_type() does not follow symlinks
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }

        match sorted_children(&path) {
            Ok(grandchildren) => walk(grandchildren, pattern, result),
            Err(e) => result.skipped.push((path, e)),
        }
    }
}

fn sorted_children(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut children: Vec<fs::DirEntry> = fs::read_dir(dir)?.filter_map(Result::ok).collect();
    children.sort_by_key(|entry| entry.file_name());
    Ok(children)
}
