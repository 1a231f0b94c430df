use std::fs;
use std::path::{Path, PathBuf};

use rustyline::completion::Pair;

use crate::path::PathExpander;

#[derive(Clone, Default)]
pub struct PathCompleter {
    expander: PathExpander,
}

impl PathCompleter {
    pub fn new(expander: PathExpander) -> Self {
        Self { expander }
    }

    /// Completes the last path component of `incomplete`, looking it up
    /// relative to `base`.
    ///
    /// Replacements keep whatever directory prefix the user already typed.
    pub fn complete_path(&self, incomplete: &str, base: &Path) -> Vec<Pair> {
        let (typed_dir, file_prefix) = match incomplete.rfind('/') {
            Some(idx) => incomplete.split_at(idx + 1),
            None => ("", incomplete),
        };

        let dir_to_search: PathBuf = if typed_dir.is_empty() {
            base.to_path_buf()
        } else {
            base.join(self.expander.expand(typed_dir))
        };

        let Ok(entries) = fs::read_dir(&dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                // Hidden entries only when explicitly asked for
                if name.starts_with('.') && !file_prefix.starts_with('.') {
                    return None;
                }
                Some(Self::completion_pair(typed_dir, &name, entry.path().is_dir()))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn completion_pair(typed_dir: &str, name: &str, is_dir: bool) -> Pair {
        if is_dir {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}{}/", typed_dir, name),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{}{} ", typed_dir, name),
            }
        }
    }
}
