use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Expands `~` and `~/rest` to the home directory.
    ///
    /// Anything else, including `~user` forms and paths when no home
    /// directory is known, is returned untouched.
    pub fn expand(&self, path: &str) -> PathBuf {
        match (path.strip_prefix('~'), &self.home) {
            (Some(""), Some(home)) => home.clone(),
            (Some(rest), Some(home)) if rest.starts_with('/') => {
                let mut home_path = home.clone();
                for part in rest.split('/').filter(|p| !p.is_empty()) {
                    home_path.push(part);
                }
                home_path
            }
            _ => Path::new(path).to_path_buf(),
        }
    }
}
