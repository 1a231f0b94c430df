use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::path::PathExpander;

/// Per-shell state that survives between commands.
///
/// The current directory is always absolute and canonical. Only `cd`
/// replaces it; the process working directory is never touched.
#[derive(Debug, Clone)]
pub struct Session {
    current_dir: PathBuf,
    expander: PathExpander,
}

impl Session {
    pub fn new() -> io::Result<Self> {
        Self::at(env::current_dir()?)
    }

    /// Starts a session in `dir`, which must be an existing directory.
    pub fn at(dir: impl AsRef<Path>) -> io::Result<Self> {
        let current_dir = dir.as_ref().canonicalize()?;
        if !current_dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", current_dir.display()),
            ));
        }

        Ok(Self {
            current_dir,
            expander: PathExpander::new(),
        })
    }

    pub fn with_expander(mut self, expander: PathExpander) -> Self {
        self.expander = expander;
        self
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Turns a user-supplied path argument into a path rooted at the
    /// current directory.
    pub fn resolve(&self, arg: &str) -> PathBuf {
        self.current_dir.join(self.expander.expand(arg))
    }

    pub(crate) fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_is_canonical() -> io::Result<()> {
        let temp = TempDir::new()?;
        let nested = temp.path().join("a");
        std::fs::create_dir(&nested)?;

        let session = Session::at(nested.join(".."))?;
        assert_eq!(session.current_dir(), temp.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn test_session_rejects_file() -> io::Result<()> {
        let temp = TempDir::new()?;
        let file = temp.path().join("f");
        std::fs::write(&file, b"x")?;
        assert!(Session::at(&file).is_err());
        Ok(())
    }

    #[test]
    fn test_resolve_relative_and_absolute() -> io::Result<()> {
        let temp = TempDir::new()?;
        let session = Session::at(temp.path())?;
        let base = temp.path().canonicalize()?;

        assert_eq!(session.resolve("x/y"), base.join("x/y"));
        assert_eq!(session.resolve("/etc"), PathBuf::from("/etc"));
        Ok(())
    }

    #[test]
    fn test_resolve_expands_home() -> io::Result<()> {
        let temp = TempDir::new()?;
        let session =
            Session::at(temp.path())?.with_expander(PathExpander::with_home("/home/someone"));
        assert_eq!(session.resolve("~/notes"), PathBuf::from("/home/someone/notes"));
        Ok(())
    }
}
