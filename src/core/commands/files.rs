use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::{Command, CommandError, Flow};
use crate::core::state::Session;

/// `symlink_metadata` that maps a missing path to [`CommandError::PathNotFound`].
fn stat(path: &Path) -> Result<fs::Metadata, CommandError> {
    fs::symlink_metadata(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CommandError::PathNotFound(path.to_path_buf())
        } else {
            CommandError::at(path)(e)
        }
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyCommand;

impl Command for CopyCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let [src, dst, ..] = args else {
            return Err(CommandError::Usage("cp <src> <dst>"));
        };
        let (src, dst) = (session.resolve(src), session.resolve(dst));

        if !src.exists() {
            return Err(CommandError::PathNotFound(src));
        }

        // fs::copy truncates an existing destination
        fs::copy(&src, &dst).map_err(|source| CommandError::Fs {
            path: copy_culprit(&src, &dst).to_path_buf(),
            source,
        })?;
        Ok(Flow::Continue)
    }
}

/// Picks the side of a failed copy to name in the error: the source when it
/// cannot be read as a regular file, the destination otherwise.
fn copy_culprit<'a>(src: &'a Path, dst: &'a Path) -> &'a Path {
    if src.is_file() && fs::File::open(src).is_ok() {
        dst
    } else {
        src
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveCommand;

impl Command for MoveCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let [src, dst, ..] = args else {
            return Err(CommandError::Usage("mv <src> <dst>"));
        };
        let (src, dst) = (session.resolve(src), session.resolve(dst));

        stat(&src)?;
        fs::rename(&src, &dst).map_err(CommandError::at(&src))?;
        Ok(Flow::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveCommand;

impl RemoveCommand {
    const USAGE: &'static str = "rm [-r] <path>";
}

impl Command for RemoveCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        // -r only counts as a flag in first position
        let (recursive, target) = match args {
            [flag, target, ..] if flag == "-r" => (true, target),
            [flag] if flag == "-r" => return Err(CommandError::Usage(Self::USAGE)),
            [target, ..] => (false, target),
            [] => return Err(CommandError::Usage(Self::USAGE)),
        };
        let path = session.resolve(target);
        let meta = stat(&path)?;

        let result = match (meta.is_dir(), recursive) {
            (true, true) => fs::remove_dir_all(&path),
            (true, false) => fs::remove_dir(&path),
            (false, _) => fs::remove_file(&path),
        };
        result.map_err(CommandError::at(&path))?;
        Ok(Flow::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let target = args.first().ok_or(CommandError::Usage("mkdir <dir>"))?;
        let path = session.resolve(target);

        fs::create_dir(&path).map_err(CommandError::at(&path))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::testing::run;
    use tempfile::TempDir;

    fn setup() -> io::Result<(Session, TempDir)> {
        let temp = TempDir::new()?;
        let session = Session::at(temp.path())?;
        Ok((session, temp))
    }

    fn nested_tree(root: &Path) -> io::Result<()> {
        fs::create_dir_all(root.join("d/inner/deeper"))?;
        fs::write(root.join("d/top.txt"), b"top")?;
        fs::write(root.join("d/inner/deeper/leaf.bin"), [0u8, 1, 2, 3])?;
        Ok(())
    }

    #[test]
    fn test_cp_copies_and_overwrites() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        let a = temp.path().join("A");
        let b = temp.path().join("B");
        fs::write(&a, b"first contents")?;

        let (result, _) = run(&CopyCommand, &mut session, &["A", "B"]);
        assert!(result.is_ok());
        assert_eq!(fs::read(&a)?, fs::read(&b)?);

        fs::write(&a, b"second")?;
        let (result, _) = run(&CopyCommand, &mut session, &["A", "B"]);
        assert!(result.is_ok());
        assert_eq!(fs::read(&b)?, b"second");
        Ok(())
    }

    #[test]
    fn test_cp_missing_source() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        let (result, _) = run(&CopyCommand, &mut session, &["ghost", "B"]);
        assert!(matches!(result, Err(CommandError::PathNotFound(_))));
        assert!(!temp.path().join("B").exists());
        Ok(())
    }

    #[test]
    fn test_cp_directory_source_fails() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        fs::create_dir(temp.path().join("dir"))?;
        let (result, _) = run(&CopyCommand, &mut session, &["dir", "copy"]);
        let src = session.current_dir().join("dir");
        assert!(matches!(result, Err(CommandError::Fs { ref path, .. }) if *path == src));
        Ok(())
    }

    #[test]
    fn test_cp_bad_destination_names_destination() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        fs::write(temp.path().join("A"), b"data")?;

        let (result, _) = run(&CopyCommand, &mut session, &["A", "nodir/B"]);
        let Err(err) = result else {
            panic!("copy into a missing directory should fail");
        };
        let dst = session.current_dir().join("nodir/B");
        assert!(matches!(err, CommandError::Fs { ref path, .. } if *path == dst));
        assert!(err.to_string().starts_with(&format!("{}: ", dst.display())));
        Ok(())
    }

    #[test]
    fn test_cp_usage() -> io::Result<()> {
        let (mut session, _temp) = setup()?;
        let (result, _) = run(&CopyCommand, &mut session, &["only-one"]);
        assert!(matches!(result, Err(CommandError::Usage(_))));
        Ok(())
    }

    #[test]
    fn test_mv_renames() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        fs::write(temp.path().join("old"), b"payload")?;

        let (result, _) = run(&MoveCommand, &mut session, &["old", "new"]);
        assert!(result.is_ok());
        assert!(!temp.path().join("old").exists());
        assert_eq!(fs::read(temp.path().join("new"))?, b"payload");
        Ok(())
    }

    #[test]
    fn test_mv_missing_source() -> io::Result<()> {
        let (mut session, _temp) = setup()?;
        let (result, _) = run(&MoveCommand, &mut session, &["ghost", "new"]);
        assert!(matches!(result, Err(CommandError::PathNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_rm_recursive_removes_tree() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        nested_tree(temp.path())?;

        let (result, _) = run(&RemoveCommand, &mut session, &["-r", "d"]);
        assert!(result.is_ok());
        assert!(!temp.path().join("d").exists());
        Ok(())
    }

    #[test]
    fn test_rm_non_empty_dir_without_flag() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        nested_tree(temp.path())?;

        let (result, _) = run(&RemoveCommand, &mut session, &["d"]);
        assert!(matches!(result, Err(CommandError::Fs { .. })));
        assert!(temp.path().join("d/top.txt").exists());
        assert!(temp.path().join("d/inner/deeper/leaf.bin").exists());
        Ok(())
    }

    #[test]
    fn test_rm_file_and_empty_dir() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        fs::write(temp.path().join("f"), b"")?;
        fs::create_dir(temp.path().join("empty"))?;

        assert!(run(&RemoveCommand, &mut session, &["f"]).0.is_ok());
        assert!(run(&RemoveCommand, &mut session, &["empty"]).0.is_ok());
        assert!(!temp.path().join("f").exists());
        assert!(!temp.path().join("empty").exists());
        Ok(())
    }

    #[test]
    fn test_rm_recursive_on_file() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        fs::write(temp.path().join("f"), b"")?;
        assert!(run(&RemoveCommand, &mut session, &["-r", "f"]).0.is_ok());
        assert!(!temp.path().join("f").exists());
        Ok(())
    }

    #[test]
    fn test_rm_flag_only_in_first_position() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        nested_tree(temp.path())?;

        // "d" is the target, "-r" is ignored as an extra argument
        let (result, _) = run(&RemoveCommand, &mut session, &["d", "-r"]);
        assert!(matches!(result, Err(CommandError::Fs { .. })));
        assert!(temp.path().join("d").exists());
        Ok(())
    }

    #[test]
    fn test_rm_missing_and_usage() -> io::Result<()> {
        let (mut session, _temp) = setup()?;
        let (result, _) = run(&RemoveCommand, &mut session, &["ghost"]);
        assert!(matches!(result, Err(CommandError::PathNotFound(_))));

        assert!(matches!(
            run(&RemoveCommand, &mut session, &[]).0,
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(
            run(&RemoveCommand, &mut session, &["-r"]).0,
            Err(CommandError::Usage(_))
        ));
        Ok(())
    }

    #[test]
    fn test_mkdir_single_level() -> io::Result<()> {
        let (mut session, temp) = setup()?;
        assert!(run(&MkdirCommand, &mut session, &["made"]).0.is_ok());
        assert!(temp.path().join("made").is_dir());
        Ok(())
    }

    #[test]
    fn test_mkdir_reports_failures() -> io::Result<()> {
        let (mut session, temp) = setup()?;

        let (result, _) = run(&MkdirCommand, &mut session, &["missing/parent"]);
        assert!(matches!(result, Err(CommandError::Fs { .. })));
        assert!(!temp.path().join("missing").exists());

        fs::create_dir(temp.path().join("exists"))?;
        let (result, _) = run(&MkdirCommand, &mut session, &["exists"]);
        assert!(
            matches!(result, Err(CommandError::Fs { ref source, .. }) if source.kind() == io::ErrorKind::AlreadyExists)
        );
        Ok(())
    }
}
