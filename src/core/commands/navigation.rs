use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::fs::read_entries;
use crate::core::state::Session;

#[derive(Debug, Clone, Copy, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(
        &self,
        session: &mut Session,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        writeln!(out, "{}", session.current_dir().display())?;
        Ok(Flow::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let target = args.first().ok_or(CommandError::Usage("cd <dir>"))?;
        let path = session.resolve(target);

        if !path.is_dir() {
            return Err(CommandError::DirectoryNotFound(path));
        }

        let canonical = path.canonicalize().map_err(CommandError::at(&path))?;
        tracing::info!(dir = %canonical.display(), "changed directory");
        session.set_current_dir(canonical);
        Ok(Flow::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LsCommand;

impl Command for LsCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let path = match args.first() {
            Some(arg) => session.resolve(arg),
            None => session.current_dir().to_path_buf(),
        };

        if !path.exists() {
            return Err(CommandError::PathNotFound(path));
        }
        if !path.is_dir() {
            return Err(CommandError::NotADirectory(path));
        }

        for entry in read_entries(&path).map_err(CommandError::at(&path))? {
            writeln!(out, "{}", entry)?;
        }
        Ok(Flow::Continue)
    }
}
