use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod builtin;
mod chmod;
mod files;
mod navigation;
mod search;

pub use builtin::{ExitCommand, HelpCommand, HELP_TEXT};
pub use chmod::{ChmodCommand, UNSUPPORTED_NOTICE};
pub use files::{CopyCommand, MkdirCommand, MoveCommand, RemoveCommand};
pub use navigation::{CdCommand, LsCommand, PwdCommand};
pub use search::SearchCommand;

use crate::core::platform::PermissionControl;
use crate::core::state::Session;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type 'help' for list.")]
    NotFound(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid mode '{0}': expected an octal value between 0 and 7777")]
    InvalidMode(String),

    /// An OS call on `path` failed.
    #[error("{}: {source}", .path.display())]
    Fs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl CommandError {
    /// Adapter for `map_err` that tags an I/O failure with the path involved.
    pub(crate) fn at(path: &Path) -> impl FnOnce(io::Error) -> CommandError {
        let path = path.to_path_buf();
        move |source| CommandError::Fs { path, source }
    }
}

/// What the loop should do after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait Command {
    /// Runs the command with everything after the command name.
    ///
    /// Regular output goes to `out`; failures are returned, never printed.
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Help(HelpCommand),
    Pwd(PwdCommand),
    Ls(LsCommand),
    Cd(CdCommand),
    Cp(CopyCommand),
    Mv(MoveCommand),
    Rm(RemoveCommand),
    Mkdir(MkdirCommand),
    Search(SearchCommand),
    Chmod(ChmodCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        match self {
            CommandType::Help(cmd) => cmd.execute(session, args, out),
            CommandType::Pwd(cmd) => cmd.execute(session, args, out),
            CommandType::Ls(cmd) => cmd.execute(session, args, out),
            CommandType::Cd(cmd) => cmd.execute(session, args, out),
            CommandType::Cp(cmd) => cmd.execute(session, args, out),
            CommandType::Mv(cmd) => cmd.execute(session, args, out),
            CommandType::Rm(cmd) => cmd.execute(session, args, out),
            CommandType::Mkdir(cmd) => cmd.execute(session, args, out),
            CommandType::Search(cmd) => cmd.execute(session, args, out),
            CommandType::Chmod(cmd) => cmd.execute(session, args, out),
            CommandType::Exit(cmd) => cmd.execute(session, args, out),
        }
    }
}

/// Registry of every command the shell understands, keyed by name.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
}

impl CommandExecutor {
    pub fn new(permissions: Option<Arc<dyn PermissionControl>>) -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("help", CommandType::Help(HelpCommand));
        commands.insert("pwd", CommandType::Pwd(PwdCommand));
        commands.insert("ls", CommandType::Ls(LsCommand));
        commands.insert("cd", CommandType::Cd(CdCommand));
        commands.insert("cp", CommandType::Cp(CopyCommand));
        commands.insert("mv", CommandType::Mv(MoveCommand));
        commands.insert("rm", CommandType::Rm(RemoveCommand));
        commands.insert("mkdir", CommandType::Mkdir(MkdirCommand));
        commands.insert("search", CommandType::Search(SearchCommand));
        commands.insert("chmod", CommandType::Chmod(ChmodCommand::new(permissions)));
        commands.insert("exit", CommandType::Exit(ExitCommand));

        Self { commands }
    }

    pub fn execute(
        &self,
        session: &mut Session,
        command: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        match self.commands.get(command) {
            Some(cmd) => {
                tracing::debug!(command, ?args, "dispatching");
                cmd.execute(session, args, out)
            }
            None => Err(CommandError::NotFound(command.to_string())),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Runs `cmd` and returns its result along with whatever it printed.
    pub fn run(
        cmd: &dyn Command,
        session: &mut Session,
        list: &[&str],
    ) -> (Result<Flow, CommandError>, String) {
        let mut out = Vec::new();
        let result = cmd.execute(session, &args(list), &mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }
}
