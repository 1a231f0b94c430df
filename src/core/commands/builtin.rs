use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::state::Session;

pub const HELP_TEXT: &str = "\
================= COMMANDS =================
 ls [path]         : List directory contents
 cd <dir>          : Change directory
 pwd               : Show current directory
 cp <src> <dst>    : Copy file
 mv <src> <dst>    : Move/Rename file
 rm [-r] <path>    : Delete file/dir (-r for recursive)
 mkdir <dir>       : Create directory
 search <pattern>  : Search filenames recursively
 chmod <mode> <f>  : Change permissions (Unix only)
 help              : Show this help
 exit              : Quit program
============================================
";

#[derive(Debug, Clone, Copy, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(
        &self,
        _session: &mut Session,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        out.write_all(HELP_TEXT.as_bytes())?;
        Ok(Flow::Continue)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(
        &self,
        _session: &mut Session,
        _args: &[String],
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        Ok(Flow::Exit)
    }
}
