mod command;
mod path;

use std::borrow::Cow;
use std::path::PathBuf;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use crate::highlight::SyntaxHighlighter;
use crate::path::PathExpander;

pub use command::CommandCompleter;
pub use path::PathCompleter;

/// Line-editor helper: completion for commands and paths plus coloring.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
    current_dir: PathBuf,
}

impl ShellCompleter {
    pub fn new<'a>(
        commands: impl IntoIterator<Item = &'a str>,
        highlighter: SyntaxHighlighter,
        current_dir: PathBuf,
    ) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(commands),
            path_completer: PathCompleter::new(PathExpander::new()),
            highlighter,
            current_dir,
        }
    }

    /// Path completion follows the session, not the process directory.
    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }

    fn candidates(&self, line_up_to_cursor: &str, pos: usize) -> (usize, Vec<Pair>) {
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();
        if line_up_to_cursor.ends_with(char::is_whitespace) {
            words.push("");
        }

        match words.as_slice() {
            [] => (0, self.command_completer.complete_command("")),
            [word] => {
                let start = line_up_to_cursor.rfind(word).unwrap_or(0);
                (start, self.command_completer.complete_command(word))
            }
            [.., last] => {
                let start = if last.is_empty() {
                    pos
                } else {
                    line_up_to_cursor.rfind(last).unwrap_or(pos)
                };
                (start, self.path_completer.complete_path(last, &self.current_dir))
            }
        }
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        match prompt.strip_suffix(" > ") {
            Some(dir) => Cow::Owned(format!("{} > ", self.highlighter.highlight_path(dir))),
            None => Cow::Borrowed(prompt),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.is_enabled()
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos], pos))
    }
}
