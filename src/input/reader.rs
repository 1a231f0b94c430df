use std::io::BufRead;
use std::path::{Path, PathBuf};

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

use super::completer::ShellCompleter;
use crate::error::ShellError;

/// One attempt at reading a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The user pressed Ctrl-C; the partial line is discarded.
    Interrupted,
    Eof,
}

/// Where the shell gets its input lines from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;

    /// Whether `read_line` shows the prompt itself.
    fn renders_prompt(&self) -> bool {
        false
    }

    fn set_current_dir(&mut self, _dir: &Path) {}

    /// Flushes anything worth keeping (history) before the shell exits.
    fn close(&mut self) {}
}

/// Interactive input through `rustyline`, with history and completion.
pub struct EditorSource {
    editor: Editor<ShellCompleter, FileHistory>,
    history_file: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(helper: ShellCompleter, history_file: Option<PathBuf>) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(helper));
        editor.set_auto_add_history(true);

        if let Some(path) = &history_file {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::warn!(path = %path.display(), error = %e, "could not load history");
                }
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn renders_prompt(&self) -> bool {
        true
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_current_dir(dir.to_path_buf());
        }
    }

    fn close(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not save history");
            }
        }
    }
}

/// Plain line-by-line input, used for pipes, scripts and tests.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
    fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome, ShellError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(ReadOutcome::Eof);
        }

        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(ReadOutcome::Line(line))
    }
}
