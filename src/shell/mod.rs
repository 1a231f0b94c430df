use std::io::{self, IsTerminal, Write};

use crate::{
    core::{
        commands::{CommandError, CommandExecutor, Flow, HELP_TEXT},
        platform,
        state::Session,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{tokenize, EditorSource, LineSource, ReadOutcome, ReaderSource, ShellCompleter},
};

pub const HISTORY_FILE: &str = ".fsh_history";

pub struct Shell {
    source: Box<dyn LineSource>,
    executor: CommandExecutor,
    session: Session,
    highlighter: SyntaxHighlighter,
    quiet: bool,
}

impl Shell {
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        let session = start_session(flags)?;
        let executor = CommandExecutor::new(platform::detect());

        let plain = flags.is_set("plain");
        let interactive = !plain && io::stdin().is_terminal();
        let highlighter = SyntaxHighlighter::new(!plain && io::stderr().is_terminal());

        let source: Box<dyn LineSource> = if interactive {
            let helper = ShellCompleter::new(
                executor.names(),
                highlighter,
                session.current_dir().to_path_buf(),
            );
            let history_file = dirs::home_dir().map(|home| home.join(HISTORY_FILE));
            Box::new(EditorSource::new(helper, history_file)?)
        } else {
            Box::new(ReaderSource::new(io::stdin().lock()))
        };

        // Keep long-running commands from killing the shell
        ctrlc::set_handler(move || {
            eprintln!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Self::with_source(source, executor, session)
            .with_highlighter(highlighter)
            .quiet(flags.is_set("quiet")))
    }

    pub fn with_source(
        source: Box<dyn LineSource>,
        executor: CommandExecutor,
        session: Session,
    ) -> Self {
        Self {
            source,
            executor,
            session,
            highlighter: SyntaxHighlighter::plain(),
            quiet: false,
        }
    }

    pub fn with_highlighter(mut self, highlighter: SyntaxHighlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Skips the start-up command table and the farewell.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.run_with(&mut stdout.lock(), &mut stderr.lock())
    }

    /// Reads and executes lines until `exit` or end of input.
    ///
    /// Command failures are written to `err` and never end the loop; only a
    /// failing line reader or output stream does.
    pub fn run_with(&mut self, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), ShellError> {
        if !self.quiet {
            out.write_all(HELP_TEXT.as_bytes())?;
        }

        let result = self.command_loop(out, err);
        self.source.close();
        result?;

        if !self.quiet {
            writeln!(out, "Goodbye!")?;
        }
        out.flush()?;
        Ok(())
    }

    fn command_loop(&mut self, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), ShellError> {
        loop {
            let prompt = format!("{} > ", self.session.current_dir().display());
            if !self.source.renders_prompt() {
                write!(out, "\n{}", prompt)?;
            }
            out.flush()?;

            match self.source.read_line(&prompt)? {
                ReadOutcome::Line(line) => {
                    if self.execute_line(&line, out, err)? == Flow::Exit {
                        return Ok(());
                    }
                }
                ReadOutcome::Interrupted => {
                    if !self.quiet {
                        writeln!(out, "^C")?;
                    }
                }
                ReadOutcome::Eof => return Ok(()),
            }
        }
    }

    /// Tokenizes and runs a single line.
    pub fn execute_line(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Flow> {
        let tokens = tokenize(line);
        let Some((command, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };

        match self.executor.execute(&mut self.session, command, args, out) {
            Ok(flow) => {
                self.source.set_current_dir(self.session.current_dir());
                Ok(flow)
            }
            Err(e) => {
                self.report(command, &e, err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn report(&self, command: &str, error: &CommandError, err: &mut dyn Write) -> io::Result<()> {
        let message = match error {
            CommandError::NotFound(_) => error.to_string(),
            _ => format!("{}: {}", command, error),
        };
        tracing::debug!(command, %error, "command failed");
        writeln!(err, "{}", self.highlighter.highlight_error(&message))
    }
}

/// Starts in `-C/--directory` when given, otherwise in the process directory.
fn start_session(flags: &Flags) -> Result<Session, ShellError> {
    match flags.get_value("directory") {
        Some(dir) => Session::at(dir)
            .map_err(|e| ShellError::InvalidStartDir(format!("{}: {}", dir, e))),
        None => Ok(Session::new()?),
    }
}
