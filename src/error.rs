/// Failures that stop the shell before or outside a single command.
///
/// Errors raised while running a command are
/// [`CommandError`](crate::core::commands::CommandError)s and are reported by
/// the loop instead of ending it.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Flag error: {0}")]
    FlagError(String),

    #[error("Ctrl-C error: {0}")]
    CtrlC(String),

    #[error("Invalid start directory: {0}")]
    InvalidStartDir(String),
}

impl From<ctrlc::Error> for ShellError {
    fn from(err: ctrlc::Error) -> Self {
        ShellError::CtrlC(err.to_string())
    }
}
