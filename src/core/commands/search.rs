use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::fs::search_names;
use crate::core::state::Session;

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchCommand;

impl Command for SearchCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let pattern = args.first().ok_or(CommandError::Usage("search <pattern>"))?;
        let root = session.current_dir();

        let result = search_names(root, pattern).map_err(CommandError::at(root))?;
        for (dir, err) in &result.skipped {
            tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable directory");
        }
        for path in &result.matches {
            writeln!(out, "{}", path.display())?;
        }
        Ok(Flow::Continue)
    }
}
