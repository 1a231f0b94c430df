use std::io::Write;
use std::sync::Arc;

use super::{Command, CommandError, Flow};
use crate::core::platform::PermissionControl;
use crate::core::state::Session;

pub const UNSUPPORTED_NOTICE: &str = "chmod not supported on this platform.";

const MAX_MODE: u32 = 0o7777;

#[derive(Clone)]
pub struct ChmodCommand {
    permissions: Option<Arc<dyn PermissionControl>>,
}

impl ChmodCommand {
    pub fn new(permissions: Option<Arc<dyn PermissionControl>>) -> Self {
        Self { permissions }
    }
}

pub fn parse_mode(raw: &str) -> Result<u32, CommandError> {
    u32::from_str_radix(raw, 8)
        .ok()
        .filter(|mode| *mode <= MAX_MODE)
        .ok_or_else(|| CommandError::InvalidMode(raw.to_string()))
}

impl Command for ChmodCommand {
    fn execute(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let Some(permissions) = &self.permissions else {
            writeln!(out, "{}", UNSUPPORTED_NOTICE)?;
            return Ok(Flow::Continue);
        };

        let [mode, target, ..] = args else {
            return Err(CommandError::Usage("chmod <mode> <file>"));
        };
        let mode = parse_mode(mode)?;
        let path = session.resolve(target);

        permissions
            .set_mode(&path, mode)
            .map_err(CommandError::at(&path))?;
        Ok(Flow::Continue)
    }
}
