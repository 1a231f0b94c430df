pub mod commands;
pub mod fs;
pub mod platform;
pub mod state;

pub use commands::{CommandError, CommandExecutor, Flow};
pub use state::Session;
