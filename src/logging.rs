//! Diagnostic logging setup.
//!
//! Logs always go to stderr so they never interleave with command output on
//! stdout. `FSH_LOG` takes an `EnvFilter` directive and wins over `--debug`.

use tracing_subscriber::EnvFilter;

use crate::flags::Flags;

pub const LOG_ENV: &str = "FSH_LOG";

pub fn init(flags: &Flags) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(flags)));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn default_directive(flags: &Flags) -> &'static str {
    if flags.is_set("debug") {
        "debug"
    } else {
        "warn"
    }
}
