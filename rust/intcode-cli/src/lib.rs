//! Intcode CLI — run Intcode program files from the command line.

pub mod config;
pub mod error;
pub mod runner;

pub use config::IntcodeConfig;
pub use error::CliError;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
