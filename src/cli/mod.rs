pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::run;

use tracing::Level;

/// Route `tracing` output to stderr; `--verbose` lowers the threshold to DEBUG
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
