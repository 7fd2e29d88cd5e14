//! Logger setup driven by the `-v` flag count.

use log::Level;

/// Maps the number of `-v` flags to a log level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Installs the global logger. Fails if a logger is already installed.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    simple_logger::init_with_level(level_for(verbosity))?;
    Ok(())
}
