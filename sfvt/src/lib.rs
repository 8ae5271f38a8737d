use std::{fs::File, path::Path};

use anyhow::{Result, anyhow};
use log::{LevelFilter, debug};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

pub mod analyse;
pub mod config;
pub mod input;
pub mod positions;

/// Installs the terminal logger, and a file logger if a path is given.
///
/// If a logger was installed before, e.g. by an earlier run in the same process, it is kept.
pub fn init_logging(log_level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));

    if let Some(log_file) = log_file {
        let file = File::create(log_file)
            .map_err(|error| anyhow!("Unable to create log file {log_file:?}: {error}"))?;
        loggers.push(WriteLogger::new(log_level, Config::default(), file));
    }

    if CombinedLogger::init(loggers).is_err() {
        debug!("Logger was already initialised");
    }
    Ok(())
}
