use std::fs::OpenOptions;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use crate::config::Config;
use crate::error::ShellError;

/// Install the global logger: stderr at `config.log_level`, plus an
/// append-only file when `log_file` is set.
pub fn init(config: &Config) -> Result<(), ShellError> {
    let log_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        config.log_level,
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        // Timestamps only go to the file
        let file_config = ConfigBuilder::new().set_target_level(LevelFilter::Debug).build();
        loggers.push(WriteLogger::new(config.log_level, file_config, file));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
