use std::fmt;
use std::io;
use rustyline::error::ReadlineError;
use crate::config::ConfigError;

/// Failures that stop the interpreter before or outside command execution.
/// Errors raised while running a line never reach this type.
#[derive(Debug)]
pub enum ShellError {
    Config(ConfigError),
    Io(io::Error),
    Logger(log::SetLoggerError),
    Readline(ReadlineError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Config(e) => write!(f, "config: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::Logger(e) => write!(f, "cannot set up logging: {}", e),
            ShellError::Readline(e) => write!(f, "line editor: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Config(e) => Some(e),
            ShellError::Io(e) => Some(e),
            ShellError::Logger(e) => Some(e),
            ShellError::Readline(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ShellError {
    fn from(e: ConfigError) -> Self {
        ShellError::Config(e)
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Io(e)
    }
}

impl From<log::SetLoggerError> for ShellError {
    fn from(e: log::SetLoggerError) -> Self {
        ShellError::Logger(e)
    }
}

impl From<ReadlineError> for ShellError {
    fn from(e: ReadlineError) -> Self {
        ShellError::Readline(e)
    }
}
