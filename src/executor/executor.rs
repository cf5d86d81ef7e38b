use std::{io, fmt};
use crate::ast::CommandNode;
use crate::history::HistoryCell;

/// Outcome of running one line, as seen by the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    Success = 0,
    Exit = 1,
    Unknown = 2,
}

impl ExecStatus {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug)]
pub enum ExecError {
    CommandNotFound(String),
    Io(io::Error),
    Redirect { path: String, source: io::Error },
    Pipeline(nix::Error),
    NoSuchBuiltin(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::CommandNotFound(cmd) => write!(f, "{}: command not found", cmd),
            ExecError::Io(e) => write!(f, "IO error: {}", e),
            ExecError::Redirect { path, source } => write!(f, "{}: {}", path, source),
            ExecError::Pipeline(e) => write!(f, "cannot create pipe: {}", e),
            ExecError::NoSuchBuiltin(name) => write!(f, "No such builtin command: {}", name),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Io(e) => Some(e),
            ExecError::Redirect { source, .. } => Some(source),
            ExecError::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(e: io::Error) -> Self {
        ExecError::Io(e)
    }
}

impl From<nix::Error> for ExecError {
    fn from(e: nix::Error) -> Self {
        ExecError::Pipeline(e)
    }
}

pub trait Executor {
    /// Run every stage of `chain`. `history` is consulted by `!!` only.
    fn exec(&mut self, chain: &CommandNode, history: &HistoryCell) -> ExecStatus;
}
