use std::collections::BTreeMap;
use crate::executor::{ExecError, ExecStatus};
use crate::history::HistoryCell;
use crate::executor::builtin::commands::{
    CdCommand,
    ExitCommand,
    HelpCommand,
    HistoryCommand,
    RepeatCommand,
};

/// What a builtin asks the orchestrator to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Status(ExecStatus),
    /// Re-run the chain held in the history cell.
    RepeatLast,
}

/// Read-only view of interpreter state handed to builtins.
pub struct BuiltinContext<'a> {
    pub history: &'a HistoryCell,
    pub builtin_names: Vec<&'static str>,
}

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, args: &[String], ctx: &BuiltinContext<'_>) -> Result<BuiltinOutcome, ExecError>;
}

pub struct BuiltinManager {
    commands: BTreeMap<&'static str, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    /// Table with the interpreter's own builtins registered.
    pub fn new() -> Self {
        let mut mgr = BuiltinManager::empty();
        mgr.register(Box::new(ExitCommand));
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(RepeatCommand));
        mgr.register(Box::new(HelpCommand));
        mgr.register(Box::new(HistoryCommand));
        mgr
    }

    pub fn empty() -> Self {
        BuiltinManager {
            commands: BTreeMap::new(),
        }
    }

    /// Add or replace a handler. Returns the one it replaced, if any.
    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) -> Option<Box<dyn BuiltinCommand>> {
        self.commands.insert(cmd.name(), cmd)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        history: &HistoryCell,
    ) -> Result<BuiltinOutcome, ExecError> {
        let Some(cmd) = self.commands.get(name) else {
            return Err(ExecError::NoSuchBuiltin(name.to_string()));
        };
        let ctx = BuiltinContext {
            history,
            builtin_names: self.names(),
        };
        cmd.run(args, &ctx)
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}
