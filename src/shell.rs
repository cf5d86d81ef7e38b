use log::{debug, info};
use crate::config::Config;
use crate::executor::{BuiltinCommand, DefaultExecutor, ExecStatus, Executor, PathResolver};
use crate::history::HistoryCell;
use crate::parser::parse_line;

/// One interpreter session: an executor plus the history it repeats from.
pub struct Shell {
    executor: DefaultExecutor,
    history: HistoryCell,
}

impl Shell {
    pub fn new(config: &Config) -> Self {
        let executor = DefaultExecutor::new(PathResolver::new(&config.program_dir))
            .with_max_repeat_depth(config.max_repeat_depth);
        Self::with_executor(executor)
    }

    pub fn with_executor(executor: DefaultExecutor) -> Self {
        Shell {
            executor,
            history: HistoryCell::new(),
        }
    }

    pub fn register_builtin(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.executor.register_builtin(cmd);
    }

    pub fn history(&self) -> &HistoryCell {
        &self.history
    }

    pub fn executor(&self) -> &DefaultExecutor {
        &self.executor
    }

    /// Parse and run one input line.
    pub fn run_line(&mut self, line: &str) -> ExecStatus {
        let reaped = self.executor.reap_background();
        if reaped > 0 {
            debug!("reaped {} background job(s)", reaped);
        }

        let chain = parse_line(line);
        if chain.is_noop() {
            return ExecStatus::Success;
        }
        if chain.needs_completion {
            info!("completion requested for '{}', nothing executed", chain.name);
            return ExecStatus::Success;
        }

        let status = self.executor.exec(&chain, &self.history);
        self.history.record(chain);
        status
    }
}
