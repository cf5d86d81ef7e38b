use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use log::{debug, warn};
use crate::ast::CommandNode;
use crate::history::HistoryCell;
use super::executor::{Executor, ExecError, ExecStatus};
use super::builtin::{BuiltinCommand, BuiltinManager, BuiltinOutcome};
use super::builtin::commands::EXIT_COMMAND;
use super::job::JobTable;
use super::path_resolver::PathResolver;
use super::pipeline::{self, PipeGroup, Upstream};
use super::redirect::StageFiles;

pub const DEFAULT_MAX_REPEAT_DEPTH: usize = 8;

/// Runs command chains: builtins in-process, everything else as one child
/// process per stage, with adjacent process stages joined by pipes.
pub struct DefaultExecutor {
    builtins: BuiltinManager,
    resolver: PathResolver,
    jobs: JobTable,
    max_repeat_depth: usize,
    depth: usize,
}

struct Spawned {
    child: Child,
    // Read end for the next stage when stdout went into a pipe
    downstream: Option<std::os::fd::OwnedFd>,
}

impl DefaultExecutor {
    pub fn new(resolver: PathResolver) -> Self {
        DefaultExecutor {
            builtins: BuiltinManager::new(),
            resolver,
            jobs: JobTable::new(),
            max_repeat_depth: DEFAULT_MAX_REPEAT_DEPTH,
            depth: 0,
        }
    }

    pub fn with_max_repeat_depth(mut self, depth: usize) -> Self {
        self.max_repeat_depth = depth;
        self
    }

    pub fn register_builtin(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.builtins.register(cmd);
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    /// Poll background jobs and forget the ones that have finished.
    pub fn reap_background(&mut self) -> usize {
        self.jobs.reap().len()
    }

    fn is_process_stage(&self, stage: &CommandNode) -> bool {
        !stage.is_noop() && !self.builtins.is_builtin(&stage.name)
    }

    fn run_builtin(&mut self, stage: &CommandNode, history: &HistoryCell) -> ExecStatus {
        debug!("builtin {} {:?}", stage.name, stage.args);
        match self.builtins.execute(&stage.name, &stage.args, history) {
            Ok(BuiltinOutcome::Status(status)) => status,
            Ok(BuiltinOutcome::RepeatLast) => self.repeat_last(history),
            Err(e) => {
                eprintln!("-seashell: {}: {}", stage.name, e);
                ExecStatus::Success
            }
        }
    }

    fn repeat_last(&mut self, history: &HistoryCell) -> ExecStatus {
        let Some(chain) = history.last() else {
            println!("No commands on history");
            return ExecStatus::Success;
        };
        if self.depth >= self.max_repeat_depth {
            eprintln!("-seashell: !!: repeat depth exceeded");
            return ExecStatus::Success;
        }
        self.depth += 1;
        let status = self.exec(chain, history);
        self.depth -= 1;
        status
    }

    fn spawn_stage(
        &self,
        stage: &CommandNode,
        upstream: Upstream,
        pipe_onward: bool,
    ) -> Result<Spawned, ExecError> {
        let path = self.resolver.resolve(&stage.name);
        let mut command = Command::new(&path);
        command.arg0(&stage.name).args(&stage.args);

        let files = StageFiles::open(stage);
        match files.stdin {
            Some(f) => command.stdin(Stdio::from(f)),
            None => command.stdin(upstream.into_stdio()),
        };

        let mut downstream = None;
        match files.stdout {
            Some(f) => {
                command.stdout(Stdio::from(f));
            }
            None if pipe_onward => match pipeline::pipe() {
                Ok((read, write)) => {
                    command.stdout(Stdio::from(write));
                    downstream = Some(read);
                }
                Err(e) => {
                    warn!("{}: {}", stage.name, e);
                    eprintln!("-seashell: {}", e);
                }
            },
            None => {}
        }

        debug!("spawning {} as {:?}", path.display(), stage.argv());
        let child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                ExecError::CommandNotFound(stage.name.clone())
            }
            _ => ExecError::Io(e),
        })?;
        // `command` still owns the parent's copy of the pipe write end
        drop(command);
        Ok(Spawned { child, downstream })
    }
}

impl Default for DefaultExecutor {
    fn default() -> Self {
        DefaultExecutor::new(PathResolver::default())
    }
}

impl Executor for DefaultExecutor {
    fn exec(&mut self, chain: &CommandNode, history: &HistoryCell) -> ExecStatus {
        let mut status = ExecStatus::Success;
        let mut upstream = Upstream::Inherit;
        let mut group = PipeGroup::default();

        for stage in chain.stages() {
            if stage.is_noop() {
                continue;
            }
            if self.builtins.is_builtin(&stage.name) {
                group.wait();
                let result = self.run_builtin(stage, history);
                // A builtin ends the chain, but `exit` further down still wins
                let exits_later = stage.stages().skip(1).any(|s| s.name == EXIT_COMMAND);
                return if exits_later { ExecStatus::Exit } else { result };
            }

            let pipe_onward = stage
                .next
                .as_deref()
                .is_some_and(|next| self.is_process_stage(next));

            match self.spawn_stage(stage, upstream, pipe_onward) {
                Ok(spawned) => {
                    upstream = match spawned.downstream {
                        Some(read) => Upstream::Pipe(read),
                        None => Upstream::Inherit,
                    };
                    if stage.background {
                        self.jobs.push(&stage.name, spawned.child);
                    } else {
                        group.push(&stage.name, spawned.child);
                    }
                }
                Err(e) => {
                    debug!("stage {} failed: {:?}", stage.name, e);
                    eprintln!("-seashell: {}", e);
                    status = ExecStatus::Unknown;
                    upstream = if pipe_onward {
                        Upstream::Closed
                    } else {
                        Upstream::Inherit
                    };
                }
            }

            // Stages not joined by a pipe run one after another
            if upstream.is_inherit() {
                group.wait();
            }
        }

        group.wait();
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::executor::BuiltinContext;
    use crate::parser::parse_line;

    /// Records every call so tests can see which stages reached the table.
    struct Probe {
        name: &'static str,
        calls: Rc<RefCell<Vec<Vec<String>>>>,
        outcome: BuiltinOutcome,
    }

    impl BuiltinCommand for Probe {
        fn name(&self) -> &'static str {
            self.name
        }
        fn run(&self, args: &[String], _ctx: &BuiltinContext<'_>) -> Result<BuiltinOutcome, ExecError> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(self.outcome)
        }
    }

    fn executor_with_probe(
        name: &'static str,
        outcome: BuiltinOutcome,
    ) -> (DefaultExecutor, Rc<RefCell<Vec<Vec<String>>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        // An empty program dir keeps these tests from spawning anything real
        let mut executor = DefaultExecutor::new(PathResolver::new("/nonexistent-seashell-bin"));
        executor.register_builtin(Box::new(Probe {
            name,
            calls: Rc::clone(&calls),
            outcome,
        }));
        (executor, calls)
    }

    #[test]
    fn test_noop_line_succeeds() {
        let mut executor = DefaultExecutor::default();
        let history = HistoryCell::new();
        assert_eq!(executor.exec(&parse_line(""), &history), ExecStatus::Success);
    }

    #[test]
    fn test_exit_anywhere_in_pipeline() {
        let history = HistoryCell::new();
        for line in ["exit", "exit | probe", "probe | exit", "probe a | probe b | exit"] {
            let (mut executor, calls) =
                executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
            let status = executor.exec(&parse_line(line), &history);
            assert_eq!(status, ExecStatus::Exit, "line: {}", line);
            if line.starts_with("exit") {
                assert!(calls.borrow().is_empty(), "line: {}", line);
            }
        }
    }

    #[test]
    fn test_exit_after_process_stage() {
        let (mut executor, _) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let history = HistoryCell::new();
        let status = executor.exec(&parse_line("missing-program | exit"), &history);
        assert_eq!(status, ExecStatus::Exit);
    }

    #[test]
    fn test_builtin_gets_parsed_arguments() {
        let (mut executor, calls) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let history = HistoryCell::new();
        executor.exec(&parse_line("probe 'one two' three > ignored.txt"), &history);
        assert_eq!(
            *calls.borrow(),
            vec![vec!["one two".to_string(), "three".to_string()]]
        );
    }

    #[test]
    fn test_noop_stages_are_skipped() {
        let (mut executor, calls) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let history = HistoryCell::new();
        let status = executor.exec(&parse_line("| | probe 1 |"), &history);
        assert_eq!(status, ExecStatus::Success);
        assert_eq!(*calls.borrow(), vec![vec!["1".to_string()]]);
    }

    #[test]
    fn test_builtin_ends_the_chain() {
        let (mut executor, calls) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Unknown));
        let history = HistoryCell::new();
        let status = executor.exec(&parse_line("probe 1 | probe 2 | missing-program"), &history);
        assert_eq!(status, ExecStatus::Unknown);
        assert_eq!(*calls.borrow(), vec![vec!["1".to_string()]]);
    }

    #[test]
    fn test_builtin_status_is_propagated() {
        let (mut executor, _) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Unknown));
        let history = HistoryCell::new();
        assert_eq!(executor.exec(&parse_line("probe"), &history), ExecStatus::Unknown);
    }

    #[test]
    fn test_unknown_program() {
        let (mut executor, _) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let history = HistoryCell::new();
        let status = executor.exec(&parse_line("no-such-program --flag"), &history);
        assert_eq!(status, ExecStatus::Unknown);
    }

    #[test]
    fn test_failed_stage_does_not_stop_later_stages() {
        let (mut executor, calls) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let history = HistoryCell::new();
        let status = executor.exec(&parse_line("no-such-program | probe x"), &history);
        // The builtin's own result is the chain's result
        assert_eq!(status, ExecStatus::Success);
        assert_eq!(*calls.borrow(), vec![vec!["x".to_string()]]);

        let status = executor.exec(&parse_line("no-such-program | other-missing"), &history);
        assert_eq!(status, ExecStatus::Unknown);
    }

    #[test]
    fn test_repeat_with_empty_history_spawns_nothing() {
        let (mut executor, calls) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let history = HistoryCell::new();
        for _ in 0..3 {
            assert_eq!(executor.exec(&parse_line("!!"), &history), ExecStatus::Success);
        }
        assert!(calls.borrow().is_empty());
        assert!(executor.jobs().is_empty());
    }

    #[test]
    fn test_repeat_runs_stored_chain() {
        let (mut executor, calls) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let mut history = HistoryCell::new();
        history.record(parse_line("probe again"));
        executor.exec(&parse_line("!!"), &history);
        executor.exec(&parse_line("!!"), &history);
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(calls.borrow()[1], vec!["again".to_string()]);
    }

    #[test]
    fn test_repeat_of_exit_exits() {
        let mut executor = DefaultExecutor::default();
        let mut history = HistoryCell::new();
        history.record(parse_line("exit"));
        assert_eq!(executor.exec(&parse_line("!!"), &history), ExecStatus::Exit);
    }

    #[test]
    fn test_self_referencing_repeat_is_bounded() {
        let (executor, _) =
            executor_with_probe("probe", BuiltinOutcome::Status(ExecStatus::Success));
        let mut executor = executor.with_max_repeat_depth(3);
        let mut history = HistoryCell::new();
        // Stored chain reaches `!!` through its second stage
        history.record(parse_line("missing-program | !!"));
        let status = executor.exec(&parse_line("!!"), &history);
        // The innermost `!!` gives up with Success and every level returns it
        assert_eq!(status, ExecStatus::Success);
        assert_eq!(executor.depth, 0);
    }
}
