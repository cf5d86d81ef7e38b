use log::debug;
use crate::executor::{ExecError, ExecStatus};
use crate::executor::builtin::manager::{BuiltinCommand, BuiltinContext, BuiltinOutcome};
use crate::history::REPEAT_COMMAND;

const CONTINUE: BuiltinOutcome = BuiltinOutcome::Status(ExecStatus::Success);

pub const EXIT_COMMAND: &str = "exit";

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        EXIT_COMMAND
    }
    fn run(&self, _args: &[String], _ctx: &BuiltinContext<'_>) -> Result<BuiltinOutcome, ExecError> {
        Ok(BuiltinOutcome::Status(ExecStatus::Exit))
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], _ctx: &BuiltinContext<'_>) -> Result<BuiltinOutcome, ExecError> {
        let target = match args.first() {
            Some(dir) => dir.clone(),
            None => std::env::var("HOME").unwrap_or_else(|_| "/".to_string()),
        };
        match std::env::set_current_dir(&target) {
            Ok(()) => debug!("cd: now in {}", target),
            // A bad target is reported, never fatal
            Err(e) => eprintln!("-seashell: cd: {}: {}", target, e),
        }
        Ok(CONTINUE)
    }
}

pub struct RepeatCommand;

impl BuiltinCommand for RepeatCommand {
    fn name(&self) -> &'static str {
        REPEAT_COMMAND
    }
    fn run(&self, _args: &[String], ctx: &BuiltinContext<'_>) -> Result<BuiltinOutcome, ExecError> {
        if ctx.history.is_empty() {
            println!("No commands on history");
            return Ok(CONTINUE);
        }
        Ok(BuiltinOutcome::RepeatLast)
    }
}

pub struct HelpCommand;

impl BuiltinCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }
    fn run(&self, _args: &[String], ctx: &BuiltinContext<'_>) -> Result<BuiltinOutcome, ExecError> {
        println!("Built-in commands:");
        for name in &ctx.builtin_names {
            println!("  {}", name);
        }
        println!("Anything else is run from the program directory.");
        Ok(CONTINUE)
    }
}

pub struct HistoryCommand;

impl BuiltinCommand for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }
    fn run(&self, _args: &[String], ctx: &BuiltinContext<'_>) -> Result<BuiltinOutcome, ExecError> {
        match ctx.history.last() {
            Some(chain) => print!("{}", chain),
            None => println!("No commands on history"),
        }
        Ok(CONTINUE)
    }
}
