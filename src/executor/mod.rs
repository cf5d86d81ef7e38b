mod executor;
pub mod builtin;
mod default_executor;
mod job;
mod path_resolver;
mod pipeline;
mod redirect;

pub use executor::{Executor, ExecError, ExecStatus};
pub use builtin::{BuiltinCommand, BuiltinContext, BuiltinManager, BuiltinOutcome};
pub use default_executor::{DefaultExecutor, DEFAULT_MAX_REPEAT_DEPTH};
pub use job::JobTable;
pub use path_resolver::{PathResolver, DEFAULT_PROGRAM_DIR};
