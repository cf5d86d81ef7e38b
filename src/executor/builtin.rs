pub mod commands;
pub mod manager;

pub use manager::{BuiltinCommand, BuiltinContext, BuiltinManager, BuiltinOutcome};
