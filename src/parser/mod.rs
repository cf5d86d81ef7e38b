pub mod default;

use crate::ast::CommandNode;

pub use default::DefaultParser;

/// Turns one input line into a command chain.
///
/// Parsing is permissive: malformed redirections and dangling pipes are
/// resolved into empty slots or no-op stages instead of errors.
pub trait Parser {
    fn parse(&mut self) -> CommandNode;
}

pub fn parse_line(line: &str) -> CommandNode {
    DefaultParser::new(line).parse()
}
