use crate::ast::CommandNode;

/// Name of the builtin that re-runs the stored chain.
pub const REPEAT_COMMAND: &str = "!!";

/// Single-slot store of the most recently executed pipeline.
#[derive(Debug, Default)]
pub struct HistoryCell {
    last: Option<CommandNode>,
}

impl HistoryCell {
    pub fn new() -> Self {
        Self::default()
    }

    // Store a freshly executed chain. Repeats are never stored, otherwise
    // `!!` would end up pointing at itself.
    pub fn record(&mut self, chain: CommandNode) -> bool {
        if chain.name == REPEAT_COMMAND {
            return false;
        }
        self.last = Some(chain);
        true
    }

    pub fn last(&self) -> Option<&CommandNode> {
        self.last.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}
