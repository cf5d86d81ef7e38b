use std::fmt;

/// One pipeline stage as produced by the parser.
///
/// A whole pipeline is a chain of these linked through `next`; the chain owns
/// every later stage exclusively. Every trait that walks the chain does so
/// with a loop, so chain length is bounded by memory, not by stack depth.
#[derive(Default)]
pub struct CommandNode {
    pub name: String,
    pub args: Vec<String>,
    pub redirects: [Option<String>; 3],
    pub background: bool,
    pub needs_completion: bool,
    pub next: Option<Box<CommandNode>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,
    Out,
    Append,
}

impl RedirectKind {
    /// Index of this redirection in `CommandNode::redirects`.
    pub fn slot(self) -> usize {
        match self {
            RedirectKind::In => 0,
            RedirectKind::Out => 1,
            RedirectKind::Append => 2,
        }
    }

    pub fn operator(self) -> &'static str {
        match self {
            RedirectKind::In => "<",
            RedirectKind::Out => ">",
            RedirectKind::Append => ">>",
        }
    }
}

impl CommandNode {
    pub fn new(name: impl Into<String>) -> Self {
        let mut node = Self::default();
        node.name = name.into();
        node
    }

    /// Link detached stages, first to last, into one chain. An empty list
    /// gives the no-op command.
    pub fn from_stages(stages: Vec<CommandNode>) -> CommandNode {
        let mut rev = stages.into_iter().rev();
        let mut chain = rev.next().unwrap_or_default();
        for mut stage in rev {
            stage.next = Some(Box::new(chain));
            chain = stage;
        }
        chain
    }

    /// Copy of this stage alone, without `next`.
    fn detached(&self) -> CommandNode {
        let mut node = CommandNode::new(self.name.clone());
        node.args = self.args.clone();
        node.redirects = self.redirects.clone();
        node.background = self.background;
        node.needs_completion = self.needs_completion;
        node
    }

    fn same_stage(&self, other: &CommandNode) -> bool {
        self.name == other.name
            && self.args == other.args
            && self.redirects == other.redirects
            && self.background == other.background
            && self.needs_completion == other.needs_completion
    }

    /// The empty command produced by a blank line or a dangling pipe.
    pub fn is_noop(&self) -> bool {
        self.name.is_empty()
    }

    pub fn redirect(&self, kind: RedirectKind) -> Option<&str> {
        self.redirects[kind.slot()].as_deref()
    }

    pub fn set_redirect(&mut self, kind: RedirectKind, path: impl Into<String>) {
        self.redirects[kind.slot()] = Some(path.into());
    }

    /// Output target honored at execution time. Truncate wins over append
    /// when a line supplied both.
    pub fn effective_output(&self) -> Option<(RedirectKind, &str)> {
        self.redirect(RedirectKind::Out)
            .map(|p| (RedirectKind::Out, p))
            .or_else(|| self.redirect(RedirectKind::Append).map(|p| (RedirectKind::Append, p)))
    }

    /// `[name, args...]`, the vector handed to the spawned program.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    pub fn stages(&self) -> Stages<'_> {
        Stages { next: Some(self) }
    }

    /// Number of stages in the chain starting at this node.
    pub fn len(&self) -> usize {
        self.stages().count()
    }
}

pub struct Stages<'a> {
    next: Option<&'a CommandNode>,
}

impl<'a> Iterator for Stages<'a> {
    type Item = &'a CommandNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next.as_deref();
        Some(current)
    }
}

impl Drop for CommandNode {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl Clone for CommandNode {
    fn clone(&self) -> Self {
        CommandNode::from_stages(self.stages().map(CommandNode::detached).collect())
    }
}

impl PartialEq for CommandNode {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.stages();
        let mut right = other.stages();
        loop {
            match (left.next(), right.next()) {
                (Some(a), Some(b)) if a.same_stage(b) => {}
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl Eq for CommandNode {}

struct StageView<'a>(&'a CommandNode);

impl fmt::Debug for StageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.0.name)
            .field("args", &self.0.args)
            .field("redirects", &self.0.redirects)
            .field("background", &self.0.background)
            .field("needs_completion", &self.0.needs_completion)
            .finish()
    }
}

// A chain prints as the list of its stages.
impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.stages().map(StageView)).finish()
    }
}

// Mirrors the debug dump the interpreter prints for `history`.
impl fmt::Display for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, stage) in self.stages().enumerate() {
            if depth > 0 {
                writeln!(f, "\tPiped to:")?;
            }
            writeln!(f, "Command: <{}>", stage.name)?;
            writeln!(f, "\tIs Background: {}", if stage.background { "yes" } else { "no" })?;
            writeln!(
                f,
                "\tNeeds Auto-complete: {}",
                if stage.needs_completion { "yes" } else { "no" }
            )?;
            writeln!(f, "\tRedirects:")?;
            for (i, r) in stage.redirects.iter().enumerate() {
                writeln!(f, "\t\t{}: {}", i, r.as_deref().unwrap_or("N/A"))?;
            }
            writeln!(f, "\tArguments ({}):", stage.args.len())?;
            for (i, arg) in stage.args.iter().enumerate() {
                writeln!(f, "\t\tArg {}: {}", i, arg)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(names: &[&str]) -> CommandNode {
        CommandNode::from_stages(names.iter().map(|n| CommandNode::new(*n)).collect())
    }

    #[test]
    fn test_stages_walks_chain_in_order() {
        let node = chain(&["ls", "grep", "wc"]);
        let names: Vec<&str> = node.stages().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ls", "grep", "wc"]);
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn test_truncate_wins_over_append() {
        let mut node = CommandNode::new("ls");
        node.set_redirect(RedirectKind::Append, "b.txt");
        assert_eq!(node.effective_output(), Some((RedirectKind::Append, "b.txt")));
        node.set_redirect(RedirectKind::Out, "a.txt");
        assert_eq!(node.effective_output(), Some((RedirectKind::Out, "a.txt")));
    }

    #[test]
    fn test_argv_starts_with_name() {
        let mut node = CommandNode::new("echo");
        node.args = vec!["a".to_string(), "b".to_string()];
        assert_eq!(node.argv(), vec!["echo", "a", "b"]);
    }

    #[test]
    fn test_display_includes_piped_stage() {
        let mut node = chain(&["ls", "wc"]);
        node.set_redirect(RedirectKind::In, "in.txt");
        let dump = node.to_string();
        assert!(dump.starts_with("Command: <ls>\n"));
        assert!(dump.contains("\t\t0: in.txt\n"));
        assert!(dump.contains("\t\t1: N/A\n"));
        assert!(dump.contains("\tPiped to:\nCommand: <wc>\n"));
    }

    #[test]
    fn test_from_stages_empty_is_noop() {
        let node = CommandNode::from_stages(Vec::new());
        assert!(node.is_noop());
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_clone_and_eq_cover_every_stage() {
        let node = chain(&["ls", "grep", "wc"]);
        let copy = node.clone();
        assert_eq!(copy, node);
        assert_ne!(chain(&["ls", "grep"]), node);
        assert_ne!(chain(&["ls", "sort", "wc"]), node);
    }

    #[test]
    fn test_very_long_chain_is_handled_without_recursion() {
        let names = vec!["a"; 200_000];
        let node = chain(&names);
        assert_eq!(node.len(), 200_000);
        let copy = node.clone();
        assert!(copy == node);
        assert!(node.to_string().starts_with("Command: <a>\n"));
        drop(copy);
        drop(node);
    }
}
