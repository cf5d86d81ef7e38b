use log::{debug, warn};
use crate::ast::{CommandNode, RedirectKind};
use crate::lexer::{Lexer, TokenKind};
use crate::parser::Parser;

/// Parser that cuts the line at each unquoted `|` and parses the segments
/// one after another. Everything after a `|` is tokenized afresh as the
/// next stage.
pub struct DefaultParser<'a> {
    body: &'a str,
    background: bool,
    needs_completion: bool,
}

impl<'a> DefaultParser<'a> {
    pub fn new(line: &'a str) -> Self {
        let mut body = line.trim();
        let mut background = false;
        let mut needs_completion = false;

        // The trailing marker describes the whole line, not a single token
        if let Some(stripped) = body.strip_suffix('&') {
            background = true;
            body = stripped;
        } else if let Some(stripped) = body.strip_suffix('?') {
            needs_completion = true;
            body = stripped;
        }

        Self {
            body,
            background,
            needs_completion,
        }
    }

    /// Parse one stage from the front of `segment`. Returns the stage and the
    /// text following its `|`, if any.
    fn parse_stage<'s>(&self, segment: &'s str) -> (CommandNode, Option<&'s str>) {
        let mut node = CommandNode::default();
        node.background = self.background;
        node.needs_completion = self.needs_completion;
        let mut named = false;
        let mut pending: Option<RedirectKind> = None;
        let mut rest = None;
        let mut lexer = Lexer::new(segment);

        while let Some(token) = lexer.next_token() {
            let kind = match token.kind {
                TokenKind::Pipe => {
                    if let Some(kind) = pending.take() {
                        warn!("'{}' without a target before '|'", kind.operator());
                    }
                    rest = Some(segment[token.span.1..].trim_start());
                    break;
                }
                TokenKind::Amp => continue,
                TokenKind::RedirectIn => RedirectKind::In,
                TokenKind::RedirectOut => RedirectKind::Out,
                TokenKind::RedirectAppend => RedirectKind::Append,
                TokenKind::Word => {
                    if let Some(kind) = pending.take() {
                        node.set_redirect(kind, token.lexeme);
                    } else if !named {
                        node.name = token.lexeme;
                        named = true;
                    } else {
                        node.args.push(token.lexeme);
                    }
                    continue;
                }
            };

            if let Some(prev) = pending.take() {
                warn!("'{}' without a target", prev.operator());
            }
            if token.lexeme.is_empty() {
                // Bare operator, the target is the following word
                pending = Some(kind);
            } else {
                node.set_redirect(kind, token.lexeme);
            }
        }

        if let Some(kind) = pending {
            warn!("'{}' without a target at end of line", kind.operator());
        }
        (node, rest)
    }
}

impl<'a> Parser for DefaultParser<'a> {
    fn parse(&mut self) -> CommandNode {
        let mut stages = Vec::new();
        let mut segment = Some(self.body);
        while let Some(text) = segment {
            let (stage, rest) = self.parse_stage(text);
            stages.push(stage);
            segment = rest;
        }

        let chain = CommandNode::from_stages(stages);
        debug!(
            "parsed {} stage(s), background={}, completion={}",
            chain.len(),
            chain.background,
            chain.needs_completion
        );
        chain
    }
}
