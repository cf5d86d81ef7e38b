use log::{trace, warn};
use super::token::{Token, TokenKind};

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Strip one matching pair of quotes wrapping the whole text.
pub fn unquote(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if is_quote(first) && first == last => {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let (start, end) = self.next_raw()?;
        let raw = &self.input[start..end];
        let token = classify(raw, (start, end));
        trace!("token {:?} from {:?}", token.kind, raw);
        Some(token)
    }

    /// Byte range of the next whitespace-separated chunk. Quoted spans keep
    /// their blanks. A quote that is never closed is a literal character and
    /// the chunk ends at the next blank after it.
    fn next_raw(&mut self) -> Option<(usize, usize)> {
        let rest = &self.input[self.pos..];
        let skipped = rest.len() - rest.trim_start_matches(is_blank).len();
        self.pos += skipped;
        if self.pos >= self.input.len() {
            return None;
        }

        let start = self.pos;
        let mut quote: Option<(char, usize)> = None;
        for (offset, ch) in self.input[start..].char_indices() {
            match quote {
                Some((q, _)) if ch == q => quote = None,
                Some(_) => {}
                None if is_quote(ch) => quote = Some((ch, start + offset)),
                None if is_blank(ch) => {
                    self.pos = start + offset;
                    return Some((start, self.pos));
                }
                None => {}
            }
        }

        self.pos = match quote {
            Some((q, open)) => {
                warn!("unterminated quote {} at byte {}, taken literally", q, open);
                self.input[open..]
                    .find(is_blank)
                    .map_or(self.input.len(), |end| open + end)
            }
            None => self.input.len(),
        };
        Some((start, self.pos))
    }
}

fn classify(raw: &str, span: (usize, usize)) -> Token {
    let (kind, lexeme) = if raw == "|" {
        (TokenKind::Pipe, raw)
    } else if raw == "&" {
        (TokenKind::Amp, raw)
    } else if let Some(path) = raw.strip_prefix(">>") {
        (TokenKind::RedirectAppend, unquote(path))
    } else if let Some(path) = raw.strip_prefix('>') {
        (TokenKind::RedirectOut, unquote(path))
    } else if let Some(path) = raw.strip_prefix('<') {
        (TokenKind::RedirectIn, unquote(path))
    } else {
        (TokenKind::Word, unquote(raw))
    };
    Token {
        kind,
        lexeme: lexeme.to_string(),
        span,
    }
}
