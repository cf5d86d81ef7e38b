#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,           // Command name or argument, quotes already stripped
    Pipe,           // |
    Amp,            // &
    RedirectIn,     // <path
    RedirectOut,    // >path
    RedirectAppend, // >>path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Resolved text: the word for `Word`, the attached path (maybe empty)
    /// for redirections, the operator itself for `|` and `&`.
    pub lexeme: String,
    pub span: (usize, usize), // Byte range in the lexed input [start, end)
}

