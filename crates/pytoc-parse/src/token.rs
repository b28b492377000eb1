#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    // structural: synthesized from whitespace by the lexer
    Indent,
    Dedent,
    Newline,
    Eof,
    // punctuation
    LParen,
    RParen,
    Comma,
    Colon,
    // assignment
    Eq,
    // arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    // equality
    EqEq,
    BangEq,
    // relational
    Lt,
    Le,
    Gt,
    Ge,
    // keywords
    KwAnd,
    KwOr,
    KwNot,
    KwIf,
    KwElif,
    KwElse,
    KwWhile,
    KwBreak,
    // idents / literals
    Ident(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub struct Tok {
    pub kind: TokKind,
    /// 1-based source line, for diagnostics.
    pub line: u32,
}
