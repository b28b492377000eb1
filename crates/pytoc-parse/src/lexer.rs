use crate::diag::{DiagKind, Diagnostics};
use crate::token::{Tok, TokKind};
use anyhow::{bail, Result};

/// Maximum number of open indentation levels. Exceeding it is the one
/// fatal lexing condition: the indentation model would be corrupt if we
/// kept going.
pub const MAX_INDENT_DEPTH: usize = 64;

/// Indentation-tracking lexer.
///
/// Pulled one token at a time by the parser. Leading-whitespace width
/// changes synthesize `Indent`/`Dedent` tokens around the ordinary
/// keyword/literal/operator stream; blank and comment-only lines are
/// invisible to the indentation model. Non-fatal problems go into the
/// shared `Diagnostics` sink and scanning always reaches end of input.
///
/// Invariant: by the time `Eof` is produced, every `Indent` has been
/// matched by exactly one `Dedent`.
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: u32,
    at_line_start: bool,
    /// Widths of the open indentation levels, innermost last. The base
    /// level 0 is implicit (empty stack). Strictly increasing.
    indents: Vec<usize>,
    /// Dedents still owed to the parser beyond the one returned by the
    /// comparison that popped them. Drained before anything else.
    pending_dedents: usize,
    /// Whether the current logical line has produced a real token yet;
    /// drives `Newline` synthesis for an unterminated final line.
    line_had_token: bool,
    synthesized_final_newline: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
            at_line_start: true,
            indents: Vec::new(),
            pending_dedents: 0,
            line_had_token: false,
            synthesized_final_newline: false,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }
    fn peek2(&self) -> Option<u8> {
        self.src.get(self.pos + 1).copied()
    }

    fn tok(&self, kind: TokKind) -> Tok {
        Tok {
            kind,
            line: self.line,
        }
    }

    pub fn next_tok(&mut self, diags: &mut Diagnostics) -> Result<Tok> {
        loop {
            if self.pending_dedents > 0 {
                self.pending_dedents -= 1;
                return Ok(self.tok(TokKind::Dedent));
            }

            if self.at_line_start {
                if let Some(t) = self.scan_line_start(diags)? {
                    return Ok(t);
                }
                continue;
            }

            self.skip_inline_trivia();

            let Some(b) = self.peek() else {
                return Ok(self.eof_step());
            };

            if b == b'\n' || b == b'\r' {
                let t = self.tok(TokKind::Newline);
                self.eat_line_ending();
                self.line += 1;
                self.at_line_start = true;
                self.line_had_token = false;
                return Ok(t);
            }

            let c = b as char;

            if c.is_ascii_alphabetic() || c == '_' {
                let t = self.scan_word();
                self.line_had_token = true;
                return Ok(t);
            }

            // float pattern takes priority: `.5` is a literal, bare `.` is not
            if c.is_ascii_digit() || (b == b'.' && self.peek2().is_some_and(|d| d.is_ascii_digit()))
            {
                let t = self.scan_number(diags);
                self.line_had_token = true;
                return Ok(t);
            }

            if let Some(t) = self.scan_operator() {
                self.line_had_token = true;
                return Ok(t);
            }

            diags.report(self.line, DiagKind::UnrecognizedChar(c));
            self.pos += 1;
        }
    }

    /// Handle the start of a physical line: swallow blank and
    /// comment-only lines whole, then compare the first content line's
    /// leading width against the indentation stack. Returns the
    /// structural token owed, if any.
    fn scan_line_start(&mut self, diags: &mut Diagnostics) -> Result<Option<Tok>> {
        loop {
            let mut width = 0usize;
            while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
                width += 1;
                self.pos += 1;
            }
            match self.peek() {
                None => {
                    // end of input; the mid-line path drains open levels
                    self.at_line_start = false;
                    return Ok(None);
                }
                Some(b'\n') | Some(b'\r') => {
                    self.eat_line_ending();
                    self.line += 1;
                }
                Some(b'#') => {
                    self.skip_comment();
                }
                Some(_) => {
                    self.at_line_start = false;
                    return self.compare_indent(width, diags);
                }
            }
        }
    }

    fn compare_indent(&mut self, width: usize, diags: &mut Diagnostics) -> Result<Option<Tok>> {
        let top = self.indents.last().copied().unwrap_or(0);
        if width > top {
            if self.indents.len() >= MAX_INDENT_DEPTH {
                bail!(
                    "line {}: too many indentation levels (max {})",
                    self.line,
                    MAX_INDENT_DEPTH
                );
            }
            self.indents.push(width);
            Ok(Some(self.tok(TokKind::Indent)))
        } else if width < top {
            let mut pops = 0usize;
            while self.indents.last().copied().unwrap_or(0) > width {
                self.indents.pop();
                pops += 1;
            }
            if self.indents.last().copied().unwrap_or(0) != width {
                // dedented to a width that was never pushed
                diags.report(self.line, DiagKind::IndentMismatch);
            }
            self.pending_dedents = pops - 1;
            Ok(Some(self.tok(TokKind::Dedent)))
        } else {
            Ok(None)
        }
    }

    /// One step of the end-of-input sequence: synthesize the final
    /// `Newline` if the last line had content but no terminator, then
    /// close open blocks one `Dedent` at a time, then `Eof` forever.
    fn eof_step(&mut self) -> Tok {
        if self.line_had_token && !self.synthesized_final_newline {
            self.synthesized_final_newline = true;
            self.line_had_token = false;
            return self.tok(TokKind::Newline);
        }
        if self.indents.pop().is_some() {
            return self.tok(TokKind::Dedent);
        }
        self.tok(TokKind::Eof)
    }

    fn skip_inline_trivia(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
        if self.peek() == Some(b'#') {
            self.skip_comment();
        }
    }

    /// Advance to (not past) the line terminator.
    fn skip_comment(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' || b == b'\r' {
                break;
            }
            self.pos += 1;
        }
    }

    fn eat_line_ending(&mut self) {
        if self.peek() == Some(b'\r') {
            self.pos += 1;
        }
        if self.peek() == Some(b'\n') {
            self.pos += 1;
        }
    }

    fn scan_word(&mut self) -> Tok {
        let mut s = String::new();
        while let Some(b) = self.peek() {
            let c = b as char;
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        let kind = match s.as_str() {
            "and" => TokKind::KwAnd,
            "or" => TokKind::KwOr,
            "not" => TokKind::KwNot,
            "if" => TokKind::KwIf,
            "elif" => TokKind::KwElif,
            "else" => TokKind::KwElse,
            "while" => TokKind::KwWhile,
            "break" => TokKind::KwBreak,
            "True" => TokKind::Bool(true),
            "False" => TokKind::Bool(false),
            _ => TokKind::Ident(s),
        };
        self.tok(kind)
    }

    fn scan_number(&mut self, diags: &mut Diagnostics) -> Tok {
        let mut s = String::new();
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                s.push(b as char);
                self.pos += 1;
            } else {
                break;
            }
        }
        // fraction requires at least one digit after the dot; `5.` lexes
        // as the integer 5 followed by a stray dot
        let is_float = if self.peek() == Some(b'.') && self.peek2().is_some_and(|d| d.is_ascii_digit()) {
            s.push('.');
            self.pos += 1;
            while let Some(b) = self.peek() {
                if b.is_ascii_digit() {
                    s.push(b as char);
                    self.pos += 1;
                } else {
                    break;
                }
            }
            true
        } else {
            false
        };

        if is_float {
            self.tok(TokKind::Float(s.parse().unwrap_or_default()))
        } else {
            match s.parse::<i64>() {
                Ok(v) => self.tok(TokKind::Int(v)),
                Err(_) => {
                    diags.report(self.line, DiagKind::BadIntLiteral);
                    self.tok(TokKind::Int(0))
                }
            }
        }
    }

    fn scan_operator(&mut self) -> Option<Tok> {
        let b = self.peek()?;
        let c = b as char;

        // 2-char operators first
        let two = match (c, self.peek2()) {
            ('=', Some(b'=')) => Some(TokKind::EqEq),
            ('!', Some(b'=')) => Some(TokKind::BangEq),
            ('>', Some(b'=')) => Some(TokKind::Ge),
            ('<', Some(b'=')) => Some(TokKind::Le),
            _ => None,
        };
        if let Some(kind) = two {
            self.pos += 2;
            return Some(self.tok(kind));
        }

        let one = match c {
            '=' => Some(TokKind::Eq),
            '+' => Some(TokKind::Plus),
            '-' => Some(TokKind::Minus),
            '*' => Some(TokKind::Star),
            '/' => Some(TokKind::Slash),
            '>' => Some(TokKind::Gt),
            '<' => Some(TokKind::Lt),
            '(' => Some(TokKind::LParen),
            ')' => Some(TokKind::RParen),
            ',' => Some(TokKind::Comma),
            ':' => Some(TokKind::Colon),
            _ => None,
        }?;
        self.pos += 1;
        Some(self.tok(one))
    }
}

/// Scan a whole source text. Returns the token stream (terminated by
/// `Eof`) together with everything reported along the way.
pub fn tokenize(src: &str) -> Result<(Vec<Tok>, Diagnostics)> {
    let mut diags = Diagnostics::new();
    let mut lex = Lexer::new(src);
    let mut toks = Vec::new();
    loop {
        let t = lex.next_tok(&mut diags)?;
        let done = matches!(t.kind, TokKind::Eof);
        toks.push(t);
        if done {
            return Ok((toks, diags));
        }
    }
}
