use std::fmt;

/// Every non-fatal error the lexer or parser can report.
///
/// Fatal conditions (indentation depth overflow) do not go through this
/// type; they abort the run via `anyhow::Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagKind {
    IndentMismatch,
    UnrecognizedChar(char),
    BadIntLiteral,
    UndefinedVariable(String),
    SyntaxError(String),
    StrayIndent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub kind: DiagKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            DiagKind::IndentMismatch => write!(f, "inconsistent indentation"),
            DiagKind::UnrecognizedChar(c) => write!(f, "unrecognized character {c:?}"),
            DiagKind::BadIntLiteral => write!(f, "integer literal out of range"),
            DiagKind::UndefinedVariable(name) => write!(f, "undefined variable `{name}`"),
            DiagKind::SyntaxError(msg) => write!(f, "syntax error: {msg}"),
            DiagKind::StrayIndent => write!(f, "unexpected indent"),
        }
    }
}

/// Append-only sink for everything reported during a run.
///
/// The original kept a process-wide error counter; this is that counter
/// with the events attached, threaded explicitly through the lexer and
/// parser so runs stay independent.
#[derive(Debug, Default)]
pub struct Diagnostics {
    diags: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: u32, kind: DiagKind) {
        self.diags.push(Diagnostic { line, kind });
    }

    pub fn error_count(&self) -> usize {
        self.diags.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.diags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diags.iter()
    }
}
