use crate::diag::{DiagKind, Diagnostics};
use crate::lexer::Lexer;
use crate::symtab::SymbolTable;
use crate::token::{Tok, TokKind};
use anyhow::Result;
use pytoc_ast::ast::{BinOp, ElifArm, Expr, Lit, Program, Stmt, UnOp};

/// Everything a parse produces. `program` and `symbols` are only
/// meaningful for emission when `diagnostics` is clean; the parse
/// itself always runs to end of input.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
}

/// Parse a whole source text. `Err` is reserved for the fatal
/// indentation-depth overflow; every other problem lands in
/// `ParseOutput::diagnostics`.
pub fn parse_str(src: &str) -> Result<ParseOutput> {
    let mut diags = Diagnostics::new();
    let mut lex = Lexer::new(src);
    let cur = lex.next_tok(&mut diags)?;
    let mut p = Parser {
        lex,
        cur,
        diags,
        symbols: SymbolTable::new(),
    };
    let program = p.parse_program()?;
    Ok(ParseOutput {
        program,
        symbols: p.symbols,
        diagnostics: p.diags,
    })
}

/// Internal parser error. `Syntax` is caught at the nearest statement
/// boundary (reported, tokens skipped through the next `Newline`);
/// `Fatal` propagates out of the whole parse.
enum ParseErr {
    Syntax(String),
    Fatal(anyhow::Error),
}

impl From<anyhow::Error> for ParseErr {
    fn from(e: anyhow::Error) -> Self {
        ParseErr::Fatal(e)
    }
}

type PResult<T> = std::result::Result<T, ParseErr>;

struct Parser<'a> {
    lex: Lexer<'a>,
    cur: Tok,
    diags: Diagnostics,
    symbols: SymbolTable,
}

impl<'a> Parser<'a> {
    fn bump(&mut self) -> Result<()> {
        self.cur = self.lex.next_tok(&mut self.diags)?;
        Ok(())
    }

    fn at(&self, k: &TokKind) -> bool {
        std::mem::discriminant(&self.cur.kind) == std::mem::discriminant(k)
    }

    fn expect(&mut self, k: TokKind) -> PResult<Tok> {
        if self.at(&k) {
            let t = self.cur.clone();
            self.bump()?;
            Ok(t)
        } else {
            Err(ParseErr::Syntax(format!(
                "expected {:?}, found {:?}",
                k, self.cur.kind
            )))
        }
    }

    // ======= statements =======

    fn parse_program(&mut self) -> Result<Program> {
        let mut body = Vec::new();
        while !matches!(self.cur.kind, TokKind::Eof) {
            if let Some(s) = self.parse_stmt()? {
                body.push(s);
            }
        }
        Ok(Program { body })
    }

    /// One statement, or `None` if the tokens at this position were
    /// consumed without producing one (recovered error, stray
    /// structural token). Only fatal errors escape.
    fn parse_stmt(&mut self) -> Result<Option<Stmt>> {
        let line = self.cur.line;
        match self.stmt_inner() {
            Ok(s) => Ok(s),
            Err(ParseErr::Syntax(msg)) => {
                self.diags.report(line, DiagKind::SyntaxError(msg));
                self.recover_to_newline()?;
                Ok(None)
            }
            Err(ParseErr::Fatal(e)) => Err(e),
        }
    }

    fn stmt_inner(&mut self) -> PResult<Option<Stmt>> {
        match &self.cur.kind {
            TokKind::Ident(name) => {
                let target = name.clone();
                Ok(Some(self.parse_assign(target)?))
            }
            TokKind::KwIf => Ok(Some(self.parse_if()?)),
            TokKind::KwWhile => Ok(Some(self.parse_while()?)),
            TokKind::KwBreak => {
                self.bump()?;
                self.expect(TokKind::Newline)?;
                Ok(Some(Stmt::Break))
            }
            TokKind::Indent => {
                self.diags.report(self.cur.line, DiagKind::StrayIndent);
                self.bump()?;
                Ok(None)
            }
            // leftovers from an earlier recovery; skip quietly
            TokKind::Dedent | TokKind::Newline => {
                self.bump()?;
                Ok(None)
            }
            other => Err(ParseErr::Syntax(format!(
                "expected a statement, found {other:?}"
            ))),
        }
    }

    /// Discard tokens up to and including the next `Newline`, so parsing
    /// resumes at the next statement boundary.
    fn recover_to_newline(&mut self) -> Result<()> {
        loop {
            match self.cur.kind {
                TokKind::Newline => {
                    self.bump()?;
                    return Ok(());
                }
                TokKind::Eof => return Ok(()),
                _ => self.bump()?,
            }
        }
    }

    fn parse_assign(&mut self, target: String) -> PResult<Stmt> {
        self.bump()?; // identifier
        self.expect(TokKind::Eq)?;
        let value = self.parse_expr_bp(0)?;
        self.expect(TokKind::Newline)?;
        // Declared only now, after the right-hand side: `x = x + 1`
        // with no prior `x` is a use before definition.
        self.symbols.declare(&target);
        Ok(Stmt::Assign { target, value })
    }

    /// `expr ':' NEWLINE indented-block` — the shared tail of `if`,
    /// `elif`, `else` (condition-less) and `while` headers.
    fn parse_suite(&mut self) -> PResult<Vec<Stmt>> {
        self.expect(TokKind::Colon)?;
        self.expect(TokKind::Newline)?;
        self.parse_block()
    }

    fn parse_if(&mut self) -> PResult<Stmt> {
        self.bump()?; // `if`
        let cond = self.parse_expr_bp(0)?;
        let then_body = self.parse_suite()?;

        let mut elifs = Vec::new();
        while matches!(self.cur.kind, TokKind::KwElif) {
            self.bump()?;
            let cond = self.parse_expr_bp(0)?;
            let body = self.parse_suite()?;
            elifs.push(ElifArm { cond, body });
        }

        let else_body = if matches!(self.cur.kind, TokKind::KwElse) {
            self.bump()?;
            Some(self.parse_suite()?)
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_body,
            elifs,
            else_body,
        })
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        self.bump()?; // `while`
        let cond = self.parse_expr_bp(0)?;
        let body = self.parse_suite()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_block(&mut self) -> PResult<Vec<Stmt>> {
        self.expect(TokKind::Indent)?;
        let mut stmts = Vec::new();
        while !matches!(self.cur.kind, TokKind::Dedent | TokKind::Eof) {
            if let Some(s) = self.parse_stmt()? {
                stmts.push(s);
            }
        }
        self.expect(TokKind::Dedent)?;
        Ok(stmts)
    }

    // ======= expressions (Pratt parser) =======
    //
    // Binding powers (low -> high):
    //   1:  or
    //   3:  and
    //   5:  not (prefix operand)
    //   7:  == != < <= > >=   (non-associative: chaining is an error)
    //   10: + -
    //   20: * /
    // unary minus binds tighter than all infix; operand min-bp 100

    fn parse_expr_bp(&mut self, min_bp: u8) -> PResult<Expr> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let (op, lbp, rbp) = match self.cur.kind {
                TokKind::KwOr => (BinOp::Or, 1, 2),
                TokKind::KwAnd => (BinOp::And, 3, 4),
                TokKind::EqEq => (BinOp::Eq, 7, 8),
                TokKind::BangEq => (BinOp::Ne, 7, 8),
                TokKind::Lt => (BinOp::Lt, 7, 8),
                TokKind::Le => (BinOp::Le, 7, 8),
                TokKind::Gt => (BinOp::Gt, 7, 8),
                TokKind::Ge => (BinOp::Ge, 7, 8),
                TokKind::Plus => (BinOp::Add, 10, 11),
                TokKind::Minus => (BinOp::Sub, 10, 11),
                TokKind::Star => (BinOp::Mul, 20, 21),
                TokKind::Slash => (BinOp::Div, 20, 21),
                _ => break,
            };

            if lbp < min_bp {
                break;
            }
            self.bump()?; // consume operator
            let rhs = self.parse_expr_bp(rbp)?;
            if op.is_comparison() && self.at_comparison() {
                return Err(ParseErr::Syntax(
                    "comparison operators cannot be chained".to_string(),
                ));
            }
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn at_comparison(&self) -> bool {
        matches!(
            self.cur.kind,
            TokKind::EqEq
                | TokKind::BangEq
                | TokKind::Lt
                | TokKind::Le
                | TokKind::Gt
                | TokKind::Ge
        )
    }

    fn parse_prefix(&mut self) -> PResult<Expr> {
        let tok = self.cur.clone();
        match tok.kind {
            // `not` binds between `and` and the comparisons
            TokKind::KwNot => {
                self.bump()?;
                let inner = self.parse_expr_bp(5)?;
                Ok(Expr::Unary {
                    op: UnOp::Not,
                    expr: Box::new(inner),
                })
            }
            TokKind::Minus => {
                self.bump()?;
                let inner = self.parse_expr_bp(100)?;
                Ok(Expr::Unary {
                    op: UnOp::Neg,
                    expr: Box::new(inner),
                })
            }

            TokKind::Int(v) => {
                self.bump()?;
                Ok(Expr::Lit(Lit::Int(v)))
            }
            TokKind::Float(v) => {
                self.bump()?;
                Ok(Expr::Lit(Lit::Float(v)))
            }
            TokKind::Bool(v) => {
                self.bump()?;
                Ok(Expr::Lit(Lit::Bool(v)))
            }

            TokKind::Ident(name) => {
                // use before any assignment: reported but translation
                // proceeds with the bare name
                if !self.symbols.is_declared(&name) {
                    self.diags
                        .report(tok.line, DiagKind::UndefinedVariable(name.clone()));
                }
                self.bump()?;
                Ok(Expr::Var(name))
            }

            TokKind::LParen => {
                self.bump()?;
                let inner = self.parse_expr_bp(0)?;
                self.expect(TokKind::RParen)?;
                Ok(Expr::Paren(Box::new(inner)))
            }

            other => Err(ParseErr::Syntax(format!(
                "unexpected token {other:?} in expression"
            ))),
        }
    }
}
