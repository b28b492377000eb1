//! Code generation: render the parsed program as a C translation unit.
//!
//! The emitter is a pure function of the AST and the symbol table. The
//! output layout is fixed: a `stdio.h` preamble, one `double`
//! declaration per variable in first-assignment order, the translated
//! body between `/* Begin program */` and `/* End program */` markers,
//! and a `printf` epilogue dumping every variable in the same order.

#![forbid(unsafe_code)]
#![deny(unused_must_use)]

use anyhow::Result;
use pytoc_ast::ast::{BinOp, Expr, Lit, Program, Stmt, UnOp};
use pytoc_parse::{parse_str, Diagnostics, SymbolTable};

/// Result of running the whole pipeline over one source text.
/// `code` is `Some` exactly when no diagnostics were produced.
#[derive(Debug)]
pub struct Translation {
    pub code: Option<String>,
    pub diagnostics: Diagnostics,
}

/// Parse `src` and, if the parse was clean, emit the C program.
/// `Err` is reserved for the fatal indentation-depth overflow.
pub fn translate_str(src: &str) -> Result<Translation> {
    let out = parse_str(src)?;
    let code = if out.diagnostics.has_errors() {
        None
    } else {
        Some(emit_program(&out.program, &out.symbols))
    };
    Ok(Translation {
        code,
        diagnostics: out.diagnostics,
    })
}

pub fn emit_program(program: &Program, symbols: &SymbolTable) -> String {
    let mut c = String::new();
    c.push_str("#include <stdio.h>\n");
    c.push_str("int main() {\n");
    for name in symbols.names() {
        c.push_str(&format!("double {name};\n"));
    }
    c.push_str("\n/* Begin program */\n\n");
    emit_stmts(&mut c, &program.body);
    c.push_str("/* End program */\n\n");
    for name in symbols.names() {
        c.push_str(&format!("printf(\"{name}: %lf\\n\", {name});\n"));
    }
    c.push_str("}\n");
    c
}

fn emit_stmts(c: &mut String, stmts: &[Stmt]) {
    for s in stmts {
        emit_stmt(c, s);
    }
}

fn emit_stmt(c: &mut String, stmt: &Stmt) {
    match stmt {
        Stmt::Assign { target, value } => {
            c.push_str(&format!("{target} = {};\n", emit_expr(value)));
        }
        Stmt::If {
            cond,
            then_body,
            elifs,
            else_body,
        } => {
            c.push_str(&format!("if ({}) {{\n", emit_expr(cond)));
            emit_stmts(c, then_body);
            c.push_str("}\n");
            for arm in elifs {
                c.push_str(&format!("else if ({}) {{\n", emit_expr(&arm.cond)));
                emit_stmts(c, &arm.body);
                c.push_str("}\n");
            }
            if let Some(body) = else_body {
                c.push_str("else {\n");
                emit_stmts(c, body);
                c.push_str("}\n");
            }
        }
        Stmt::While { cond, body } => {
            c.push_str(&format!("while ({}) {{\n", emit_expr(cond)));
            emit_stmts(c, body);
            c.push_str("}\n");
        }
        Stmt::Break => c.push_str("break;\n"),
    }
}

pub fn emit_expr(e: &Expr) -> String {
    match e {
        Expr::Lit(Lit::Int(v)) => v.to_string(),
        // shortest round-trip text, the `%g`-style general form
        Expr::Lit(Lit::Float(v)) => v.to_string(),
        Expr::Lit(Lit::Bool(b)) => if *b { "1" } else { "0" }.to_string(),
        Expr::Var(name) => name.clone(),
        Expr::Unary { op, expr } => format!("{}{}", un_op_str(*op), emit_expr(expr)),
        Expr::Binary { lhs, op, rhs } => {
            format!("{} {} {}", emit_expr(lhs), bin_op_str(*op), emit_expr(rhs))
        }
        Expr::Paren(inner) => format!("({})", emit_expr(inner)),
    }
}

fn un_op_str(op: UnOp) -> &'static str {
    match op {
        UnOp::Not => "!",
        UnOp::Neg => "-",
    }
}

fn bin_op_str(op: BinOp) -> &'static str {
    match op {
        BinOp::Or => "||",
        BinOp::And => "&&",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
    }
}
