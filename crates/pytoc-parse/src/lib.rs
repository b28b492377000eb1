#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod diag;
mod lexer;
mod parser;
mod symtab;
mod token;

pub use diag::{DiagKind, Diagnostic, Diagnostics};
pub use lexer::{tokenize, Lexer, MAX_INDENT_DEPTH};
pub use parser::{parse_str, ParseOutput};
pub use symtab::SymbolTable;
pub use token::{Tok, TokKind};
