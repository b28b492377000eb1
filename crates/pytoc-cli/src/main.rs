use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pytoc_codegen::translate_str;
use pytoc_parse::{parse_str, tokenize};
use std::io::Read;

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "pytoc")]
#[command(about = "pytoc: translate a mini-Python source file into a C program")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a source file to C on stdout
    Translate {
        /// Path to the source file; omit or use `-` for stdin
        file: Option<String>,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to the source file; omit or use `-` for stdin
        file: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Dump the token stream, one token per line
    Tokens {
        /// Path to the source file; omit or use `-` for stdin
        file: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate { file } => cmd_translate(file.as_deref()),
        Commands::Parse { file, format } => cmd_parse(file.as_deref(), format),
        Commands::Tokens { file } => cmd_tokens(file.as_deref()),
    }
}

fn read_source(path: Option<&str>) -> Result<String> {
    let src = match path {
        Some(p) if p != "-" => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if src.len() > MAX_SOURCE_SIZE {
        eprintln!(
            "Error: source exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
        std::process::exit(1);
    }

    Ok(src)
}

fn cmd_translate(file: Option<&str>) -> Result<()> {
    let src = read_source(file)?;
    let translation = translate_str(&src)?;

    for diag in translation.diagnostics.iter() {
        eprintln!("{diag}");
    }

    match translation.code {
        Some(code) => {
            print!("{code}");
            Ok(())
        }
        None => {
            eprintln!("{} error(s), no output", translation.diagnostics.error_count());
            std::process::exit(1);
        }
    }
}

fn cmd_parse(file: Option<&str>, format: Format) -> Result<()> {
    let src = read_source(file)?;
    let out = parse_str(&src)?;

    for diag in out.diagnostics.iter() {
        eprintln!("{diag}");
    }

    match format {
        Format::Pretty => println!("{:#?}", out.program),
        Format::Json => println!("{}", serde_json::to_string_pretty(&out.program)?),
    }

    if out.diagnostics.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_tokens(file: Option<&str>) -> Result<()> {
    let src = read_source(file)?;
    let (toks, diags) = tokenize(&src)?;

    for diag in diags.iter() {
        eprintln!("{diag}");
    }

    for tok in &toks {
        println!("{:>4}  {:?}", tok.line, tok.kind);
    }

    if diags.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
