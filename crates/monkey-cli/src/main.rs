use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use monkey_parse::{parse_str, tokenize, ParseErrors, TokenKind};
use std::io::Read;

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "monkey")]
#[command(about = "Tokenize and parse Monkey source, printing tokens or the syntax tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream, one token per line
    Tokens {
        /// Path to source file, or `-` for stdin
        file: String,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to source file, or `-` for stdin
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Canonical)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    /// Fully parenthesized source, one line
    Canonical,
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tokens { file } => cmd_tokens(&file),
        Commands::Parse { file, format } => cmd_parse(&file, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn read_source(path: &str) -> Result<String> {
    let src = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file '{}'", path))?
    };

    if src.len() > MAX_SOURCE_SIZE {
        bail!(
            "source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }

    Ok(src)
}

fn cmd_tokens(file: &str) -> Result<()> {
    let src = read_source(file)?;
    for tok in tokenize(&src) {
        match tok.kind {
            TokenKind::Eof => println!("{}", tok.kind),
            kind => println!("{} {}", kind, tok.literal),
        }
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let src = read_source(file)?;
    let program = match parse_str(file, &src) {
        Ok(program) => program,
        Err(e) => match e.downcast_ref::<ParseErrors>() {
            Some(errors) => {
                for err in errors {
                    eprintln!("{}: {}", file, err);
                }
                bail!("{} parse error(s) in {}", errors.len(), file);
            }
            None => return Err(e),
        },
    };

    match format {
        Format::Canonical => println!("{}", program),
        Format::Pretty => println!("{:#?}", program),
        Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }
    Ok(())
}
