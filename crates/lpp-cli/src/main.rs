use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lpp_ast::error::CompileError;
use lpp_cli::{compile_named, logging, Indent, MAX_SOURCE_SIZE};
use lpp_codegen::EmitOptions;

#[derive(Parser, Debug)]
#[command(name = "lppc", version)]
#[command(about = "Compile LPP pseudocode programs to Python")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a program to Python
    Compile {
        /// Path to .lpp source file
        file: PathBuf,

        /// Write the Python program here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indentation style of the generated code
        #[arg(long, value_enum, default_value_t = IndentStyle::Spaces)]
        indent: IndentStyle,

        /// Spaces per level when indenting with spaces
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=16))]
        indent_width: u8,
    },

    /// Dump the compacted token stream
    Tokens {
        /// Path to .lpp source file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Parse a source file and dump the AST
    Parse {
        /// Path to .lpp source file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum IndentStyle {
    Spaces,
    Tab,
}

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            file,
            output,
            indent,
            indent_width,
        } => {
            let indent = match indent {
                IndentStyle::Spaces => Indent::Spaces(indent_width),
                IndentStyle::Tab => Indent::Tab,
            };
            cmd_compile(&file, output.as_deref(), &EmitOptions { indent })
        }
        Commands::Tokens { file, format } => cmd_tokens(&file, format),
        Commands::Parse { file, format } => cmd_parse(&file, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path) -> Result<String> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    if src.len() > MAX_SOURCE_SIZE {
        bail!(
            "{}: source file exceeds {}MB limit ({} bytes)",
            path.display(),
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }
    Ok(src)
}

/// `<file>:<line>:<col>: <kind>: <detail>`
fn located(path: &Path, err: CompileError) -> anyhow::Error {
    anyhow!("{}:{}", path.display(), err)
}

fn cmd_compile(file: &Path, output: Option<&Path>, opts: &EmitOptions) -> Result<()> {
    let src = load(file)?;
    let name = file.display().to_string();
    let compiled = compile_named(&name, &src, opts).map_err(|e| located(file, e))?;

    match output {
        Some(out) => {
            std::fs::write(out, &compiled.python)
                .with_context(|| format!("failed to write '{}'", out.display()))?;
            tracing::info!(output = %out.display(), "wrote python");
        }
        None => print!("{}", compiled.python),
    }
    Ok(())
}

fn cmd_tokens(file: &Path, format: Format) -> Result<()> {
    let src = load(file)?;
    let name = file.display().to_string();
    let parsed = lpp_parse::parse_str(&name, &src).map_err(|e| located(file, e))?;

    match format {
        Format::Pretty => {
            for tok in &parsed.tokens {
                println!(
                    "{:>5}:{:<4} {:<12} {}",
                    tok.span.line,
                    tok.span.col,
                    format!("{:?}", tok.kind),
                    tok.text
                );
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&parsed.tokens)?),
    }
    Ok(())
}

fn cmd_parse(file: &Path, format: Format) -> Result<()> {
    let src = load(file)?;
    let name = file.display().to_string();
    let parsed = lpp_parse::parse_str(&name, &src).map_err(|e| located(file, e))?;

    match format {
        Format::Pretty => println!("{:#?}", parsed.program),
        Format::Json => println!("{}", serde_json::to_string_pretty(&parsed.program)?),
    }
    Ok(())
}
