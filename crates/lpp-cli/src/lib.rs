//! Library entry points behind `lppc`.

pub mod logging;

use lpp_ast::error::CompileError;
use lpp_ast::token::Tok;
use lpp_codegen::EmitOptions;
use serde::Serialize;

pub use lpp_codegen::Indent;

/// Maximum source file size in bytes (1MB)
pub const MAX_SOURCE_SIZE: usize = 1_000_000;

/// Result of a successful compile.
#[derive(Debug, Clone, Serialize)]
pub struct Compilation {
    /// Generated Python source.
    pub python: String,
    /// The compacted token stream the parser accepted.
    pub tokens: Vec<Tok>,
}

/// Compile LPP source text to Python. Nothing is produced on error.
pub fn compile_str(src: &str, opts: &EmitOptions) -> Result<Compilation, CompileError> {
    compile_named("<input>", src, opts)
}

/// Like [`compile_str`], with `file` used for diagnostics.
#[tracing::instrument(level = "debug", skip(src, opts))]
pub fn compile_named(
    file: &str,
    src: &str,
    opts: &EmitOptions,
) -> Result<Compilation, CompileError> {
    let parsed = lpp_parse::parse_str(file, src)?;
    let python = lpp_codegen::generate(&parsed.program, &parsed.symtab, opts)?;
    Ok(Compilation {
        python,
        tokens: parsed.tokens,
    })
}
