//! Python code generation.
//!
//! Walks a parsed LPP program and produces Python source. The symbol table
//! from the same parse supplies declared types (input casts, record
//! defaults); nothing is re-validated here.

#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod decl;
mod emitter;
mod expr;
mod python;
mod stmt;

pub use emitter::{EmitOptions, Emitter, Indent};
pub use python::DATACLASS_IMPORT;

use lpp_ast::ast::Program;
use lpp_ast::error::CompileError;
use lpp_types::Symtab;

/// Generate Python for `program`. No partial text is returned on error.
#[tracing::instrument(level = "debug", skip_all, fields(program = %program.name.text))]
pub fn generate(
    program: &Program,
    symtab: &Symtab,
    opts: &EmitOptions,
) -> Result<String, CompileError> {
    let mut em = Emitter::new(symtab, opts);
    decl::emit_program(&mut em, program)?;
    let out = em.finish();
    tracing::debug!(bytes = out.len(), "generated");
    Ok(out)
}
