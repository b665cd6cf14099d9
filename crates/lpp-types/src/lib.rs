#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

mod symtab;
mod types;

pub use symtab::{Symbol, SymbolKind, Symtab};
pub use types::Type;

pub mod prelude {
    pub use crate::symtab::{Symbol, SymbolKind, Symtab};
    pub use crate::types::Type;
    pub use lpp_ast::ast::{Bound, Prim};
}
