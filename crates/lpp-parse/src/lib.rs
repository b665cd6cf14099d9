#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod compact;
mod lexer;
mod parser;

pub use compact::{compact, IGNORED};
pub use lexer::Lexer;
pub use parser::{parse_str, Parsed, MAX_NESTING_DEPTH};

#[cfg(test)]
mod symtab_smoke {
    use lpp_types::prelude::*;

    #[test]
    fn declarations_land_in_the_table() {
        let parsed = crate::parse_str(
            "<mem>",
            "programa p var x : inteiro procedimento q inicio fim inicio fim",
        )
        .unwrap();
        assert_eq!(
            parsed.symtab.lookup_kind("x", Default::default()).unwrap(),
            SymbolKind::Variable
        );
        assert_eq!(
            parsed.symtab.lookup_type("x", Default::default()).unwrap(),
            Some(&Type::Prim(Prim::Inteiro))
        );
        assert!(parsed.symtab.is_routine("q"));
    }
}
