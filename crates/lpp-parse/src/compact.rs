//! Compacted token stream: validated tokens minus grammar-only scaffolding.

use lpp_ast::token::{Tok, TokKind};

/// Tokens the grammar needs but that carry nothing for code generation.
pub const IGNORED: &[TokKind] = &[
    TokKind::Programa,
    TokKind::Var,
    TokKind::Inicio,
    TokKind::LParen,
    TokKind::RParen,
    TokKind::Colon,
    TokKind::DotDot,
    TokKind::De,
];

pub fn keeps(kind: TokKind) -> bool {
    kind != TokKind::Eof && !IGNORED.contains(&kind)
}

pub fn compact(tokens: &[Tok]) -> Vec<Tok> {
    tokens.iter().filter(|t| keeps(t.kind)).cloned().collect()
}
