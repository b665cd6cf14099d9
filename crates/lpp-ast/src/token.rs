use crate::span::Span;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokKind {
    // end of input
    Eof,
    // structural keywords
    Programa,
    Tipo,
    Registro,
    FimRegistro,
    Var,
    Inicio,
    Fim,
    // declaration shape
    Caractere,
    Inteiro,
    Real,
    Logico,
    Conjunto,
    De,
    // statements
    Procedimento,
    Funcao,
    Retorne,
    Leia,
    Escreva,
    Se,
    Entao,
    Senao,
    FimSe,
    Para,
    Ate,
    Passo,
    Faca,
    FimPara,
    Enquanto,
    FimEnquanto,
    // names / literals
    Ident,
    Int,
    RealLit,
    Str,
    Verdadeiro,
    Falso,
    // punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    DotDot,
    Dot,
    Arrow, // <-
    // logical
    E,
    Ou,
    Nao,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Mod,
    Div,
}

/// The two disjoint operator families. An operator token belongs to exactly
/// one of them; expression chains switch family by re-entering the
/// expression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpClass {
    Logical,
    Arithmetic,
}

impl TokKind {
    pub fn op_class(self) -> Option<OpClass> {
        use TokKind::*;
        match self {
            E | Ou | Nao | Eq | Ne | Lt | Le | Gt | Ge => Some(OpClass::Logical),
            Plus | Minus | Star | Slash | Caret | Mod | Div => Some(OpClass::Arithmetic),
            _ => None,
        }
    }

    /// Keyword table lookup. Accented spellings map to the same kind as the
    /// plain ones.
    pub fn keyword(word: &str) -> Option<TokKind> {
        use TokKind::*;
        let kind = match word {
            "programa" => Programa,
            "tipo" => Tipo,
            "registro" => Registro,
            "fimregistro" | "fimreg" => FimRegistro,
            "var" => Var,
            "inicio" | "início" => Inicio,
            "fim" => Fim,
            "caractere" => Caractere,
            "inteiro" => Inteiro,
            "real" => Real,
            "logico" | "lógico" => Logico,
            "conjunto" => Conjunto,
            "de" => De,
            "procedimento" => Procedimento,
            "funcao" | "função" => Funcao,
            "retorne" => Retorne,
            "leia" => Leia,
            "escreva" => Escreva,
            "se" => Se,
            "entao" | "então" => Entao,
            "senao" | "senão" => Senao,
            "fimse" => FimSe,
            "para" => Para,
            "ate" | "até" => Ate,
            "passo" => Passo,
            "faca" | "faça" => Faca,
            "fimpara" => FimPara,
            "enquanto" => Enquanto,
            "fimenquanto" | "fimenq" => FimEnquanto,
            "verdadeiro" => Verdadeiro,
            "falso" => Falso,
            "e" => E,
            "ou" => Ou,
            "nao" | "não" => Nao,
            "mod" => Mod,
            "div" => Div,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical spelling, used as the token text for keywords and
    /// operators and in diagnostics.
    pub fn spelling(self) -> &'static str {
        use TokKind::*;
        match self {
            Eof => "<eof>",
            Programa => "programa",
            Tipo => "tipo",
            Registro => "registro",
            FimRegistro => "fimregistro",
            Var => "var",
            Inicio => "inicio",
            Fim => "fim",
            Caractere => "caractere",
            Inteiro => "inteiro",
            Real => "real",
            Logico => "logico",
            Conjunto => "conjunto",
            De => "de",
            Procedimento => "procedimento",
            Funcao => "funcao",
            Retorne => "retorne",
            Leia => "leia",
            Escreva => "escreva",
            Se => "se",
            Entao => "entao",
            Senao => "senao",
            FimSe => "fimse",
            Para => "para",
            Ate => "ate",
            Passo => "passo",
            Faca => "faca",
            FimPara => "fimpara",
            Enquanto => "enquanto",
            FimEnquanto => "fimenquanto",
            Ident => "identifier",
            Int => "integer literal",
            RealLit => "real literal",
            Str => "string literal",
            Verdadeiro => "verdadeiro",
            Falso => "falso",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            Comma => ",",
            Colon => ":",
            DotDot => "..",
            Dot => ".",
            Arrow => "<-",
            E => "e",
            Ou => "ou",
            Nao => "nao",
            Eq => "=",
            Ne => "<>",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Caret => "^",
            Mod => "mod",
            Div => "div",
        }
    }
}

impl std::fmt::Display for TokKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spelling())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tok {
    pub kind: TokKind,
    pub text: String,
    pub span: Span,
}

impl Tok {
    pub fn new(kind: TokKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}
