//! Python spellings: names, type annotations, zero values and operators.

use std::borrow::Cow;

use lpp_ast::ast::{BinOp, Bound, Prim, TypeRef, UnOp};
use lpp_ast::error::CompileError;
use lpp_ast::span::Span;
use lpp_types::{Symtab, Type};

pub const DATACLASS_IMPORT: &str = "from dataclasses import dataclass, field";

/// Python keywords plus the builtins the generated code itself calls.
const RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "bool", "dataclass", "field", "float", "input", "int",
    "list", "print", "range", "str",
];

/// An LPP identifier as a Python identifier. Names that would collide with
/// Python syntax or the builtins used by the output get a leading `_`; LPP
/// identifiers start with a letter, so the result cannot name anything else.
pub fn name(ident: &str) -> Cow<'_, str> {
    if RESERVED.contains(&ident) {
        Cow::Owned(format!("_{ident}"))
    } else {
        Cow::Borrowed(ident)
    }
}

pub fn prim_type(p: Prim) -> &'static str {
    match p {
        Prim::Caractere => "str",
        Prim::Inteiro => "int",
        Prim::Real => "float",
        Prim::Logico => "bool",
    }
}

/// Annotation used for parameters, return types and record fields.
pub fn type_name(ty: &TypeRef) -> Cow<'_, str> {
    match ty {
        TypeRef::Prim(p, _) => Cow::Borrowed(prim_type(*p)),
        TypeRef::Named(id) => name(&id.text),
        TypeRef::Array { .. } => Cow::Borrowed("list"),
    }
}

pub fn prim_default(p: Prim) -> &'static str {
    match p {
        Prim::Caractere => "''",
        Prim::Inteiro => "0",
        Prim::Real => "0.0",
        Prim::Logico => "False",
    }
}

/// Zero value for a declared type.
pub fn default_value(ty: &TypeRef, symtab: &Symtab) -> Result<String, CompileError> {
    match ty {
        TypeRef::Prim(p, _) => Ok(prim_default(*p).to_string()),
        TypeRef::Named(id) => record_ctor(&id.text, id.span, symtab),
        TypeRef::Array { dims, elem, span } => {
            let elem_default = default_value(elem, symtab)?;
            let by_copy = matches!(elem.as_ref(), TypeRef::Prim(..));
            match dims.as_slice() {
                [Bound { hi, .. }] if by_copy => Ok(format!("[{elem_default}] * {hi}")),
                [Bound { hi, .. }] => Ok(format!("[{elem_default} for _ in range({hi})]")),
                [rows, cols] => Ok(format!(
                    "[[{elem_default} for _ in range({})] for _ in range({})]",
                    cols.hi, rows.hi
                )),
                _ => Err(CompileError::UnimplementedConstruct {
                    construct: format!("{}-dimensional conjunto", dims.len()),
                    span: *span,
                }),
            }
        }
    }
}

fn record_ctor(record: &str, span: Span, symtab: &Symtab) -> Result<String, CompileError> {
    if symtab.is_record_type(record) {
        Ok(format!("{}()", name(record)))
    } else {
        Err(CompileError::undeclared(record, span))
    }
}

/// Right-hand side of a `leia` into a place of type `ty`.
pub fn input_cast(ty: Option<&Type>) -> &'static str {
    match ty.and_then(Type::prim) {
        Some(Prim::Inteiro) => "int(input())",
        Some(Prim::Real) => "float(input())",
        _ => "input()",
    }
}

pub fn binop(op: BinOp) -> &'static str {
    match op {
        BinOp::And => "and",
        BinOp::Or => "or",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Pow => "**",
        BinOp::Mod => "%",
        BinOp::IntDiv => "//",
    }
}

pub fn unop(op: UnOp) -> &'static str {
    match op {
        UnOp::Not => "not ",
        UnOp::Neg => "-",
    }
}

/// Double-quoted Python string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
