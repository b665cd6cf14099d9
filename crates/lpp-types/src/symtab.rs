// crates/lpp-types/src/symtab.rs
// Flat symbol table shared by the parser and the code generator

use crate::types::Type;
use lpp_ast::ast::{Accessor, Place};
use lpp_ast::error::CompileError;
use lpp_ast::span::Span;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SymbolKind {
    Variable,
    RecordType,
    Procedure,
    Function,
}

impl SymbolKind {
    pub fn is_routine(self) -> bool {
        matches!(self, SymbolKind::Procedure | SymbolKind::Function)
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Declared type for variables, return type for functions.
    pub ty: Option<Type>,
    /// Field names and types, record types only.
    pub fields: Vec<(String, Type)>,
    pub span: Span,
}

/// One namespace for variables, parameters, record types, procedures and
/// functions. Entries are never removed; a table lives for one compilation.
#[derive(Debug, Default)]
pub struct Symtab {
    entries: HashMap<String, Symbol>,
}

impl Symtab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        ty: Option<Type>,
        span: Span,
    ) -> Result<(), CompileError> {
        self.insert(Symbol {
            name: name.to_string(),
            kind,
            ty,
            fields: Vec::new(),
            span,
        })
    }

    pub fn declare_record(
        &mut self,
        name: &str,
        fields: Vec<(String, Type)>,
        span: Span,
    ) -> Result<(), CompileError> {
        self.insert(Symbol {
            name: name.to_string(),
            kind: SymbolKind::RecordType,
            ty: None,
            fields,
            span,
        })
    }

    fn insert(&mut self, sym: Symbol) -> Result<(), CompileError> {
        if let Some(prev) = self.entries.get(&sym.name) {
            return Err(CompileError::DuplicateDeclaration {
                name: sym.name,
                span: sym.span,
                previous: prev.span,
            });
        }
        tracing::trace!(name = %sym.name, kind = ?sym.kind, "declare");
        self.entries.insert(sym.name.clone(), sym);
        Ok(())
    }

    /// Fill in a type once it is known (a function's return type is parsed
    /// after its name has been declared).
    pub fn set_type(&mut self, name: &str, ty: Type) {
        if let Some(sym) = self.entries.get_mut(name) {
            sym.ty = Some(ty);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    /// `span` is where the name was used, for the error.
    pub fn lookup(&self, name: &str, span: Span) -> Result<&Symbol, CompileError> {
        self.entries
            .get(name)
            .ok_or_else(|| CompileError::undeclared(name, span))
    }

    pub fn lookup_kind(&self, name: &str, span: Span) -> Result<SymbolKind, CompileError> {
        Ok(self.lookup(name, span)?.kind)
    }

    pub fn lookup_type(&self, name: &str, span: Span) -> Result<Option<&Type>, CompileError> {
        Ok(self.lookup(name, span)?.ty.as_ref())
    }

    pub fn is_record_type(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(s) if s.kind == SymbolKind::RecordType)
    }

    pub fn is_routine(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(s) if s.kind.is_routine())
    }

    pub fn field_type(&self, record: &str, field: &str, span: Span) -> Result<&Type, CompileError> {
        let sym = self.lookup(record, span)?;
        sym.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, ty)| ty)
            .ok_or_else(|| CompileError::undeclared(format!("{record}.{field}"), span))
    }

    /// Resolve the type of `v[i]`, `m[i, j]`, `p.x` and friends. `Ok(None)`
    /// when indexing runs past what the declaration describes.
    pub fn place_type(&self, place: &Place) -> Result<Option<Type>, CompileError> {
        let mut ty = self.lookup_type(&place.name.text, place.name.span)?.cloned();
        for acc in &place.accessors {
            let Some(cur) = ty else {
                return Ok(None);
            };
            ty = match acc {
                Accessor::Index(idx, _) => cur.index(idx.len()),
                Accessor::Field(field) => match &cur {
                    Type::Record(rec) => Some(self.field_type(rec, &field.text, field.span)?.clone()),
                    _ => {
                        return Err(CompileError::undeclared(
                            format!("{}.{}", place.name.text, field.text),
                            field.span,
                        ))
                    }
                },
            };
        }
        Ok(ty)
    }
}
