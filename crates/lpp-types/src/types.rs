//! Declared data kinds.

use lpp_ast::ast::{Bound, Prim, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Type {
    /// Primitive types.
    Prim(Prim),

    /// User-declared record type, by name.
    Record(String),

    /// Fixed-size array (one bound) or matrix (two bounds).
    Array { dims: Vec<Bound>, elem: Box<Type> },
}

impl Type {
    pub fn from_ref(ty: &TypeRef) -> Self {
        match ty {
            TypeRef::Prim(p, _) => Type::Prim(*p),
            TypeRef::Named(id) => Type::Record(id.text.clone()),
            TypeRef::Array { dims, elem, .. } => Type::Array {
                dims: dims.clone(),
                elem: Box::new(Type::from_ref(elem)),
            },
        }
    }

    pub fn caractere() -> Self {
        Type::Prim(Prim::Caractere)
    }
    pub fn inteiro() -> Self {
        Type::Prim(Prim::Inteiro)
    }
    pub fn real() -> Self {
        Type::Prim(Prim::Real)
    }
    pub fn logico() -> Self {
        Type::Prim(Prim::Logico)
    }

    pub fn prim(&self) -> Option<Prim> {
        match self {
            Type::Prim(p) => Some(*p),
            _ => None,
        }
    }

    /// Type left after applying `count` indices to an array. `None` if the
    /// value is not an array or has fewer dimensions than indices.
    pub fn index(&self, count: usize) -> Option<Type> {
        let Type::Array { dims, elem } = self else {
            return None;
        };
        match count.cmp(&dims.len()) {
            std::cmp::Ordering::Less => Some(Type::Array {
                dims: dims[count..].to_vec(),
                elem: elem.clone(),
            }),
            std::cmp::Ordering::Equal => Some((**elem).clone()),
            std::cmp::Ordering::Greater => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Prim(Prim::Caractere) => write!(f, "caractere"),
            Type::Prim(Prim::Inteiro) => write!(f, "inteiro"),
            Type::Prim(Prim::Real) => write!(f, "real"),
            Type::Prim(Prim::Logico) => write!(f, "logico"),
            Type::Record(name) => write!(f, "{name}"),
            Type::Array { dims, elem } => {
                write!(f, "conjunto[")?;
                for (i, b) in dims.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}..{}", b.lo, b.hi)?;
                }
                write!(f, "] de {elem}")
            }
        }
    }
}
