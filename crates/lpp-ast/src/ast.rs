use crate::span::Span;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub name: Ident,
    pub records: Vec<RecordDecl>,
    pub globals: Vec<VarDecl>,
    pub routines: Vec<Routine>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub text: String,
    pub span: Span,
}

/// `tipo <name> = registro <fields> fimregistro`
#[derive(Debug, Clone, Serialize)]
pub struct RecordDecl {
    pub name: Ident,
    pub fields: Vec<VarDecl>,
    pub span: Span,
}

/// `a, b : <type>`
#[derive(Debug, Clone, Serialize)]
pub struct VarDecl {
    pub names: Vec<Ident>,
    pub ty: TypeRef,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Prim {
    Caractere,
    Inteiro,
    Real,
    Logico,
}

/// Inclusive `lo..hi` array bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bound {
    pub lo: i64,
    pub hi: i64,
}

#[derive(Debug, Clone, Serialize)]
pub enum TypeRef {
    Prim(Prim, Span),
    /// A user-declared record type.
    Named(Ident),
    /// `conjunto[lo..hi, ...] de <elem>`
    Array {
        dims: Vec<Bound>,
        elem: Box<TypeRef>,
        span: Span,
    },
}

impl TypeRef {
    pub fn span(&self) -> Span {
        match self {
            TypeRef::Prim(_, sp) => *sp,
            TypeRef::Named(id) => id.span,
            TypeRef::Array { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoutineKind {
    Procedure,
    Function,
}

#[derive(Debug, Clone, Serialize)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct Routine {
    pub kind: RoutineKind,
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret: Option<TypeRef>,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum Accessor {
    /// `[i]` or `[i, j]`
    Index(Vec<Expr>, Span),
    /// `.field`
    Field(Ident),
}

/// Something that can be read into or assigned: `x`, `v[i]`, `m[i, j]`, `p.x`.
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub name: Ident,
    pub accessors: Vec<Accessor>,
    pub span: Span,
}

impl Place {
    /// A bare name with no indexing or field access.
    pub fn is_bare(&self) -> bool {
        self.accessors.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum Stmt {
    Assign {
        target: Place,
        value: Expr,
        span: Span,
    },
    Read {
        targets: Vec<Place>,
        span: Span,
    },
    Write {
        items: Vec<Expr>,
        span: Span,
    },
    /// Procedure or function invoked in statement position.
    Call {
        callee: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    /// A reference with no effect (`x`).
    Bare(Place),
    If {
        cond: Expr,
        then_: Vec<Stmt>,
        else_: Option<Vec<Stmt>>,
        span: Span,
    },
    For {
        var: Ident,
        start: Expr,
        end: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        span: Span,
    },
}

#[derive(Debug, Clone, Serialize)]
pub enum Lit {
    Int(String),
    Real(String),
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    // logical
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    IntDiv,
}

/// One `<op> <operand>` step of a chain.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub op: BinOp,
    pub operand: Expr,
}

#[derive(Debug, Clone, Serialize)]
pub enum Expr {
    Lit(Lit, Span),
    Place(Place),
    Call {
        callee: Ident,
        args: Vec<Expr>,
        span: Span,
    },
    Paren {
        inner: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnOp,
        expr: Box<Expr>,
        span: Span,
    },
    /// Operators in source order. Logical and arithmetic runs may interleave;
    /// no precedence is imposed beyond the order written.
    Chain {
        head: Box<Expr>,
        links: Vec<Link>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Lit(_, sp) => *sp,
            Expr::Place(p) => p.span,
            Expr::Call { span, .. }
            | Expr::Paren { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Chain { span, .. } => *span,
        }
    }
}
