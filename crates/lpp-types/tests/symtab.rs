use lpp_ast::ast::{Accessor, Bound, Expr, Ident, Lit, Place};
use lpp_ast::error::{CompileError, ErrorKind};
use lpp_ast::span::Span;
use lpp_types::{SymbolKind, Symtab, Type};

fn sp() -> Span {
    Span::default()
}

fn ident(name: &str) -> Ident {
    Ident {
        text: name.to_string(),
        span: sp(),
    }
}

fn one() -> Expr {
    Expr::Lit(Lit::Int("1".into()), sp())
}

fn place(name: &str, accessors: Vec<Accessor>) -> Place {
    Place {
        name: ident(name),
        accessors,
        span: sp(),
    }
}

#[test]
fn duplicate_declaration_reports_both_sites() {
    let mut st = Symtab::new();
    let first = Span {
        start: 0,
        end: 1,
        line: 2,
        col: 3,
    };
    let second = Span {
        start: 10,
        end: 11,
        line: 5,
        col: 3,
    };
    st.declare("x", SymbolKind::Variable, Some(Type::inteiro()), first)
        .unwrap();
    let err = st
        .declare("x", SymbolKind::Procedure, None, second)
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::DuplicateDeclaration {
            name: "x".into(),
            span: second,
            previous: first,
        }
    );
}

#[test]
fn namespace_is_shared_across_kinds() {
    let mut st = Symtab::new();
    st.declare_record("ponto", vec![], sp()).unwrap();
    let err = st
        .declare("ponto", SymbolKind::Variable, Some(Type::real()), sp())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateDeclaration);
}

#[test]
fn lookup_miss_is_undeclared() {
    let st = Symtab::new();
    let err = st.lookup_kind("nada", sp()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndeclaredIdentifier);
    assert!(st.lookup_type("nada", sp()).is_err());
}

#[test]
fn record_types_are_distinguished_from_variables() {
    let mut st = Symtab::new();
    st.declare_record(
        "ponto",
        vec![("x".into(), Type::inteiro()), ("y".into(), Type::inteiro())],
        sp(),
    )
    .unwrap();
    st.declare("p", SymbolKind::Variable, Some(Type::Record("ponto".into())), sp())
        .unwrap();
    st.declare("mostra", SymbolKind::Procedure, None, sp())
        .unwrap();

    assert!(st.is_record_type("ponto"));
    assert!(!st.is_record_type("p"));
    assert!(!st.is_record_type("inteiro"));
    assert!(st.is_routine("mostra"));
    assert!(!st.is_routine("p"));
}

#[test]
fn place_type_follows_indices_and_fields() {
    let mut st = Symtab::new();
    st.declare_record(
        "aluno",
        vec![
            ("nome".into(), Type::caractere()),
            ("nota".into(), Type::real()),
        ],
        sp(),
    )
    .unwrap();
    st.declare(
        "turma",
        SymbolKind::Variable,
        Some(Type::Array {
            dims: vec![Bound { lo: 1, hi: 30 }],
            elem: Box::new(Type::Record("aluno".into())),
        }),
        sp(),
    )
    .unwrap();
    st.declare(
        "m",
        SymbolKind::Variable,
        Some(Type::Array {
            dims: vec![Bound { lo: 1, hi: 3 }, Bound { lo: 1, hi: 3 }],
            elem: Box::new(Type::inteiro()),
        }),
        sp(),
    )
    .unwrap();

    let nota = place(
        "turma",
        vec![Accessor::Index(vec![one()], sp()), Accessor::Field(ident("nota"))],
    );
    assert_eq!(st.place_type(&nota).unwrap(), Some(Type::real()));

    let cell = place("m", vec![Accessor::Index(vec![one(), one()], sp())]);
    assert_eq!(st.place_type(&cell).unwrap(), Some(Type::inteiro()));

    let chained = place(
        "m",
        vec![
            Accessor::Index(vec![one()], sp()),
            Accessor::Index(vec![one()], sp()),
        ],
    );
    assert_eq!(st.place_type(&chained).unwrap(), Some(Type::inteiro()));

    let missing = place(
        "turma",
        vec![Accessor::Index(vec![one()], sp()), Accessor::Field(ident("idade"))],
    );
    let err = st.place_type(&missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndeclaredIdentifier);
}

#[cfg(feature = "serde")]
#[test]
fn types_serialize_with_feature() {
    let ty = Type::Array {
        dims: vec![Bound { lo: 1, hi: 3 }],
        elem: Box::new(Type::inteiro()),
    };
    let json = serde_json::to_value(&ty).unwrap();
    assert_eq!(json["Array"]["dims"][0]["hi"], 3);
    assert_eq!(json["Array"]["elem"]["Prim"], "Inteiro");
}
