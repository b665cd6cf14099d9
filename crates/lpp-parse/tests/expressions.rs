use lpp_ast::ast::{BinOp, Expr, Lit, Stmt, UnOp};
use lpp_parse::parse_str;

/// Helper: parse `l <- <src>` with a handful of declared variables and
/// return the right-hand side.
fn rhs(src: &str) -> Expr {
    let program = format!(
        "programa t
         var
           a, b, c : inteiro
           l : logico
         inicio
           l <- {src}
         fim"
    );
    let parsed = parse_str("<mem>", &program).expect("parse ok");
    let Stmt::Assign { value, .. } = parsed.program.body.into_iter().next().unwrap() else {
        panic!("expected Assign");
    };
    value
}

fn ops(e: &Expr) -> Vec<BinOp> {
    let Expr::Chain { links, .. } = e else {
        panic!("expected Chain, got {e:?}");
    };
    links.iter().map(|l| l.op).collect()
}

#[test]
fn mixed_classes_keep_source_order() {
    let e = rhs("a > b e c + 1");
    assert_eq!(ops(&e), vec![BinOp::Gt, BinOp::And, BinOp::Add]);
    let Expr::Chain { head, links, .. } = &e else {
        unreachable!()
    };
    assert!(matches!(head.as_ref(), Expr::Place(p) if p.name.text == "a"));
    assert!(matches!(&links[2].operand, Expr::Lit(Lit::Int(n), _) if n == "1"));
}

#[test]
fn arithmetic_then_logical_reenters() {
    let e = rhs("a + b * c >= 10 ou a = 0");
    assert_eq!(
        ops(&e),
        vec![BinOp::Add, BinOp::Mul, BinOp::Ge, BinOp::Or, BinOp::Eq]
    );
}

#[test]
fn no_precedence_climbing_inside_a_class() {
    // `*` does not bind tighter than `+`: the chain is flat
    let e = rhs("a + b * c - 2 ^ 2 mod 3");
    assert_eq!(
        ops(&e),
        vec![BinOp::Add, BinOp::Mul, BinOp::Sub, BinOp::Pow, BinOp::Mod]
    );
}

#[test]
fn parentheses_group_a_sub_expression() {
    let e = rhs("(a + b) * 2 <> c");
    assert_eq!(ops(&e), vec![BinOp::Mul, BinOp::Ne]);
    let Expr::Chain { head, .. } = &e else {
        unreachable!()
    };
    let Expr::Paren { inner, .. } = head.as_ref() else {
        panic!("expected Paren head");
    };
    assert_eq!(ops(inner), vec![BinOp::Add]);
}

#[test]
fn unary_operators_bind_to_one_primary() {
    let e = rhs("nao l e -a < b");
    assert_eq!(ops(&e), vec![BinOp::And, BinOp::Lt]);
    let Expr::Chain { head, links, .. } = &e else {
        unreachable!()
    };
    assert!(matches!(head.as_ref(), Expr::Unary { op: UnOp::Not, .. }));
    assert!(matches!(&links[0].operand, Expr::Unary { op: UnOp::Neg, .. }));
}

#[test]
fn single_primary_is_not_a_chain() {
    assert!(matches!(rhs("verdadeiro"), Expr::Lit(Lit::Bool(true), _)));
    assert!(matches!(rhs("\"sim\""), Expr::Lit(Lit::Str(s), _) if s == "sim"));
    assert!(matches!(rhs("2.5"), Expr::Lit(Lit::Real(s), _) if s == "2.5"));
}

#[test]
fn nao_is_not_a_binary_operator() {
    let program = "programa t var a, b : inteiro l : logico inicio l <- a nao b fim";
    let err = parse_str("<mem>", program).unwrap_err();
    assert!(err.to_string().contains("a binary operator"), "{err}");
}
