use lpp_ast::ast::{Accessor, Expr, Lit, Place, UnOp};
use lpp_ast::error::CompileError;

use crate::python;

pub fn render(expr: &Expr) -> Result<String, CompileError> {
    match expr {
        Expr::Lit(lit, _) => Ok(literal(lit)),
        Expr::Place(place) => render_place(place),
        Expr::Call { callee, args, .. } => call(&callee.text, args),
        Expr::Paren { inner, .. } => Ok(format!("({})", render(inner)?)),
        Expr::Unary {
            op: UnOp::Neg,
            expr,
            ..
        } => Ok(format!("-{}", chain_operand(expr)?)),
        Expr::Unary { op, expr, .. } => Ok(format!("{}{}", python::unop(*op), render(expr)?)),
        Expr::Chain { head, links, .. } => {
            let mut out = chain_operand(head)?;
            for link in links {
                out.push(' ');
                out.push_str(python::binop(link.op));
                out.push(' ');
                out.push_str(&chain_operand(&link.operand)?);
            }
            Ok(out)
        }
    }
}

/// Python's `not` binds looser than every binary operator, so inside a
/// chain it only applies to its own operand when parenthesised.
fn chain_operand(expr: &Expr) -> Result<String, CompileError> {
    match expr {
        Expr::Unary { op: UnOp::Not, .. } => Ok(format!("({})", render(expr)?)),
        _ => render(expr),
    }
}

/// Condition of an `if`/`while`, always parenthesised exactly once.
pub fn condition(expr: &Expr) -> Result<String, CompileError> {
    match expr {
        Expr::Paren { .. } => render(expr),
        _ => Ok(format!("({})", render(expr)?)),
    }
}

pub fn call(callee: &str, args: &[Expr]) -> Result<String, CompileError> {
    Ok(format!("{}({})", python::name(callee), list(args)?))
}

/// Comma-separated rendering of `items`.
pub fn list(items: &[Expr]) -> Result<String, CompileError> {
    let rendered = items.iter().map(render).collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(", "))
}

pub fn render_place(place: &Place) -> Result<String, CompileError> {
    let mut out = python::name(&place.name.text).into_owned();
    for acc in &place.accessors {
        match acc {
            Accessor::Index(idx, span) => {
                if idx.len() > 2 {
                    return Err(CompileError::UnimplementedConstruct {
                        construct: format!("{}-index subscript", idx.len()),
                        span: *span,
                    });
                }
                for i in idx {
                    out.push('[');
                    out.push_str(&render(i)?);
                    out.push(']');
                }
            }
            Accessor::Field(f) => {
                out.push('.');
                out.push_str(&python::name(&f.text));
            }
        }
    }
    Ok(out)
}

fn literal(lit: &Lit) -> String {
    match lit {
        // Python rejects leading zeros on integer literals
        Lit::Int(n) => match n.trim_start_matches('0') {
            "" => "0".to_string(),
            digits => digits.to_string(),
        },
        Lit::Real(n) => n.clone(),
        Lit::Str(s) => python::quote(s),
        Lit::Bool(true) => "True".to_string(),
        Lit::Bool(false) => "False".to_string(),
    }
}
