use lpp_ast::ast::{Place, Stmt};
use lpp_ast::error::CompileError;

use crate::emitter::Emitter;
use crate::expr;
use crate::python;

/// Emit `stmts` one level deeper than the current line; `pass` if empty.
pub fn emit_block(em: &mut Emitter<'_>, stmts: &[Stmt]) -> Result<(), CompileError> {
    em.indent();
    if stmts.is_empty() {
        em.writeln("pass");
    }
    for s in stmts {
        emit_stmt(em, s)?;
    }
    em.dedent();
    Ok(())
}

pub fn emit_stmt(em: &mut Emitter<'_>, stmt: &Stmt) -> Result<(), CompileError> {
    match stmt {
        Stmt::Assign { target, value, .. } => {
            let line = format!("{} = {}", expr::render_place(target)?, expr::render(value)?);
            em.writeln(&line);
        }
        Stmt::Read { targets, .. } => {
            for t in targets {
                emit_read(em, t)?;
            }
        }
        Stmt::Write { items, .. } => {
            let line = format!("print({})", expr::list(items)?);
            em.writeln(&line);
        }
        Stmt::Call { callee, args, .. } => {
            let line = expr::call(&callee.text, args)?;
            em.writeln(&line);
        }
        Stmt::Bare(place) => {
            let line = expr::render_place(place)?;
            em.writeln(&line);
        }
        Stmt::If {
            cond, then_, else_, ..
        } => {
            em.writeln(&format!("if {}:", expr::condition(cond)?));
            emit_block(em, then_)?;
            if let Some(else_) = else_ {
                em.writeln("else:");
                emit_block(em, else_)?;
            }
        }
        Stmt::For {
            var,
            start,
            end,
            step,
            body,
            ..
        } => {
            let step = match step {
                Some(s) => expr::render(s)?,
                None => "1".to_string(),
            };
            em.writeln(&format!(
                "for {} in range({}, {}, {}):",
                python::name(&var.text),
                expr::render(start)?,
                expr::render(end)?,
                step
            ));
            emit_block(em, body)?;
        }
        Stmt::While { cond, body, .. } => {
            em.writeln(&format!("while {}:", expr::condition(cond)?));
            emit_block(em, body)?;
        }
        Stmt::Return { value: None, .. } => em.writeln("return"),
        Stmt::Return {
            value: Some(v), ..
        } => {
            let line = format!("return {}", expr::render(v)?);
            em.writeln(&line);
        }
    }
    Ok(())
}

fn emit_read(em: &mut Emitter<'_>, target: &Place) -> Result<(), CompileError> {
    let ty = em.symtab.place_type(target)?;
    let line = format!(
        "{} = {}",
        expr::render_place(target)?,
        python::input_cast(ty.as_ref())
    );
    em.writeln(&line);
    Ok(())
}

/// Bare names a block rebinds: assignment and `leia` targets plus `para`
/// variables, first occurrence first.
pub fn rebound_names<'s>(stmts: &'s [Stmt], out: &mut Vec<&'s str>) {
    fn note<'a>(name: &'a str, out: &mut Vec<&'a str>) {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    for s in stmts {
        match s {
            Stmt::Assign { target, .. } if target.is_bare() => note(&target.name.text, out),
            Stmt::Read { targets, .. } => {
                for t in targets.iter().filter(|t| t.is_bare()) {
                    note(&t.name.text, out);
                }
            }
            Stmt::For { var, body, .. } => {
                note(&var.text, out);
                rebound_names(body, out);
            }
            Stmt::If { then_, else_, .. } => {
                rebound_names(then_, out);
                if let Some(else_) = else_ {
                    rebound_names(else_, out);
                }
            }
            Stmt::While { body, .. } => rebound_names(body, out),
            _ => {}
        }
    }
}
