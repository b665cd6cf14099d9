use lpp_ast::ast::{Program, RecordDecl, Routine, RoutineKind, TypeRef, VarDecl};
use lpp_ast::error::CompileError;

use crate::emitter::Emitter;
use crate::python::{self, DATACLASS_IMPORT};
use crate::stmt;

pub fn emit_program(em: &mut Emitter<'_>, program: &Program) -> Result<(), CompileError> {
    if !program.records.is_empty() {
        em.writeln(DATACLASS_IMPORT);
        em.blank();
    }
    em.writeln(&format!("# programa {}", program.name.text));

    for rec in &program.records {
        em.blank();
        emit_record(em, rec)?;
    }

    let globals: Vec<&str> = program
        .globals
        .iter()
        .flat_map(|d| d.names.iter().map(|n| n.text.as_str()))
        .collect();
    for routine in &program.routines {
        em.blank();
        emit_routine(em, routine, &globals)?;
    }

    em.blank();
    em.writeln("# var");
    for decl in &program.globals {
        emit_var_decl(em, decl)?;
    }

    em.blank();
    em.writeln("# inicio");
    for s in &program.body {
        stmt::emit_stmt(em, s)?;
    }
    em.writeln("# fim");
    Ok(())
}

fn emit_record(em: &mut Emitter<'_>, rec: &RecordDecl) -> Result<(), CompileError> {
    tracing::trace!(record = %rec.name.text, "emit record");
    em.writeln("@dataclass");
    em.writeln(&format!("class {}:", python::name(&rec.name.text)));
    em.indent();
    if rec.fields.is_empty() {
        em.writeln("pass");
    }
    for decl in &rec.fields {
        let default = field_default(&decl.ty, em)?;
        let annot = python::type_name(&decl.ty);
        for n in &decl.names {
            em.writeln(&format!("{}: {annot} = {default}", python::name(&n.text)));
        }
    }
    em.dedent();
    Ok(())
}

/// Dataclass fields may not share a mutable default.
fn field_default(ty: &TypeRef, em: &Emitter<'_>) -> Result<String, CompileError> {
    let value = python::default_value(ty, em.symtab)?;
    Ok(match ty {
        TypeRef::Prim(..) => value,
        TypeRef::Named(id) => format!("field(default_factory={})", python::name(&id.text)),
        TypeRef::Array { .. } => format!("field(default_factory=lambda: {value})"),
    })
}

fn emit_routine(
    em: &mut Emitter<'_>,
    routine: &Routine,
    globals: &[&str],
) -> Result<(), CompileError> {
    tracing::trace!(routine = %routine.name.text, kind = ?routine.kind, "emit routine");
    let params = routine
        .params
        .iter()
        .map(|p| format!("{}: {}", python::name(&p.name.text), python::type_name(&p.ty)))
        .collect::<Vec<_>>()
        .join(", ");
    let ret = match (&routine.kind, &routine.ret) {
        (RoutineKind::Procedure, _) => String::new(),
        (RoutineKind::Function, Some(ty)) => format!(" -> {}", python::type_name(ty)),
        (RoutineKind::Function, None) => " -> None".to_string(),
    };
    em.writeln(&format!(
        "def {}({params}){ret}:",
        python::name(&routine.name.text)
    ));

    em.indent();
    let mut rebound = Vec::new();
    stmt::rebound_names(&routine.body, &mut rebound);
    let shared: Vec<_> = rebound
        .into_iter()
        .filter(|n| globals.contains(n))
        .map(python::name)
        .collect();
    if !shared.is_empty() {
        em.writeln(&format!("global {}", shared.join(", ")));
    }
    for decl in &routine.locals {
        emit_var_decl(em, decl)?;
    }
    for s in &routine.body {
        stmt::emit_stmt(em, s)?;
    }
    if shared.is_empty() && routine.locals.is_empty() && routine.body.is_empty() {
        em.writeln("pass");
    }
    em.dedent();
    Ok(())
}

/// `a, b : inteiro` becomes `a, b = 0, 0`; each name gets its own value.
fn emit_var_decl(em: &mut Emitter<'_>, decl: &VarDecl) -> Result<(), CompileError> {
    let value = python::default_value(&decl.ty, em.symtab)?;
    let names = decl
        .names
        .iter()
        .map(|n| python::name(&n.text))
        .collect::<Vec<_>>()
        .join(", ");
    let values = vec![value; decl.names.len()].join(", ");
    em.writeln(&format!("{names} = {values}"));
    Ok(())
}
