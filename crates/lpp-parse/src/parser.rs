use crate::compact;
use crate::lexer::Lexer;
use lpp_ast::ast::{
    Accessor, BinOp, Bound, Expr, Ident, Link, Lit, Param, Place, Prim, Program, RecordDecl,
    Routine, RoutineKind, Stmt, TypeRef, UnOp, VarDecl,
};
use lpp_ast::error::CompileError;
use lpp_ast::token::{Tok, TokKind};
use lpp_types::{SymbolKind, Symtab, Type};

/// Maximum nesting of blocks and parenthesised/chained expressions.
pub const MAX_NESTING_DEPTH: u32 = 128;

type Result<T> = std::result::Result<T, CompileError>;

/// Everything one parse produces.
#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    /// Compacted token stream, in consumption order.
    pub tokens: Vec<Tok>,
    pub symtab: Symtab,
}

#[tracing::instrument(level = "debug", skip_all, fields(file = _file))]
pub fn parse_str(_file: &str, src: &str) -> Result<Parsed> {
    let mut p = Parser::new(src)?;
    let program = p.parse_program()?;
    tracing::debug!(
        tokens = p.tokens.len(),
        routines = program.routines.len(),
        "parsed"
    );
    Ok(Parsed {
        program,
        tokens: p.tokens,
        symtab: p.symtab,
    })
}

struct Parser<'a> {
    lex: Lexer<'a>,
    cur: Tok,
    symtab: Symtab,
    tokens: Vec<Tok>,
    depth: u32,
    /// Kind of the routine whose body is being parsed.
    routine: Option<RoutineKind>,
    /// Calls inside routine bodies to names not declared yet.
    pending_calls: Vec<Ident>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self> {
        let mut lex = Lexer::new(src);
        let cur = lex.next_tok()?;
        Ok(Self {
            lex,
            cur,
            symtab: Symtab::new(),
            tokens: Vec::new(),
            depth: 0,
            routine: None,
            pending_calls: Vec::new(),
        })
    }

    /// Consume the current token, recording it in the compacted stream.
    fn bump(&mut self) -> Result<Tok> {
        let next = self.lex.next_tok()?;
        let tok = std::mem::replace(&mut self.cur, next);
        if compact::keeps(tok.kind) {
            self.tokens.push(tok.clone());
        }
        Ok(tok)
    }

    fn at(&self, k: TokKind) -> bool {
        self.cur.kind == k
    }

    fn expect(&mut self, k: TokKind) -> Result<Tok> {
        if self.at(k) {
            self.bump()
        } else {
            Err(CompileError::unexpected(&self.cur, format!("'{}'", k)))
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CompileError::unexpected(
                &self.cur,
                format!("nesting of at most {MAX_NESTING_DEPTH} levels"),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_ident(&mut self) -> Result<Ident> {
        if !self.at(TokKind::Ident) {
            return Err(CompileError::unexpected(&self.cur, "identifier"));
        }
        let tok = self.bump()?;
        Ok(Ident {
            text: tok.text,
            span: tok.span,
        })
    }

    // ======= program / declarations =======

    fn parse_program(&mut self) -> Result<Program> {
        let start = self.expect(TokKind::Programa)?.span;
        let name = self.parse_ident()?;

        let records = if self.at(TokKind::Tipo) {
            self.parse_records()?
        } else {
            Vec::new()
        };

        self.expect(TokKind::Var)?;
        let globals = self.parse_decls(true)?;

        let mut routines = Vec::new();
        while matches!(self.cur.kind, TokKind::Procedimento | TokKind::Funcao) {
            routines.push(self.parse_routine()?);
        }
        self.resolve_pending_calls()?;

        self.expect(TokKind::Inicio)?;
        let body = self.parse_stmts(&[TokKind::Fim])?;
        let end = self.expect(TokKind::Fim)?.span;
        if !self.at(TokKind::Eof) {
            return Err(CompileError::unexpected(&self.cur, "end of input"));
        }

        Ok(Program {
            name,
            records,
            globals,
            routines,
            body,
            span: start.to(end),
        })
    }

    /// `tipo (<name> = registro <decl>* fimregistro)*`
    fn parse_records(&mut self) -> Result<Vec<RecordDecl>> {
        self.expect(TokKind::Tipo)?;
        let mut records = Vec::new();
        while self.at(TokKind::Ident) {
            let name = self.parse_ident()?;
            self.expect(TokKind::Eq)?;
            self.expect(TokKind::Registro)?;
            let fields = self.parse_decls(false)?;
            let end = self.expect(TokKind::FimRegistro)?.span;

            let mut resolved: Vec<(String, Type)> = Vec::new();
            let mut seen: Vec<&Ident> = Vec::new();
            for decl in &fields {
                let ty = Type::from_ref(&decl.ty);
                for n in &decl.names {
                    if let Some(prev) = seen.iter().find(|p| p.text == n.text) {
                        return Err(CompileError::DuplicateDeclaration {
                            name: n.text.clone(),
                            span: n.span,
                            previous: prev.span,
                        });
                    }
                    seen.push(n);
                    resolved.push((n.text.clone(), ty.clone()));
                }
            }
            self.symtab.declare_record(&name.text, resolved, name.span)?;
            tracing::debug!(record = %name.text, fields = fields.len(), "record type");

            let span = name.span.to(end);
            records.push(RecordDecl { name, fields, span });
        }
        Ok(records)
    }

    /// Zero or more `a, b : <type>` lines. Variables go into the symbol
    /// table; record fields (`declare == false`) stay with their record.
    fn parse_decls(&mut self, declare: bool) -> Result<Vec<VarDecl>> {
        let mut decls = Vec::new();
        while self.at(TokKind::Ident) {
            let mut names = vec![self.parse_ident()?];
            while self.at(TokKind::Comma) {
                self.bump()?;
                names.push(self.parse_ident()?);
            }
            self.expect(TokKind::Colon)?;
            let ty = self.parse_type()?;
            if declare {
                let resolved = Type::from_ref(&ty);
                for n in &names {
                    self.symtab.declare(
                        &n.text,
                        SymbolKind::Variable,
                        Some(resolved.clone()),
                        n.span,
                    )?;
                }
            }
            let span = names[0].span.to(ty.span());
            decls.push(VarDecl { names, ty, span });
        }
        Ok(decls)
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        if self.at(TokKind::Conjunto) {
            let start = self.bump()?.span;
            self.expect(TokKind::LBracket)?;
            let mut dims = vec![self.parse_bound()?];
            while self.at(TokKind::Comma) {
                self.bump()?;
                dims.push(self.parse_bound()?);
            }
            self.expect(TokKind::RBracket)?;
            self.expect(TokKind::De)?;
            let elem = self.parse_elem_type()?;
            let span = start.to(elem.span());
            return Ok(TypeRef::Array {
                dims,
                elem: Box::new(elem),
                span,
            });
        }
        self.parse_elem_type()
    }

    /// A primitive keyword or a declared record name.
    fn parse_elem_type(&mut self) -> Result<TypeRef> {
        let prim = match self.cur.kind {
            TokKind::Caractere => Some(Prim::Caractere),
            TokKind::Inteiro => Some(Prim::Inteiro),
            TokKind::Real => Some(Prim::Real),
            TokKind::Logico => Some(Prim::Logico),
            _ => None,
        };
        if let Some(p) = prim {
            let span = self.bump()?.span;
            return Ok(TypeRef::Prim(p, span));
        }
        if !self.at(TokKind::Ident) {
            return Err(CompileError::unexpected(&self.cur, "a type"));
        }
        match self.symtab.get(&self.cur.text).map(|s| s.kind) {
            Some(SymbolKind::RecordType) => Ok(TypeRef::Named(self.parse_ident()?)),
            Some(_) => Err(CompileError::unexpected(&self.cur, "a type")),
            None => Err(CompileError::undeclared(&self.cur.text, self.cur.span)),
        }
    }

    /// `lo..hi`
    fn parse_bound(&mut self) -> Result<Bound> {
        let lo = self.parse_int()?;
        self.expect(TokKind::DotDot)?;
        let hi_tok = self.cur.clone();
        let hi = self.parse_int()?;
        if hi < lo {
            return Err(CompileError::unexpected(
                &hi_tok,
                format!("an upper bound not below {lo}"),
            ));
        }
        Ok(Bound { lo, hi })
    }

    fn parse_int(&mut self) -> Result<i64> {
        if !self.at(TokKind::Int) {
            return Err(CompileError::unexpected(&self.cur, "integer literal"));
        }
        let value = self.cur.text.parse::<i64>().map_err(|_| CompileError::Lexical {
            msg: format!("integer literal {} out of range", self.cur.text),
            span: self.cur.span,
        })?;
        self.bump()?;
        Ok(value)
    }

    // ======= procedures / functions =======

    fn parse_routine(&mut self) -> Result<Routine> {
        let kw = self.bump()?;
        let (kind, sym_kind) = match kw.kind {
            TokKind::Funcao => (RoutineKind::Function, SymbolKind::Function),
            _ => (RoutineKind::Procedure, SymbolKind::Procedure),
        };
        let name = self.parse_ident()?;
        // declared before the body so it can call itself
        self.symtab.declare(&name.text, sym_kind, None, name.span)?;

        let mut params = Vec::new();
        if self.at(TokKind::LParen) {
            self.bump()?;
            if !self.at(TokKind::RParen) {
                loop {
                    let pname = self.parse_ident()?;
                    self.expect(TokKind::Colon)?;
                    let ty = self.parse_type()?;
                    self.symtab.declare(
                        &pname.text,
                        SymbolKind::Variable,
                        Some(Type::from_ref(&ty)),
                        pname.span,
                    )?;
                    params.push(Param { name: pname, ty });
                    if !self.at(TokKind::Comma) {
                        break;
                    }
                    self.bump()?;
                }
            }
            self.expect(TokKind::RParen)?;
        }

        let ret = if kind == RoutineKind::Function && self.at(TokKind::Colon) {
            self.bump()?;
            let ty = self.parse_type()?;
            self.symtab.set_type(&name.text, Type::from_ref(&ty));
            Some(ty)
        } else {
            None
        };

        let locals = if self.at(TokKind::Var) {
            self.bump()?;
            self.parse_decls(true)?
        } else {
            Vec::new()
        };

        self.expect(TokKind::Inicio)?;
        self.routine = Some(kind);
        let body = self.parse_stmts(&[TokKind::Fim]);
        self.routine = None;
        let body = body?;
        let end = self.expect(TokKind::Fim)?.span;
        tracing::debug!(routine = %name.text, ?kind, params = params.len(), "routine");

        Ok(Routine {
            kind,
            name,
            params,
            ret,
            locals,
            body,
            span: kw.span.to(end),
        })
    }

    fn resolve_pending_calls(&mut self) -> Result<()> {
        for call in std::mem::take(&mut self.pending_calls) {
            if !self.symtab.is_routine(&call.text) {
                return Err(CompileError::undeclared(&call.text, call.span));
            }
        }
        Ok(())
    }

    // ======= statements =======

    /// Statements up to (not including) one of `terminators`.
    fn parse_stmts(&mut self, terminators: &[TokKind]) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !terminators.contains(&self.cur.kind) {
            match self.parse_stmt()? {
                Some(stmt) => stmts.push(stmt),
                None => {
                    let ends: Vec<String> = terminators.iter().map(|k| format!("'{k}'")).collect();
                    return Err(CompileError::unexpected(
                        &self.cur,
                        format!("a statement or {}", ends.join(" or ")),
                    ));
                }
            }
        }
        Ok(stmts)
    }

    /// `None` when the current token cannot start a statement.
    fn parse_stmt(&mut self) -> Result<Option<Stmt>> {
        let stmt = match self.cur.kind {
            TokKind::Ident => self.parse_ident_stmt()?,
            TokKind::Leia => self.parse_read()?,
            TokKind::Escreva => self.parse_write()?,
            TokKind::Se => self.nested(Self::parse_if)?,
            TokKind::Para => self.nested(Self::parse_for)?,
            TokKind::Enquanto => self.nested(Self::parse_while)?,
            TokKind::Retorne => self.parse_return()?,
            _ => return Ok(None),
        };
        Ok(Some(stmt))
    }

    fn nested(&mut self, f: fn(&mut Self) -> Result<Stmt>) -> Result<Stmt> {
        self.enter()?;
        let stmt = f(self);
        self.leave();
        stmt
    }

    /// Call, plain reference, or assignment.
    fn parse_ident_stmt(&mut self) -> Result<Stmt> {
        let id = self.parse_ident()?;
        match self.symtab.get(&id.text).map(|s| s.kind) {
            Some(SymbolKind::Procedure | SymbolKind::Function) => self.finish_call_stmt(id),
            Some(SymbolKind::Variable) => {
                let target = self.finish_place(id)?;
                if self.at(TokKind::Arrow) {
                    self.bump()?;
                    let value = self.parse_expr()?;
                    let span = target.span.to(value.span());
                    Ok(Stmt::Assign {
                        target,
                        value,
                        span,
                    })
                } else {
                    Ok(Stmt::Bare(target))
                }
            }
            Some(SymbolKind::RecordType) => Err(CompileError::UnexpectedToken {
                found: Tok::new(TokKind::Ident, id.text, id.span),
                expected: "a statement".into(),
            }),
            None if self.routine.is_some() && self.at(TokKind::LParen) => {
                self.pending_calls.push(id.clone());
                self.finish_call_stmt(id)
            }
            None => Err(CompileError::undeclared(id.text, id.span)),
        }
    }

    fn finish_call_stmt(&mut self, callee: Ident) -> Result<Stmt> {
        let (args, span) = self.parse_call_args(&callee)?;
        Ok(Stmt::Call { callee, args, span })
    }

    fn parse_read(&mut self) -> Result<Stmt> {
        let start = self.expect(TokKind::Leia)?.span;
        let mut targets = vec![self.parse_place()?];
        while self.at(TokKind::Comma) {
            self.bump()?;
            targets.push(self.parse_place()?);
        }
        let span = start.to(targets[targets.len() - 1].span);
        Ok(Stmt::Read { targets, span })
    }

    fn parse_write(&mut self) -> Result<Stmt> {
        let start = self.expect(TokKind::Escreva)?.span;
        let mut items = vec![self.parse_expr()?];
        while self.at(TokKind::Comma) {
            self.bump()?;
            items.push(self.parse_expr()?);
        }
        let span = start.to(items[items.len() - 1].span());
        Ok(Stmt::Write { items, span })
    }

    /// `se <cond> entao <stmts> [senao <stmts>] fimse`
    fn parse_if(&mut self) -> Result<Stmt> {
        let start = self.expect(TokKind::Se)?.span;
        let cond = self.parse_expr()?;
        self.expect(TokKind::Entao)?;
        let then_ = self.parse_stmts(&[TokKind::Senao, TokKind::FimSe])?;
        let else_ = if self.at(TokKind::Senao) {
            self.bump()?;
            Some(self.parse_stmts(&[TokKind::FimSe])?)
        } else {
            None
        };
        let end = self.expect(TokKind::FimSe)?.span;
        Ok(Stmt::If {
            cond,
            then_,
            else_,
            span: start.to(end),
        })
    }

    /// `para i de <start> ate <end> [passo <step>] faca <stmts> fimpara`
    fn parse_for(&mut self) -> Result<Stmt> {
        let start_kw = self.expect(TokKind::Para)?.span;
        let var = self.parse_ident()?;
        match self.symtab.lookup_kind(&var.text, var.span)? {
            SymbolKind::Variable => {}
            _ => {
                return Err(CompileError::UnexpectedToken {
                    found: Tok::new(TokKind::Ident, var.text, var.span),
                    expected: "a loop variable".into(),
                })
            }
        }
        self.expect(TokKind::De)?;
        let start = self.parse_expr()?;
        self.expect(TokKind::Ate)?;
        let end = self.parse_expr()?;
        let step = if self.at(TokKind::Passo) {
            self.bump()?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokKind::Faca)?;
        let body = self.parse_stmts(&[TokKind::FimPara])?;
        let close = self.expect(TokKind::FimPara)?.span;
        Ok(Stmt::For {
            var,
            start,
            end,
            step,
            body,
            span: start_kw.to(close),
        })
    }

    /// `enquanto <cond> faca <stmts> fimenquanto`
    fn parse_while(&mut self) -> Result<Stmt> {
        let start = self.expect(TokKind::Enquanto)?.span;
        let cond = self.parse_expr()?;
        self.expect(TokKind::Faca)?;
        let body = self.parse_stmts(&[TokKind::FimEnquanto])?;
        let end = self.expect(TokKind::FimEnquanto)?.span;
        Ok(Stmt::While {
            cond,
            body,
            span: start.to(end),
        })
    }

    /// `retorne <expr>` in functions, bare `retorne` in procedures.
    fn parse_return(&mut self) -> Result<Stmt> {
        let Some(kind) = self.routine else {
            return Err(CompileError::unexpected(&self.cur, "a statement"));
        };
        let kw = self.bump()?;
        match kind {
            RoutineKind::Function => {
                let value = self.parse_expr()?;
                let span = kw.span.to(value.span());
                Ok(Stmt::Return {
                    value: Some(value),
                    span,
                })
            }
            RoutineKind::Procedure => Ok(Stmt::Return {
                value: None,
                span: kw.span,
            }),
        }
    }

    // ======= places =======

    fn parse_place(&mut self) -> Result<Place> {
        let id = self.parse_ident()?;
        match self.symtab.lookup_kind(&id.text, id.span)? {
            SymbolKind::Variable => self.finish_place(id),
            _ => Err(CompileError::UnexpectedToken {
                found: Tok::new(TokKind::Ident, id.text, id.span),
                expected: "a variable".into(),
            }),
        }
    }

    /// Indices and field accesses after a variable name.
    fn finish_place(&mut self, name: Ident) -> Result<Place> {
        let mut accessors = Vec::new();
        let mut span = name.span;
        loop {
            match self.cur.kind {
                TokKind::LBracket => {
                    let open = self.bump()?.span;
                    let mut idx = vec![self.parse_expr()?];
                    while self.at(TokKind::Comma) {
                        self.bump()?;
                        idx.push(self.parse_expr()?);
                    }
                    let close = self.expect(TokKind::RBracket)?.span;
                    span = span.to(close);
                    accessors.push(Accessor::Index(idx, open.to(close)));
                }
                TokKind::Dot => {
                    self.bump()?;
                    let field = self.parse_ident()?;
                    span = span.to(field.span);
                    accessors.push(Accessor::Field(field));
                }
                _ => break,
            }
        }
        let place = Place {
            name,
            accessors,
            span,
        };
        // rejects unknown record fields
        self.symtab.place_type(&place)?;
        Ok(place)
    }

    // ======= expressions =======
    //
    // expr  := primary chain
    // chain := (op primary)* with every op of one class; an operator of the
    //          other class re-enters `chain`.
    //
    // No precedence climbing: the operator sequence is kept in source order.

    fn parse_expr(&mut self) -> Result<Expr> {
        self.enter()?;
        let result = self.parse_expr_inner();
        self.leave();
        result
    }

    fn parse_expr_inner(&mut self) -> Result<Expr> {
        let head = self.parse_primary()?;
        let mut links = Vec::new();
        self.parse_chain(&mut links)?;
        let Some(last) = links.last() else {
            return Ok(head);
        };
        let span = head.span().to(last.operand.span());
        Ok(Expr::Chain {
            head: Box::new(head),
            links,
            span,
        })
    }

    fn parse_chain(&mut self, links: &mut Vec<Link>) -> Result<()> {
        let Some(class) = self.cur.kind.op_class() else {
            return Ok(());
        };
        while self.cur.kind.op_class() == Some(class) {
            let Some(op) = binop(self.cur.kind) else {
                return Err(CompileError::unexpected(&self.cur, "a binary operator"));
            };
            self.bump()?;
            let operand = self.parse_primary()?;
            links.push(Link { op, operand });
        }
        if self.cur.kind.op_class().is_some() {
            self.enter()?;
            let result = self.parse_chain(links);
            self.leave();
            result?;
        }
        Ok(())
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let tok = self.cur.clone();
        match tok.kind {
            TokKind::Int => {
                self.bump()?;
                Ok(Expr::Lit(Lit::Int(tok.text), tok.span))
            }
            TokKind::RealLit => {
                self.bump()?;
                Ok(Expr::Lit(Lit::Real(tok.text), tok.span))
            }
            TokKind::Str => {
                self.bump()?;
                Ok(Expr::Lit(Lit::Str(tok.text), tok.span))
            }
            TokKind::Verdadeiro | TokKind::Falso => {
                self.bump()?;
                Ok(Expr::Lit(Lit::Bool(tok.kind == TokKind::Verdadeiro), tok.span))
            }
            TokKind::LParen => {
                self.bump()?;
                let inner = self.parse_expr()?;
                let end = self.expect(TokKind::RParen)?.span;
                Ok(Expr::Paren {
                    inner: Box::new(inner),
                    span: tok.span.to(end),
                })
            }
            TokKind::Minus | TokKind::Nao => {
                self.bump()?;
                self.enter()?;
                let inner = self.parse_primary();
                self.leave();
                let inner = inner?;
                let op = if tok.kind == TokKind::Nao {
                    UnOp::Not
                } else {
                    UnOp::Neg
                };
                let span = tok.span.to(inner.span());
                Ok(Expr::Unary {
                    op,
                    expr: Box::new(inner),
                    span,
                })
            }
            TokKind::Ident => {
                let id = self.parse_ident()?;
                match self.symtab.get(&id.text).map(|s| s.kind) {
                    Some(SymbolKind::Procedure | SymbolKind::Function) => self.finish_call_expr(id),
                    Some(SymbolKind::Variable) => Ok(Expr::Place(self.finish_place(id)?)),
                    Some(SymbolKind::RecordType) => Err(CompileError::unexpected(&tok, "an expression")),
                    None if self.routine.is_some() && self.at(TokKind::LParen) => {
                        self.pending_calls.push(id.clone());
                        self.finish_call_expr(id)
                    }
                    None => Err(CompileError::undeclared(id.text, id.span)),
                }
            }
            _ => Err(CompileError::unexpected(&tok, "an expression")),
        }
    }

    fn finish_call_expr(&mut self, callee: Ident) -> Result<Expr> {
        let (args, span) = self.parse_call_args(&callee)?;
        Ok(Expr::Call { callee, args, span })
    }

    /// Optional `( args )` after a routine name.
    fn parse_call_args(&mut self, callee: &Ident) -> Result<(Vec<Expr>, lpp_ast::span::Span)> {
        let mut args = Vec::new();
        if !self.at(TokKind::LParen) {
            return Ok((args, callee.span));
        }
        self.bump()?;
        if !self.at(TokKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.at(TokKind::Comma) {
                    break;
                }
                self.bump()?;
            }
        }
        let end = self.expect(TokKind::RParen)?.span;
        Ok((args, callee.span.to(end)))
    }
}

fn binop(kind: TokKind) -> Option<BinOp> {
    let op = match kind {
        TokKind::E => BinOp::And,
        TokKind::Ou => BinOp::Or,
        TokKind::Eq => BinOp::Eq,
        TokKind::Ne => BinOp::Ne,
        TokKind::Lt => BinOp::Lt,
        TokKind::Le => BinOp::Le,
        TokKind::Gt => BinOp::Gt,
        TokKind::Ge => BinOp::Ge,
        TokKind::Plus => BinOp::Add,
        TokKind::Minus => BinOp::Sub,
        TokKind::Star => BinOp::Mul,
        TokKind::Slash => BinOp::Div,
        TokKind::Caret => BinOp::Pow,
        TokKind::Mod => BinOp::Mod,
        TokKind::Div => BinOp::IntDiv,
        _ => return None,
    };
    Some(op)
}
