use crate::span::Span;
use crate::token::Tok;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    UnexpectedToken,
    UndeclaredIdentifier,
    DuplicateDeclaration,
    UnimplementedConstruct,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::UndeclaredIdentifier => "undeclared identifier",
            ErrorKind::DuplicateDeclaration => "duplicate declaration",
            ErrorKind::UnimplementedConstruct => "unimplemented construct",
        };
        f.write_str(s)
    }
}

/// Every way a compilation can fail. The first error aborts the run.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Unrecognised character or malformed literal
    Lexical { msg: String, span: Span },
    /// The grammar rule in force did not accept this token
    UnexpectedToken { found: Tok, expected: String },
    /// Symbol table lookup miss
    UndeclaredIdentifier { name: String, span: Span },
    /// Symbol table declare collision
    DuplicateDeclaration {
        name: String,
        span: Span,
        previous: Span,
    },
    /// Construct accepted by the grammar that the code generator cannot emit
    UnimplementedConstruct { construct: String, span: Span },
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Lexical { .. } => ErrorKind::Lexical,
            CompileError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            CompileError::UndeclaredIdentifier { .. } => ErrorKind::UndeclaredIdentifier,
            CompileError::DuplicateDeclaration { .. } => ErrorKind::DuplicateDeclaration,
            CompileError::UnimplementedConstruct { .. } => ErrorKind::UnimplementedConstruct,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CompileError::Lexical { span, .. }
            | CompileError::UndeclaredIdentifier { span, .. }
            | CompileError::DuplicateDeclaration { span, .. }
            | CompileError::UnimplementedConstruct { span, .. } => *span,
            CompileError::UnexpectedToken { found, .. } => found.span,
        }
    }

    pub fn unexpected(found: &Tok, expected: impl Into<String>) -> Self {
        CompileError::UnexpectedToken {
            found: found.clone(),
            expected: expected.into(),
        }
    }

    pub fn undeclared(name: impl Into<String>, span: Span) -> Self {
        CompileError::UndeclaredIdentifier {
            name: name.into(),
            span,
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: ", self.span(), self.kind())?;
        match self {
            CompileError::Lexical { msg, .. } => write!(f, "{}", msg),
            CompileError::UnexpectedToken { found, expected } => {
                if found.text.is_empty() || found.kind.spelling() == found.text {
                    write!(f, "expected {}, found '{}'", expected, found.kind)
                } else {
                    write!(
                        f,
                        "expected {}, found {} '{}'",
                        expected, found.kind, found.text
                    )
                }
            }
            CompileError::UndeclaredIdentifier { name, .. } => {
                write!(f, "'{}' is not declared", name)
            }
            CompileError::DuplicateDeclaration { name, previous, .. } => {
                write!(f, "'{}' is already declared at {}", name, previous)
            }
            CompileError::UnimplementedConstruct { construct, .. } => {
                write!(f, "no code generation rule for {}", construct)
            }
        }
    }
}

impl std::error::Error for CompileError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokKind;

    fn at(line: u32, col: u32) -> Span {
        Span {
            start: 0,
            end: 0,
            line,
            col,
        }
    }

    #[test]
    fn display_leads_with_position_and_kind() {
        let e = CompileError::undeclared("total", at(3, 7));
        assert_eq!(
            e.to_string(),
            "3:7: undeclared identifier: 'total' is not declared"
        );
    }

    #[test]
    fn unexpected_token_names_the_lexeme() {
        let tok = Tok::new(TokKind::Ident, "fimsee", at(9, 1));
        let e = CompileError::unexpected(&tok, "'fimse'");
        assert_eq!(e.kind(), ErrorKind::UnexpectedToken);
        assert_eq!(e.span(), at(9, 1));
        assert_eq!(
            e.to_string(),
            "9:1: unexpected token: expected 'fimse', found identifier 'fimsee'"
        );
    }
}
