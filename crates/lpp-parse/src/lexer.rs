use lpp_ast::error::CompileError;
use lpp_ast::span::Span;
use lpp_ast::token::{Tok, TokKind};

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

/// Where a token starts: byte offset plus line/column.
#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }
    fn peek2(&self) -> Option<char> {
        let mut it = self.src[self.pos..].chars();
        it.next();
        it.next()
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    fn span(&self, m: Mark) -> Span {
        Span {
            start: m.pos as u32,
            end: self.pos as u32,
            line: m.line,
            col: m.col,
        }
    }

    fn tok(&self, kind: TokKind, m: Mark) -> Tok {
        Tok::new(kind, kind.spelling(), self.span(m))
    }

    fn skip_ws_and_comments(&mut self) -> Result<(), CompileError> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            }
            // line comment: //
            if self.peek() == Some('/') && self.peek2() == Some('/') {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
                continue;
            }
            // block comment: { ... }
            if self.peek() == Some('{') {
                let m = self.mark();
                self.bump();
                loop {
                    match self.bump() {
                        Some('}') => break,
                        Some(_) => {}
                        None => {
                            return Err(CompileError::Lexical {
                                msg: "unterminated comment".into(),
                                span: self.span(m),
                            })
                        }
                    }
                }
                continue;
            }
            return Ok(());
        }
    }

    pub fn next_tok(&mut self) -> Result<Tok, CompileError> {
        self.skip_ws_and_comments()?;
        let m = self.mark();
        let Some(c) = self.bump() else {
            return Ok(Tok::new(TokKind::Eof, "", self.span(m)));
        };

        // 2-char operators first
        let pair = match (c, self.peek()) {
            ('<', Some('-')) => Some(TokKind::Arrow),
            ('<', Some('>')) => Some(TokKind::Ne),
            ('<', Some('=')) => Some(TokKind::Le),
            ('>', Some('=')) => Some(TokKind::Ge),
            ('.', Some('.')) => Some(TokKind::DotDot),
            _ => None,
        };
        if let Some(k) = pair {
            self.bump();
            return Ok(self.tok(k, m));
        }

        // 1-char punctuation/operators
        let single = match c {
            '(' => Some(TokKind::LParen),
            ')' => Some(TokKind::RParen),
            '[' => Some(TokKind::LBracket),
            ']' => Some(TokKind::RBracket),
            ',' => Some(TokKind::Comma),
            ':' => Some(TokKind::Colon),
            '.' => Some(TokKind::Dot),
            '=' => Some(TokKind::Eq),
            '<' => Some(TokKind::Lt),
            '>' => Some(TokKind::Gt),
            '+' => Some(TokKind::Plus),
            '-' => Some(TokKind::Minus),
            '*' => Some(TokKind::Star),
            '/' => Some(TokKind::Slash),
            '^' => Some(TokKind::Caret),
            '%' => Some(TokKind::Mod),
            _ => None,
        };
        if let Some(k) = single {
            return Ok(self.tok(k, m));
        }

        if c == '"' || c == '\'' {
            return self.string(c, m);
        }

        // number (int/real); `1..5` keeps the dots for the range
        if c.is_ascii_digit() {
            let mut s = String::from(c);
            while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
                s.push(ch);
                self.bump();
            }
            let fractional =
                self.peek() == Some('.') && matches!(self.peek2(), Some(d) if d.is_ascii_digit());
            if !fractional {
                return Ok(Tok::new(TokKind::Int, s, self.span(m)));
            }
            s.push('.');
            self.bump();
            while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
                s.push(ch);
                self.bump();
            }
            return Ok(Tok::new(TokKind::RealLit, s, self.span(m)));
        }

        // ident / keywords
        if c.is_alphabetic() {
            let mut s = String::from(c);
            while let Some(ch) = self.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    s.push(ch);
                    self.bump();
                } else {
                    break;
                }
            }
            return Ok(match TokKind::keyword(&s) {
                Some(kind) => self.tok(kind, m),
                None => Tok::new(TokKind::Ident, s, self.span(m)),
            });
        }

        Err(CompileError::Lexical {
            msg: format!("unrecognised character {:?}", c),
            span: self.span(m),
        })
    }

    fn string(&mut self, quote: char, m: Mark) -> Result<Tok, CompileError> {
        let mut s = String::new();
        loop {
            let Some(ch) = self.bump() else {
                return Err(CompileError::Lexical {
                    msg: "unterminated string literal".into(),
                    span: self.span(m),
                });
            };
            if ch == quote {
                break;
            }
            match ch {
                '\n' => {
                    return Err(CompileError::Lexical {
                        msg: "string literal runs past end of line".into(),
                        span: self.span(m),
                    })
                }
                '\\' => {
                    let Some(esc) = self.bump() else {
                        continue;
                    };
                    let real = match esc {
                        'n' => '\n',
                        't' => '\t',
                        _ => esc,
                    };
                    s.push(real);
                }
                _ => s.push(ch),
            }
        }
        Ok(Tok::new(TokKind::Str, s, self.span(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokKind> {
        let mut lx = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let t = lx.next_tok().expect("lex ok");
            if t.kind == TokKind::Eof {
                break;
            }
            out.push(t.kind);
        }
        out
    }

    #[test]
    fn longest_operator_wins() {
        use TokKind::*;
        assert_eq!(
            kinds("a <- b <> c <= d < e >= f > g"),
            vec![Ident, Arrow, Ident, Ne, Ident, Le, Ident, Lt, Ident, Ge, Ident, Gt, Ident]
        );
    }

    #[test]
    fn range_dots_are_not_a_real_literal() {
        use TokKind::*;
        assert_eq!(
            kinds("conjunto[1..10] de real"),
            vec![Conjunto, LBracket, Int, DotDot, Int, RBracket, De, Real]
        );
        assert_eq!(kinds("3.25"), vec![RealLit]);
    }

    #[test]
    fn positions_are_one_based() {
        let mut lx = Lexer::new("programa\n  teste");
        let a = lx.next_tok().unwrap();
        let b = lx.next_tok().unwrap();
        assert_eq!((a.span.line, a.span.col), (1, 1));
        assert_eq!((b.span.line, b.span.col), (2, 3));
        assert_eq!(b.text, "teste");
    }

    #[test]
    fn comments_are_skipped() {
        use TokKind::*;
        assert_eq!(
            kinds("leia x // resto\n{ bloco\n de comentario } escreva x"),
            vec![Leia, Ident, Escreva, Ident]
        );
    }

    #[test]
    fn string_text_is_unquoted() {
        let mut lx = Lexer::new("\"ola\\tmundo\" 'x'");
        assert_eq!(lx.next_tok().unwrap().text, "ola\tmundo");
        assert_eq!(lx.next_tok().unwrap().text, "x");
    }

    #[test]
    fn stray_character_is_lexical_error() {
        let mut lx = Lexer::new("x <- 1 # 2");
        lx.next_tok().unwrap();
        lx.next_tok().unwrap();
        lx.next_tok().unwrap();
        let err = lx.next_tok().unwrap_err();
        assert_eq!(err.kind(), lpp_ast::error::ErrorKind::Lexical);
        assert_eq!((err.span().line, err.span().col), (1, 8));
    }

    #[test]
    fn unterminated_string_is_lexical_error() {
        let mut lx = Lexer::new("escreva \"sem fim");
        lx.next_tok().unwrap();
        assert!(lx.next_tok().is_err());
    }

    #[test]
    fn eof_repeats() {
        let mut lx = Lexer::new("  ");
        assert_eq!(lx.next_tok().unwrap().kind, TokKind::Eof);
        assert_eq!(lx.next_tok().unwrap().kind, TokKind::Eof);
    }
}
