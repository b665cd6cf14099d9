use lpp_types::Symtab;

/// One indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

impl Indent {
    fn unit(self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(n as usize),
            Indent::Tab => "\t".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub indent: Indent,
}

/// Output buffer plus the state the generator threads through every call.
pub struct Emitter<'a> {
    pub(crate) symtab: &'a Symtab,
    out: String,
    level: usize,
    unit: String,
}

impl<'a> Emitter<'a> {
    pub fn new(symtab: &'a Symtab, opts: &EmitOptions) -> Self {
        Self {
            symtab,
            out: String::new(),
            level: 0,
            unit: opts.indent.unit(),
        }
    }

    /// Write one line at the current level.
    pub fn writeln(&mut self, line: &str) {
        for _ in 0..self.level {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn finish(mut self) -> String {
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_use_the_configured_unit() {
        let symtab = Symtab::new();
        let mut em = Emitter::new(&symtab, &EmitOptions { indent: Indent::Tab });
        em.writeln("a");
        em.indent();
        em.writeln("b");
        em.indent();
        em.writeln("c");
        em.dedent();
        em.dedent();
        em.dedent();
        em.writeln("d");
        assert_eq!(em.finish(), "a\n\tb\n\t\tc\nd\n");
    }

    #[test]
    fn empty_output_still_ends_with_newline() {
        let symtab = Symtab::new();
        let em = Emitter::new(&symtab, &EmitOptions::default());
        assert_eq!(em.finish(), "\n");
    }
}
