pub mod ast;
pub mod error;
pub mod token;

pub mod span {
    use serde::Serialize;

    /// Byte range of a token or node, plus the 1-based line/column of its
    /// first character.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
    pub struct Span {
        pub start: u32,
        pub end: u32,
        pub line: u32,
        pub col: u32,
    }

    impl Span {
        /// Span covering `self` through `other`, positioned at `self`.
        pub fn to(self, other: Span) -> Span {
            Span {
                start: self.start,
                end: other.end.max(self.end),
                line: self.line,
                col: self.col,
            }
        }
    }

    impl std::fmt::Display for Span {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}
