use thiserror::Error;

pub mod ast;
pub mod grouper;
pub mod lexer;
pub mod parser;

pub use ast::{ArgSlot, Call, Node, RangeExpr, Word};
pub use grouper::{Group, GroupedLine, TokenTree};
pub use lexer::tokenize;
pub use parser::{build_line, parse_line};

/// A slot whose closing boundary was never seen keeps this sentinel as its
/// end offset, so position queries past the last typed character still land
/// inside it.
pub const OPEN_END: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Str,
    IncompleteStr,
    Operator,
    IncompleteOperator,
    Comment,
    Syntactic,
}

/// One lexeme of a single script line. Offsets are byte positions within
/// that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            kind,
        }
    }

    pub fn contains(&self, column: usize) -> bool {
        self.start <= column && column <= self.end
    }

    pub fn upper(&self) -> String {
        self.text.to_ascii_uppercase()
    }
}

/// Structural problems found while shaping one line into a tree. These are
/// data, not failures: the builder always returns a best-effort tree next to
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expression is never closed")]
    UnterminatedExpression,
    #[error("closing bracket does not match the opening one")]
    BracketMismatch,
    #[error("unexpected opening bracket")]
    UnexpectedOpening,
    #[error("unexpected closing bracket")]
    UnexpectedClosing,
    #[error("empty argument")]
    EmptyArgument,
    #[error("invalid statement")]
    InvalidStatement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub start: usize,
    pub end: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(start: usize, end: usize, kind: ParseErrorKind) -> Self {
        Self { start, end, kind }
    }
}

/// Fully shaped result for one line of script. Rebuilt wholesale whenever
/// the line text changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLine {
    pub root: Option<Node>,
    pub comment: Option<Token>,
    /// Set by a `REM` comment carrying the `@ignore` marker.
    pub ignore_diagnostics: bool,
    pub errors: Vec<ParseError>,
}
