use serde::Serialize;
use thiserror::Error;

use crate::{Location, TokenKind};

pub type Result<T, E = Diagnostic> = std::result::Result<T, E>;

#[derive(Debug, Clone, Serialize, Copy, PartialEq, Eq, Hash, Error)]
pub enum LexError {
    #[error("end of input reached inside a comment")]
    EndOfComment,
    #[error("identifier is too long")]
    IdentTooLong,
    #[error("invalid character constant")]
    InvalidCharConstant,
    #[error("invalid symbol")]
    InvalidSymbol,
    #[error("number is too large")]
    NumberTooLarge,
}

/// Every condition the front end can stop on. None of them is recoverable.
#[derive(Debug, Clone, Serialize, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("missing {expected}")]
    MissingToken { expected: TokenKind },
    #[error("invalid statement")]
    InvalidStatement,
    #[error("invalid factor")]
    InvalidFactor,
    #[error("invalid type")]
    InvalidType,
    #[error("invalid basic type")]
    InvalidBasicType,
    #[error("invalid constant")]
    InvalidConstant,

    #[error("duplicate identifier")]
    DuplicateIdent,

    #[error("undeclared identifier")]
    UndeclaredIdent,
    #[error("undeclared constant")]
    UndeclaredConstant,
    #[error("undeclared type")]
    UndeclaredType,
    #[error("undeclared variable")]
    UndeclaredVariable,
    #[error("undeclared function")]
    UndeclaredFunction,
    #[error("undeclared procedure")]
    UndeclaredProcedure,
}

impl ErrorKind {
    pub fn at(self, location: Location) -> Diagnostic {
        Diagnostic::new(self, location)
    }
}

#[derive(Debug, Clone, Serialize, Copy, PartialEq, Eq, Hash, Error)]
#[error("{location}: {kind}")]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub location: Location,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

/// Receives the single diagnostic of a rejected compile.
pub trait Reporter {
    fn report(&mut self, kind: ErrorKind, location: Location);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, kind: ErrorKind, location: Location) {
        self.push(Diagnostic::new(kind, location));
    }
}
