use std::fmt;

use serde::Serialize;

use crate::{LexError, Location};

#[derive(Debug, Clone, Serialize, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Program,
    Const,
    Type,
    Var,
    Integer,
    Char,
    Array,
    Of,
    Function,
    Procedure,
    Begin,
    End,
    Call,
    If,
    Then,
    Else,
    While,
    Do,
    For,
    To,
    Repeat,
    Until,
    Eof,

    Identifier,
    Number,
    CharLiteral,
    Symbol(Symbol),
    Error(LexError),
}

impl TokenKind {
    /// Keywords are matched case-insensitively, identifiers keep their case.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word.to_ascii_uppercase().as_str() {
            "PROGRAM" => TokenKind::Program,
            "CONST" => TokenKind::Const,
            "TYPE" => TokenKind::Type,
            "VAR" => TokenKind::Var,
            "INTEGER" => TokenKind::Integer,
            "CHAR" => TokenKind::Char,
            "ARRAY" => TokenKind::Array,
            "OF" => TokenKind::Of,
            "FUNCTION" => TokenKind::Function,
            "PROCEDURE" => TokenKind::Procedure,
            "BEGIN" => TokenKind::Begin,
            "END" => TokenKind::End,
            "CALL" => TokenKind::Call,
            "IF" => TokenKind::If,
            "THEN" => TokenKind::Then,
            "ELSE" => TokenKind::Else,
            "WHILE" => TokenKind::While,
            "DO" => TokenKind::Do,
            "FOR" => TokenKind::For,
            "TO" => TokenKind::To,
            "REPEAT" => TokenKind::Repeat,
            "UNTIL" => TokenKind::Until,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Symbol(
                Symbol::Eq | Symbol::Neq | Symbol::Lt | Symbol::Le | Symbol::Gt | Symbol::Ge
            )
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            TokenKind::Program => "program",
            TokenKind::Const => "const",
            TokenKind::Type => "type",
            TokenKind::Var => "var",
            TokenKind::Integer => "integer",
            TokenKind::Char => "char",
            TokenKind::Array => "array",
            TokenKind::Of => "of",
            TokenKind::Function => "function",
            TokenKind::Procedure => "procedure",
            TokenKind::Begin => "begin",
            TokenKind::End => "end",
            TokenKind::Call => "call",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::To => "to",
            TokenKind::Repeat => "repeat",
            TokenKind::Until => "until",
            TokenKind::Eof => return write!(f, "end of input"),
            TokenKind::Identifier => return write!(f, "identifier"),
            TokenKind::Number => return write!(f, "number"),
            TokenKind::CharLiteral => return write!(f, "character literal"),
            TokenKind::Symbol(symbol) => return write!(f, "'{symbol}'"),
            TokenKind::Error(error) => return write!(f, "{error}"),
        };
        write!(f, "keyword '{keyword}'")
    }
}

#[derive(Debug, Clone, Serialize, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Semicolon,
    Colon,
    Period,
    Comma,
    Assign,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Times,
    Slash,
    LParen,
    RParen,
    LSel,
    RSel,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Symbol::Semicolon => ";",
            Symbol::Colon => ":",
            Symbol::Period => ".",
            Symbol::Comma => ",",
            Symbol::Assign => ":=",
            Symbol::Eq => "=",
            Symbol::Neq => "<>",
            Symbol::Lt => "<",
            Symbol::Le => "<=",
            Symbol::Gt => ">",
            Symbol::Ge => ">=",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Times => "*",
            Symbol::Slash => "/",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LSel => "[",
            Symbol::RSel => "]",
        };
        f.write_str(text)
    }
}

impl From<Symbol> for TokenKind {
    fn from(symbol: Symbol) -> Self {
        TokenKind::Symbol(symbol)
    }
}

/// A classified token. Character literals carry the bare character as lexeme.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn eof(location: Location) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The position just past the token. Character literals count their
    /// quotes, which the lexeme drops.
    pub fn end(&self) -> Location {
        let quotes = match self.kind {
            TokenKind::CharLiteral => 2,
            _ => 0,
        };
        let width = self.lexeme.chars().count() + quotes;
        Location::new(self.location.line, self.location.column + width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(TokenKind::keyword("begin"), Some(TokenKind::Begin));
        assert_eq!(TokenKind::keyword("BeGiN"), Some(TokenKind::Begin));
        assert_eq!(TokenKind::keyword("Integer"), Some(TokenKind::Integer));
        assert_eq!(TokenKind::keyword("beginning"), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::from(Symbol::Semicolon).to_string(), "';'");
        assert_eq!(TokenKind::End.to_string(), "keyword 'end'");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
        assert_eq!(TokenKind::from(Symbol::Assign).to_string(), "':='");
    }

    #[test]
    fn test_token_end() {
        let ident = Token::new(TokenKind::Identifier, "count", Location::new(3, 4));
        assert_eq!(ident.end(), Location::new(3, 9));

        let literal = Token::new(TokenKind::CharLiteral, "a", Location::new(1, 1));
        assert_eq!(literal.end(), Location::new(1, 4));
    }

    #[test]
    fn test_relational_symbols() {
        assert!(TokenKind::from(Symbol::Le).is_relational());
        assert!(TokenKind::from(Symbol::Neq).is_relational());
        assert!(!TokenKind::from(Symbol::Assign).is_relational());
        assert!(!TokenKind::Identifier.is_relational());
    }
}
