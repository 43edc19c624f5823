use kpl_core::{ErrorKind, Result, Token, TokenKind};

use crate::tokens::TokenSource;

/// Two-token window over a [`TokenSource`]: the last consumed token and the
/// lookahead that every grammar decision is made on.
pub struct TokenCursor<S> {
    source: S,
    current: Option<Token>,
    lookahead: Token,
}

impl<S: TokenSource> TokenCursor<S> {
    pub fn new(mut source: S) -> Result<Self> {
        let lookahead = next_valid_token(&mut source)?;

        Ok(Self {
            source,
            current: None,
            lookahead,
        })
    }

    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn lookahead(&self) -> &Token {
        &self.lookahead
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.lookahead.kind()
    }

    pub fn at(&self, kind: impl Into<TokenKind>) -> bool {
        self.lookahead.kind() == kind.into()
    }

    /// Drops the current token and promotes the lookahead.
    pub fn advance(&mut self) -> Result<()> {
        self.shift().map(|_| ())
    }

    /// Consumes the lookahead if it is of `kind`, returning it.
    pub fn expect(&mut self, kind: impl Into<TokenKind>) -> Result<Token> {
        let kind = kind.into();

        if self.lookahead.kind() != kind {
            let location = self.lookahead.location();
            return Err(ErrorKind::MissingToken { expected: kind }.at(location));
        }

        self.shift()
    }

    fn shift(&mut self) -> Result<Token> {
        let next = next_valid_token(&mut self.source)?;
        let consumed = std::mem::replace(&mut self.lookahead, next);
        self.current = Some(consumed.clone());
        Ok(consumed)
    }
}

fn next_valid_token<S: TokenSource>(source: &mut S) -> Result<Token> {
    let token = source.next_token();
    match token.kind() {
        TokenKind::Error(error) => Err(ErrorKind::from(error).at(token.location())),
        _ => Ok(token),
    }
}

#[cfg(test)]
mod tests {
    use kpl_core::{Diagnostic, LexError, Location, Symbol};

    use super::*;
    use crate::{Lexer, Tokens};

    fn cursor(content: &str) -> TokenCursor<Tokens> {
        TokenCursor::new(Lexer::new(content).collect()).unwrap()
    }

    #[test]
    fn test_starts_with_lookahead_only() {
        let cursor = cursor("program p;");

        assert!(cursor.current().is_none());
        assert_eq!(cursor.peek_kind(), TokenKind::Program);
    }

    #[test]
    fn test_advance_promotes_lookahead() {
        let mut cursor = cursor("program p;");
        cursor.advance().unwrap();

        assert_eq!(cursor.current().map(Token::kind), Some(TokenKind::Program));
        assert_eq!(cursor.lookahead().lexeme(), "p");
    }

    #[test]
    fn test_expect_returns_consumed_token() {
        let mut cursor = cursor("program p;");
        cursor.expect(TokenKind::Program).unwrap();

        let ident = cursor.expect(TokenKind::Identifier).unwrap();
        assert_eq!(ident.lexeme(), "p");
        assert_eq!(ident.location(), Location::new(1, 9));
        assert!(cursor.at(Symbol::Semicolon));
    }

    #[test]
    fn test_expect_mismatch_does_not_advance() {
        let mut cursor = cursor("program p;");
        cursor.advance().unwrap();

        let error = cursor.expect(Symbol::Semicolon).unwrap_err();
        assert_eq!(
            error,
            Diagnostic::new(
                ErrorKind::MissingToken {
                    expected: Symbol::Semicolon.into()
                },
                Location::new(1, 9)
            )
        );
        assert_eq!(cursor.peek_kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_lexical_error_surfaces_on_advance() {
        let mut cursor = cursor("x ?");

        let error = cursor.advance().unwrap_err();
        assert_eq!(error.kind, ErrorKind::Lex(LexError::InvalidSymbol));
        assert_eq!(error.location, Location::new(1, 3));
    }

    #[test]
    fn test_lexical_error_in_first_token() {
        let result = TokenCursor::new(Lexer::new("?"));
        assert!(matches!(result, Err(d) if d.kind == ErrorKind::Lex(LexError::InvalidSymbol)));
    }
}
