use kpl_core::{Location, Token};

/// Anything the parser can pull tokens from. Once exhausted a source keeps
/// returning end-of-input tokens.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

/// A pre-scanned token stream.
#[derive(Debug)]
pub struct Tokens {
    pub inner: Vec<Token>,
    pub index: usize,
    pub eof: Location,
}

impl Tokens {
    pub fn new(inner: Vec<Token>, eof: Location) -> Self {
        Self {
            inner,
            index: 0,
            eof,
        }
    }

    pub fn peek(&self) -> Token {
        self.inner
            .get(self.index)
            .cloned()
            .unwrap_or_else(|| Token::eof(self.eof))
    }

    pub fn remaining(&self) -> usize {
        self.inner.len().saturating_sub(self.index)
    }
}

impl TokenSource for Tokens {
    fn next_token(&mut self) -> Token {
        match self.inner.get(self.index).cloned() {
            Some(token) => {
                self.index += 1;
                token
            }
            None => Token::eof(self.eof),
        }
    }
}

impl FromIterator<Token> for Tokens {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let inner: Vec<Token> = iter.into_iter().collect();
        let eof = inner.last().map(Token::end).unwrap_or_default();
        Self::new(inner, eof)
    }
}

#[cfg(test)]
mod tests {
    use kpl_core::TokenKind;

    use super::*;
    use crate::Lexer;

    #[test]
    fn test_tokens_end_with_eof() {
        let mut tokens: Tokens = Lexer::new("begin end").collect();

        assert_eq!(tokens.remaining(), 2);
        assert_eq!(tokens.peek().kind(), TokenKind::Begin);
        assert_eq!(tokens.next_token().kind(), TokenKind::Begin);
        assert_eq!(tokens.next_token().kind(), TokenKind::End);
        assert_eq!(tokens.remaining(), 0);

        let eof = tokens.next_token();
        assert_eq!(eof.kind(), TokenKind::Eof);
        assert_eq!(eof.location(), Location::new(1, 10));
        assert_eq!(tokens.next_token().kind(), TokenKind::Eof);
    }
}
