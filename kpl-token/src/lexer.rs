use std::iter::Peekable;
use std::str::CharIndices;

use kpl_core::{LexError, Location, Symbol, Token, TokenKind};

use crate::tokens::TokenSource;

pub const MAX_IDENT_LEN: usize = 15;

pub struct Lexer<'lex> {
    chars: Peekable<CharIndices<'lex>>,
    content: &'lex str,
    line: usize,
    column: usize,
}

impl<'lex> Lexer<'lex> {
    pub fn new(content: &'lex str) -> Self {
        Self {
            chars: content.char_indices().peekable(),
            content,
            line: 1,
            column: 1,
        }
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let (index, curr) = self.chars.next()?;
        match curr {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
        Some((index, curr))
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(index, _)| *index)
            .unwrap_or(self.content.len())
    }

    fn next_token(&mut self) -> Token {
        let (index, curr, start) = loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            }

            let start = self.location();
            let Some((index, curr)) = self.bump() else {
                return Token::eof(start);
            };

            if curr == '(' && self.peek() == Some('*') {
                self.bump();
                if !self.skip_comment() {
                    return self.error(LexError::EndOfComment, index, start);
                }
                continue;
            }

            break (index, curr, start);
        };

        let next = self.peek();

        match (curr, next) {
            ('(', Some('.')) => {
                self.bump();
                self.symbol(Symbol::LSel, index, start)
            }
            ('.', Some(')')) => {
                self.bump();
                self.symbol(Symbol::RSel, index, start)
            }
            (':', Some('=')) => {
                self.bump();
                self.symbol(Symbol::Assign, index, start)
            }
            ('<', Some('=')) => {
                self.bump();
                self.symbol(Symbol::Le, index, start)
            }
            ('<', Some('>')) | ('!', Some('=')) => {
                self.bump();
                self.symbol(Symbol::Neq, index, start)
            }
            ('>', Some('=')) => {
                self.bump();
                self.symbol(Symbol::Ge, index, start)
            }

            ('(', _) => self.symbol(Symbol::LParen, index, start),
            (')', _) => self.symbol(Symbol::RParen, index, start),
            ('[', _) => self.symbol(Symbol::LSel, index, start),
            (']', _) => self.symbol(Symbol::RSel, index, start),
            (';', _) => self.symbol(Symbol::Semicolon, index, start),
            (':', _) => self.symbol(Symbol::Colon, index, start),
            ('.', _) => self.symbol(Symbol::Period, index, start),
            (',', _) => self.symbol(Symbol::Comma, index, start),
            ('=', _) => self.symbol(Symbol::Eq, index, start),
            ('<', _) => self.symbol(Symbol::Lt, index, start),
            ('>', _) => self.symbol(Symbol::Gt, index, start),
            ('+', _) => self.symbol(Symbol::Plus, index, start),
            ('-', _) => self.symbol(Symbol::Minus, index, start),
            ('*', _) => self.symbol(Symbol::Times, index, start),
            ('/', _) => self.symbol(Symbol::Slash, index, start),

            ('a'..='z' | 'A'..='Z', _) => self.lex_identifier(index, start),
            ('0'..='9', _) => self.lex_number(index, start),
            ('\'', _) => self.lex_char(index, start),
            _ => self.error(LexError::InvalidSymbol, index, start),
        }
    }

    fn symbol(&mut self, symbol: Symbol, start_byte: usize, start: Location) -> Token {
        let end_byte = self.offset();
        Token::new(symbol.into(), &self.content[start_byte..end_byte], start)
    }

    fn error(&mut self, error: LexError, start_byte: usize, start: Location) -> Token {
        let end_byte = self.offset();
        tracing::debug!(%start, ?error, "lexical error");
        Token::new(
            TokenKind::Error(error),
            &self.content[start_byte..end_byte],
            start,
        )
    }

    /// Consumes up to and including the closing `*)`. Returns false when the
    /// input ends first.
    fn skip_comment(&mut self) -> bool {
        loop {
            match self.bump() {
                Some((_, '*')) if self.peek() == Some(')') => {
                    self.bump();
                    return true;
                }
                Some(_) => continue,
                None => return false,
            }
        }
    }

    fn lex_identifier(&mut self, start_byte: usize, start: Location) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.bump();
        }

        let end_byte = self.offset();
        let word = &self.content[start_byte..end_byte];

        if word.len() > MAX_IDENT_LEN {
            return Token::new(TokenKind::Error(LexError::IdentTooLong), word, start);
        }

        let kind = TokenKind::keyword(word).unwrap_or(TokenKind::Identifier);
        Token::new(kind, word, start)
    }

    fn lex_number(&mut self, start_byte: usize, start: Location) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }

        let end_byte = self.offset();
        let literal = &self.content[start_byte..end_byte];

        match literal.parse::<i32>() {
            Ok(_) => Token::new(TokenKind::Number, literal, start),
            Err(_) => Token::new(TokenKind::Error(LexError::NumberTooLarge), literal, start),
        }
    }

    fn lex_char(&mut self, start_byte: usize, start: Location) -> Token {
        let value = match self.peek() {
            Some(c) if !c.is_control() => {
                self.bump();
                c
            }
            _ => return self.error(LexError::InvalidCharConstant, start_byte, start),
        };

        match self.peek() {
            Some('\'') => {
                self.bump();
                Token::new(TokenKind::CharLiteral, value.to_string(), start)
            }
            _ => self.error(LexError::InvalidCharConstant, start_byte, start),
        }
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            token if token.kind() == TokenKind::Eof => None,
            token => Some(token),
        }
    }
}
