use kpl_core::{ErrorKind, Result, Symbol, TokenKind};
use kpl_semantic::{ObjectKind, checker};
use kpl_token::TokenSource;

use super::Parser;

impl<S: TokenSource> Parser<'_, S> {
    pub(super) fn parse_arguments(&mut self) -> Result<()> {
        if !self.at(Symbol::LParen) {
            return Ok(());
        }

        self.eat(Symbol::LParen)?;
        self.parse_expression()?;
        while self.at(Symbol::Comma) {
            self.eat(Symbol::Comma)?;
            self.parse_expression()?;
        }
        self.eat(Symbol::RParen)?;
        Ok(())
    }

    /// A single optional comparison; `a < b < c` stops after `b`.
    pub(super) fn parse_condition(&mut self) -> Result<()> {
        self.parse_expression()?;

        if self.cursor.peek_kind().is_relational() {
            self.cursor.advance()?;
            self.parse_expression()?;
        }
        Ok(())
    }

    pub(super) fn parse_expression(&mut self) -> Result<()> {
        if self.at_additive() {
            self.cursor.advance()?;
        }

        self.parse_term()?;
        while self.at_additive() {
            self.cursor.advance()?;
            self.parse_term()?;
        }
        Ok(())
    }

    fn at_additive(&self) -> bool {
        self.at(Symbol::Plus) || self.at(Symbol::Minus)
    }

    fn parse_term(&mut self) -> Result<()> {
        self.parse_factor()?;
        while self.at(Symbol::Times) || self.at(Symbol::Slash) {
            self.cursor.advance()?;
            self.parse_factor()?;
        }
        Ok(())
    }

    fn parse_factor(&mut self) -> Result<()> {
        match self.cursor.peek_kind() {
            TokenKind::Number | TokenKind::CharLiteral => self.cursor.advance(),
            TokenKind::Symbol(Symbol::LParen) => {
                self.eat(Symbol::LParen)?;
                self.parse_expression()?;
                self.eat(Symbol::RParen)?;
                Ok(())
            }
            TokenKind::Identifier => {
                let name = self.eat(TokenKind::Identifier)?;
                let (lexeme, location) = (name.lexeme(), name.location());

                match self.cursor.peek_kind() {
                    TokenKind::Symbol(Symbol::LParen) => {
                        checker::check_declared_function(self.symtab, lexeme, location)?;
                        self.parse_arguments()
                    }
                    TokenKind::Symbol(Symbol::LSel) => {
                        checker::check_declared_variable(self.symtab, lexeme, location)?;
                        self.parse_indexes()
                    }
                    _ => {
                        let object = checker::check_declared_ident(self.symtab, lexeme, location)?;
                        match self.symtab.kind_of(object) {
                            ObjectKind::Constant
                            | ObjectKind::Variable
                            | ObjectKind::Parameter
                            | ObjectKind::Function => Ok(()),
                            ObjectKind::Program | ObjectKind::Type | ObjectKind::Procedure => {
                                Err(ErrorKind::InvalidFactor.at(location))
                            }
                        }
                    }
                }
            }
            _ => Err(ErrorKind::InvalidFactor.at(self.lookahead_location())),
        }
    }

    pub(super) fn parse_indexes(&mut self) -> Result<()> {
        while self.at(Symbol::LSel) {
            self.eat(Symbol::LSel)?;
            self.parse_expression()?;
            self.eat(Symbol::RSel)?;
        }
        Ok(())
    }
}
