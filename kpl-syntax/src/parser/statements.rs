use kpl_core::{ErrorKind, Result, Symbol, TokenKind};
use kpl_semantic::ObjectId;
use kpl_semantic::checker;
use kpl_token::TokenSource;

use super::Parser;

impl<S: TokenSource> Parser<'_, S> {
    pub(super) fn parse_statements(&mut self) -> Result<()> {
        self.parse_statement()?;
        while self.at(Symbol::Semicolon) {
            self.eat(Symbol::Semicolon)?;
            self.parse_statement()?;
        }
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<()> {
        match self.cursor.peek_kind() {
            TokenKind::Identifier => self.parse_assign_st(),
            TokenKind::Call => self.parse_call_st().map(|_| ()),
            TokenKind::Begin => self.parse_group_st(),
            TokenKind::If => self.parse_if_st(),
            TokenKind::While => self.parse_while_st(),
            TokenKind::For => self.parse_for_st(),
            TokenKind::Repeat => self.parse_repeat_st(),

            // empty statement
            TokenKind::Symbol(Symbol::Semicolon)
            | TokenKind::End
            | TokenKind::Else
            | TokenKind::Until => Ok(()),

            _ => Err(ErrorKind::InvalidStatement.at(self.lookahead_location())),
        }
    }

    /// `a, b[i] := e1, e2`. The two lists are not required to have the same
    /// length.
    fn parse_assign_st(&mut self) -> Result<()> {
        tracing::trace!("parsing an assign statement");

        self.parse_lvalue()?;
        while self.at(Symbol::Comma) {
            self.eat(Symbol::Comma)?;
            self.parse_lvalue()?;
        }

        self.eat(Symbol::Assign)?;

        self.parse_expression()?;
        while self.at(Symbol::Comma) {
            self.eat(Symbol::Comma)?;
            self.parse_expression()?;
        }

        tracing::trace!("assign statement parsed");
        Ok(())
    }

    fn parse_lvalue(&mut self) -> Result<ObjectId> {
        let name = self.eat(TokenKind::Identifier)?;
        let target =
            checker::check_declared_lvalue_ident(self.symtab, name.lexeme(), name.location())?;
        self.parse_indexes()?;
        Ok(target)
    }

    fn parse_call_st(&mut self) -> Result<ObjectId> {
        tracing::trace!("parsing a call statement");

        self.eat(TokenKind::Call)?;
        let name = self.eat(TokenKind::Identifier)?;
        let procedure =
            checker::check_declared_procedure(self.symtab, name.lexeme(), name.location())?;
        self.parse_arguments()?;

        tracing::trace!(name = name.lexeme(), "call statement parsed");
        Ok(procedure)
    }

    fn parse_group_st(&mut self) -> Result<()> {
        self.eat(TokenKind::Begin)?;
        self.parse_statements()?;
        self.eat(TokenKind::End)?;
        Ok(())
    }

    fn parse_if_st(&mut self) -> Result<()> {
        tracing::trace!("parsing an if statement");

        self.eat(TokenKind::If)?;
        self.parse_condition()?;
        self.eat(TokenKind::Then)?;
        self.parse_statement()?;

        if self.at(TokenKind::Else) {
            self.eat(TokenKind::Else)?;
            self.parse_statement()?;
        }
        Ok(())
    }

    fn parse_while_st(&mut self) -> Result<()> {
        tracing::trace!("parsing a while statement");

        self.eat(TokenKind::While)?;
        self.parse_condition()?;
        self.eat(TokenKind::Do)?;
        self.parse_statement()
    }

    fn parse_for_st(&mut self) -> Result<()> {
        tracing::trace!("parsing a for statement");

        self.eat(TokenKind::For)?;
        let name = self.eat(TokenKind::Identifier)?;
        checker::check_declared_variable(self.symtab, name.lexeme(), name.location())?;

        self.eat(Symbol::Assign)?;
        self.parse_expression()?;
        self.eat(TokenKind::To)?;
        self.parse_expression()?;
        self.eat(TokenKind::Do)?;
        self.parse_statement()
    }

    fn parse_repeat_st(&mut self) -> Result<()> {
        tracing::trace!("parsing a repeat statement");

        self.eat(TokenKind::Repeat)?;
        self.parse_statements()?;
        self.eat(TokenKind::Until)?;
        self.parse_condition()
    }
}
