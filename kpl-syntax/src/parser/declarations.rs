use kpl_core::{ErrorKind, Result, Symbol, TokenKind};
use kpl_semantic::checker::{self, declare_fresh};
use kpl_semantic::{ConstantValue, ObjectId, ParamMode, Type};
use kpl_token::TokenSource;

use super::{Parser, char_value, number_value};

impl<S: TokenSource> Parser<'_, S> {
    pub(super) fn parse_block(&mut self) -> Result<()> {
        tracing::trace!("parsing a block");

        if self.at(TokenKind::Const) {
            self.eat(TokenKind::Const)?;
            self.parse_const_decl()?;
            while self.at(TokenKind::Identifier) {
                self.parse_const_decl()?;
            }
        }

        if self.at(TokenKind::Type) {
            self.eat(TokenKind::Type)?;
            self.parse_type_decl()?;
            while self.at(TokenKind::Identifier) {
                self.parse_type_decl()?;
            }
        }

        if self.at(TokenKind::Var) {
            self.eat(TokenKind::Var)?;
            self.parse_var_decl()?;
            while self.at(TokenKind::Identifier) {
                self.parse_var_decl()?;
            }
        }

        self.parse_sub_decls()?;

        self.eat(TokenKind::Begin)?;
        self.parse_statements()?;
        self.eat(TokenKind::End)?;

        tracing::trace!("block parsed");
        Ok(())
    }

    fn parse_const_decl(&mut self) -> Result<()> {
        let name = self.eat(TokenKind::Identifier)?;
        let constant = self
            .symtab
            .create_constant(name.lexeme(), Some(name.location()));
        declare_fresh(self.symtab, constant, name.location())?;

        self.eat(Symbol::Eq)?;
        let value = self.parse_constant()?;
        self.symtab.set_constant_value(constant, value);
        self.eat(Symbol::Semicolon)?;
        Ok(())
    }

    fn parse_type_decl(&mut self) -> Result<()> {
        let name = self.eat(TokenKind::Identifier)?;
        let alias = self.symtab.create_type(name.lexeme(), Some(name.location()));
        declare_fresh(self.symtab, alias, name.location())?;

        self.eat(Symbol::Eq)?;
        let actual = self.parse_type()?;
        self.symtab.set_type(alias, actual);
        self.eat(Symbol::Semicolon)?;
        Ok(())
    }

    /// `x, y, z : Type ;` declares each name as soon as it is read, so a
    /// repeated name is caught at its second occurrence.
    fn parse_var_decl(&mut self) -> Result<()> {
        let mut variables = Vec::new();

        loop {
            let name = self.eat(TokenKind::Identifier)?;
            let variable = self
                .symtab
                .create_variable(name.lexeme(), Some(name.location()));
            variables.push(declare_fresh(self.symtab, variable, name.location())?);

            if !self.at(Symbol::Comma) {
                break;
            }
            self.eat(Symbol::Comma)?;
        }

        self.eat(Symbol::Colon)?;
        let ty = self.parse_type()?;
        for variable in variables {
            self.symtab.set_type(variable, ty.clone());
        }
        self.eat(Symbol::Semicolon)?;
        Ok(())
    }

    fn parse_sub_decls(&mut self) -> Result<()> {
        tracing::trace!("parsing subroutines");

        loop {
            match self.cursor.peek_kind() {
                TokenKind::Function => self.parse_func_decl()?,
                TokenKind::Procedure => self.parse_proc_decl()?,
                _ => break,
            }
        }

        tracing::trace!("subroutines parsed");
        Ok(())
    }

    fn parse_func_decl(&mut self) -> Result<()> {
        tracing::trace!("parsing a function");

        self.eat(TokenKind::Function)?;
        let name = self.eat(TokenKind::Identifier)?;
        let function = self
            .symtab
            .create_function(name.lexeme(), Some(name.location()));
        declare_fresh(self.symtab, function, name.location())?;

        self.in_scope_of(function, |parser| {
            parser.parse_params(function)?;
            parser.eat(Symbol::Colon)?;
            let return_type = parser.parse_basic_type()?;
            parser.symtab.set_type(function, return_type);
            parser.eat(Symbol::Semicolon)?;
            parser.parse_block()
        })?;
        self.eat(Symbol::Semicolon)?;

        tracing::trace!(name = name.lexeme(), "function parsed");
        Ok(())
    }

    fn parse_proc_decl(&mut self) -> Result<()> {
        tracing::trace!("parsing a procedure");

        self.eat(TokenKind::Procedure)?;
        let name = self.eat(TokenKind::Identifier)?;
        let procedure = self
            .symtab
            .create_procedure(name.lexeme(), Some(name.location()));
        declare_fresh(self.symtab, procedure, name.location())?;

        self.in_scope_of(procedure, |parser| {
            parser.parse_params(procedure)?;
            parser.eat(Symbol::Semicolon)?;
            parser.parse_block()
        })?;
        self.eat(Symbol::Semicolon)?;

        tracing::trace!(name = name.lexeme(), "procedure parsed");
        Ok(())
    }

    fn parse_params(&mut self, owner: ObjectId) -> Result<()> {
        if !self.at(Symbol::LParen) {
            return Ok(());
        }

        self.eat(Symbol::LParen)?;
        self.parse_param(owner)?;
        while self.at(Symbol::Semicolon) {
            self.eat(Symbol::Semicolon)?;
            self.parse_param(owner)?;
        }
        self.eat(Symbol::RParen)?;
        Ok(())
    }

    fn parse_param(&mut self, owner: ObjectId) -> Result<()> {
        let mode = match self.at(TokenKind::Var) {
            true => {
                self.eat(TokenKind::Var)?;
                ParamMode::Reference
            }
            false => ParamMode::Value,
        };

        let name = self.eat(TokenKind::Identifier)?;
        let param =
            self.symtab
                .create_parameter(name.lexeme(), mode, owner, Some(name.location()));
        declare_fresh(self.symtab, param, name.location())?;

        self.eat(Symbol::Colon)?;
        let ty = self.parse_basic_type()?;
        self.symtab.set_type(param, ty);
        Ok(())
    }

    fn parse_constant(&mut self) -> Result<ConstantValue> {
        match self.cursor.peek_kind() {
            TokenKind::Symbol(Symbol::Plus) => {
                self.eat(Symbol::Plus)?;
                let location = self.lookahead_location();
                match self.parse_unsigned_constant()? {
                    value @ ConstantValue::Int(_) => Ok(value),
                    ConstantValue::Char(_) => Err(ErrorKind::InvalidConstant.at(location)),
                }
            }
            TokenKind::Symbol(Symbol::Minus) => {
                self.eat(Symbol::Minus)?;
                let location = self.lookahead_location();
                self.parse_unsigned_constant()?
                    .negate()
                    .ok_or(ErrorKind::InvalidConstant.at(location))
            }
            TokenKind::CharLiteral => {
                let literal = self.eat(TokenKind::CharLiteral)?;
                Ok(ConstantValue::Char(char_value(&literal)?))
            }
            _ => self.parse_unsigned_constant(),
        }
    }

    /// A number or the name of an already resolved constant.
    fn parse_unsigned_constant(&mut self) -> Result<ConstantValue> {
        match self.cursor.peek_kind() {
            TokenKind::Number => {
                let number = self.eat(TokenKind::Number)?;
                Ok(ConstantValue::Int(number_value(&number)?))
            }
            TokenKind::Identifier => {
                let name = self.eat(TokenKind::Identifier)?;
                let constant =
                    checker::check_declared_constant(self.symtab, name.lexeme(), name.location())?;
                self.symtab
                    .object(constant)
                    .constant_value()
                    .ok_or(ErrorKind::UndeclaredConstant.at(name.location()))
            }
            _ => Err(ErrorKind::InvalidConstant.at(self.lookahead_location())),
        }
    }

    pub(super) fn parse_type(&mut self) -> Result<Type> {
        match self.cursor.peek_kind() {
            TokenKind::Integer => {
                self.eat(TokenKind::Integer)?;
                Ok(Type::Int)
            }
            TokenKind::Char => {
                self.eat(TokenKind::Char)?;
                Ok(Type::Char)
            }
            TokenKind::Identifier => {
                let name = self.eat(TokenKind::Identifier)?;
                let alias = checker::check_declared_type(self.symtab, name.lexeme(), name.location())?;
                self.symtab
                    .object(alias)
                    .ty()
                    .cloned()
                    .ok_or(ErrorKind::UndeclaredType.at(name.location()))
            }
            TokenKind::Array => {
                self.eat(TokenKind::Array)?;
                self.eat(Symbol::LSel)?;
                let size = self.eat(TokenKind::Number)?;
                let length = match u32::try_from(number_value(&size)?) {
                    Ok(length) if length > 0 => length,
                    _ => return Err(ErrorKind::InvalidType.at(size.location())),
                };
                self.eat(Symbol::RSel)?;
                self.eat(TokenKind::Of)?;
                let element = self.parse_type()?;
                Ok(Type::array(length, element))
            }
            _ => Err(ErrorKind::InvalidType.at(self.lookahead_location())),
        }
    }

    fn parse_basic_type(&mut self) -> Result<Type> {
        match self.cursor.peek_kind() {
            TokenKind::Integer => {
                self.eat(TokenKind::Integer)?;
                Ok(Type::Int)
            }
            TokenKind::Char => {
                self.eat(TokenKind::Char)?;
                Ok(Type::Char)
            }
            _ => Err(ErrorKind::InvalidBasicType.at(self.lookahead_location())),
        }
    }
}
