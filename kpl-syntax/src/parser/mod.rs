use kpl_core::{ErrorKind, LexError, Location, Result, Symbol, Token, TokenKind};
use kpl_semantic::{ObjectId, SymbolTable};
use kpl_token::{TokenCursor, TokenSource};

mod declarations;
mod expressions;
mod statements;


/// Predictive parser for KPL. Every production looks at the lookahead only,
/// and the first syntax or semantic error ends the parse.
///
/// Declarations are recorded in the borrowed [`SymbolTable`] while parsing;
/// the scope stack is back where it started when [`Parser::parse`] returns,
/// whether it succeeds or not.
pub struct Parser<'sym, S> {
    cursor: TokenCursor<S>,
    symtab: &'sym mut SymbolTable,
}

impl<'sym, S: TokenSource> Parser<'sym, S> {
    pub fn new(source: S, symtab: &'sym mut SymbolTable) -> Result<Self> {
        Ok(Self {
            cursor: TokenCursor::new(source)?,
            symtab,
        })
    }

    /// Parses a whole program and returns the program object.
    pub fn parse(mut self) -> Result<ObjectId> {
        self.parse_program()
    }

    fn parse_program(&mut self) -> Result<ObjectId> {
        tracing::trace!("parsing a program");

        self.eat(TokenKind::Program)?;
        let name = self.eat(TokenKind::Identifier)?;
        let program = self
            .symtab
            .create_program(name.lexeme(), Some(name.location()));
        self.eat(Symbol::Semicolon)?;

        self.in_scope_of(program, |parser| {
            parser.parse_block()?;
            parser.eat(Symbol::Period)
        })?;

        tracing::trace!(name = name.lexeme(), "program parsed");
        Ok(program)
    }

    /// Runs `parse` inside the scope opened by `owner`. The scope is left
    /// again on every path out, errors included.
    fn in_scope_of<T>(
        &mut self,
        owner: ObjectId,
        parse: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let Some(scope) = self.symtab.object(owner).own_scope() else {
            return parse(self);
        };

        self.symtab.enter_block(scope);
        let result = parse(self);
        self.symtab.exit_block();
        result
    }

    fn eat(&mut self, kind: impl Into<TokenKind>) -> Result<Token> {
        self.cursor.expect(kind)
    }

    fn at(&self, kind: impl Into<TokenKind>) -> bool {
        self.cursor.at(kind)
    }

    fn lookahead_location(&self) -> Location {
        self.cursor.lookahead().location()
    }
}

fn number_value(token: &Token) -> Result<i32> {
    token
        .lexeme()
        .parse()
        .map_err(|_| ErrorKind::from(LexError::NumberTooLarge).at(token.location()))
}

fn char_value(token: &Token) -> Result<char> {
    token
        .lexeme()
        .chars()
        .next()
        .ok_or(ErrorKind::from(LexError::InvalidCharConstant).at(token.location()))
}
