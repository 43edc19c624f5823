use std::path::Path;

use kpl_core::{Diagnostic, Reporter};
use kpl_semantic::{ObjectId, SymbolTable};
use kpl_token::{Lexer, TokenSource};

use crate::error::{Error, Result};
use crate::parser::Parser;

/// Parses tokens from `source` into `symtab` and returns the program object.
pub fn parse_into<S: TokenSource>(source: S, symtab: &mut SymbolTable) -> kpl_core::Result<ObjectId> {
    Parser::new(source, symtab)?.parse()
}

pub fn compile_source(text: &str) -> std::result::Result<SymbolTable, Diagnostic> {
    let mut symtab = SymbolTable::new();
    parse_into(Lexer::new(text), &mut symtab)?;
    Ok(symtab)
}

/// Compiles the file at `path`. A rejected program is reported to
/// `reporter` once before the error is returned.
pub fn compile<P, R>(path: P, reporter: &mut R) -> Result<SymbolTable>
where
    P: AsRef<Path>,
    R: Reporter + ?Sized,
{
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "compiling");

    compile_source(&text).map_err(|diagnostic| {
        reporter.report(diagnostic.kind, diagnostic.location);
        Error::Rejected(diagnostic)
    })
}
