pub mod diagnostics;
pub mod location;
pub mod token;

pub use diagnostics::{Diagnostic, ErrorKind, LexError, Reporter, Result};
pub use location::Location;
pub use token::{Symbol, Token, TokenKind};
