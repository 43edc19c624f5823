pub mod cursor;
pub mod lexer;
pub mod tokens;

pub use cursor::TokenCursor;
pub use lexer::Lexer;
pub use tokens::{TokenSource, Tokens};
