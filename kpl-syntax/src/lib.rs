pub mod compile;
pub mod error;
pub mod parser;

pub use compile::{compile, compile_source, parse_into};
pub use error::{Error, Result};
pub use parser::Parser;
