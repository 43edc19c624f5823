pub mod checker;
pub mod dump;
pub mod object;
pub mod symbol_table;
pub mod types;

#[cfg(test)]
mod tests;

pub use object::{Object, ObjectAttrs, ObjectId, ObjectKind, ParamMode, ScopeId};
pub use symbol_table::{Scope, SymbolTable};
pub use types::{ConstantValue, Type};
