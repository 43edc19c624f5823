use std::fmt;

use serde::Serialize;

/// Types are trees owned by exactly one declaration. `Clone` is a deep copy
/// and `PartialEq` is structural: arrays are equal when their sizes match and
/// their element types are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    Int,
    Char,
    Array { size: u32, element: Box<Type> },
}

impl Type {
    pub fn array(size: u32, element: Type) -> Self {
        Type::Array {
            size,
            element: Box::new(element),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "integer"),
            Type::Char => write!(f, "char"),
            Type::Array { size, element } => write!(f, "array[{size}] of {element}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstantValue {
    Int(i32),
    Char(char),
}

impl ConstantValue {
    /// Only integer constants can carry a sign.
    pub fn negate(self) -> Option<ConstantValue> {
        match self {
            ConstantValue::Int(value) => value.checked_neg().map(ConstantValue::Int),
            ConstantValue::Char(_) => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(value) => write!(f, "{value}"),
            ConstantValue::Char(value) => write!(f, "'{value}'"),
        }
    }
}
