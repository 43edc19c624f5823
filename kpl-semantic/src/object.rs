use std::fmt;

use kpl_core::Location;
use serde::Serialize;

use crate::types::{ConstantValue, Type};

/// Handle into the object arena of a [`SymbolTable`](crate::SymbolTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectId(pub(crate) usize);

/// Handle into the scope arena of a [`SymbolTable`](crate::SymbolTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ScopeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamMode {
    Value,
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectKind {
    Program,
    Constant,
    Type,
    Variable,
    Function,
    Procedure,
    Parameter,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ObjectKind::Program => "program",
            ObjectKind::Constant => "constant",
            ObjectKind::Type => "type",
            ObjectKind::Variable => "variable",
            ObjectKind::Function => "function",
            ObjectKind::Procedure => "procedure",
            ObjectKind::Parameter => "parameter",
        };
        f.write_str(kind)
    }
}

/// Attributes of a declared name. Values, aliased types and declared types
/// start out unset and are filled in once the rest of the declaration has
/// been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectAttrs {
    Program {
        scope: ScopeId,
    },
    Constant {
        value: Option<ConstantValue>,
    },
    Type {
        actual: Option<Type>,
    },
    Variable {
        ty: Option<Type>,
        scope: Option<ScopeId>,
    },
    Function {
        params: Vec<ObjectId>,
        return_type: Option<Type>,
        scope: ScopeId,
    },
    Procedure {
        params: Vec<ObjectId>,
        scope: ScopeId,
    },
    Parameter {
        mode: ParamMode,
        ty: Option<Type>,
        owner: ObjectId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    /// Where the name was declared. Predefined objects have none.
    pub location: Option<Location>,
    pub attrs: ObjectAttrs,
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self.attrs {
            ObjectAttrs::Program { .. } => ObjectKind::Program,
            ObjectAttrs::Constant { .. } => ObjectKind::Constant,
            ObjectAttrs::Type { .. } => ObjectKind::Type,
            ObjectAttrs::Variable { .. } => ObjectKind::Variable,
            ObjectAttrs::Function { .. } => ObjectKind::Function,
            ObjectAttrs::Procedure { .. } => ObjectKind::Procedure,
            ObjectAttrs::Parameter { .. } => ObjectKind::Parameter,
        }
    }

    /// The scope this object opens, for programs and subroutines.
    pub fn own_scope(&self) -> Option<ScopeId> {
        match self.attrs {
            ObjectAttrs::Program { scope }
            | ObjectAttrs::Function { scope, .. }
            | ObjectAttrs::Procedure { scope, .. } => Some(scope),
            _ => None,
        }
    }

    pub fn params(&self) -> &[ObjectId] {
        match &self.attrs {
            ObjectAttrs::Function { params, .. } | ObjectAttrs::Procedure { params, .. } => params,
            _ => &[],
        }
    }

    /// Declared type of a variable or parameter, return type of a function,
    /// aliased type of a type declaration.
    pub fn ty(&self) -> Option<&Type> {
        match &self.attrs {
            ObjectAttrs::Variable { ty, .. } | ObjectAttrs::Parameter { ty, .. } => ty.as_ref(),
            ObjectAttrs::Function { return_type, .. } => return_type.as_ref(),
            ObjectAttrs::Type { actual } => actual.as_ref(),
            _ => None,
        }
    }

    pub fn constant_value(&self) -> Option<ConstantValue> {
        match self.attrs {
            ObjectAttrs::Constant { value } => value,
            _ => None,
        }
    }

    pub fn param_mode(&self) -> Option<ParamMode> {
        match self.attrs {
            ObjectAttrs::Parameter { mode, .. } => Some(mode),
            _ => None,
        }
    }

    /// Variables and parameters both denote storage.
    pub fn is_variable_like(&self) -> bool {
        matches!(self.kind(), ObjectKind::Variable | ObjectKind::Parameter)
    }
}
