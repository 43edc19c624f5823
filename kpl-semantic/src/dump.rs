use std::fmt;

use crate::object::{ObjectAttrs, ObjectId, ParamMode, ScopeId};
use crate::symbol_table::SymbolTable;

const INDENT: usize = 4;

fn write_unset(f: &mut fmt::Formatter<'_>, value: Option<impl fmt::Display>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{value}"),
        None => write!(f, "?"),
    }
}

impl SymbolTable {
    fn write_object(&self, f: &mut fmt::Formatter<'_>, id: ObjectId, indent: usize) -> fmt::Result {
        let object = self.object(id);
        write!(f, "{:indent$}", "")?;

        match &object.attrs {
            ObjectAttrs::Program { .. } => write!(f, "Program {}", object.name)?,
            ObjectAttrs::Constant { value } => {
                write!(f, "Const {} = ", object.name)?;
                write_unset(f, value.as_ref())?;
            }
            ObjectAttrs::Type { actual } => {
                write!(f, "Type {} = ", object.name)?;
                write_unset(f, actual.as_ref())?;
            }
            ObjectAttrs::Variable { ty, .. } => {
                write!(f, "Var {} : ", object.name)?;
                write_unset(f, ty.as_ref())?;
            }
            ObjectAttrs::Parameter { mode, ty, .. } => {
                let by_ref = match mode {
                    ParamMode::Reference => "VAR ",
                    ParamMode::Value => "",
                };
                write!(f, "Param {by_ref}{} : ", object.name)?;
                write_unset(f, ty.as_ref())?;
            }
            ObjectAttrs::Function { return_type, .. } => {
                write!(f, "Function {} : ", object.name)?;
                write_unset(f, return_type.as_ref())?;
            }
            ObjectAttrs::Procedure { .. } => write!(f, "Procedure {}", object.name)?,
        }
        writeln!(f)?;

        match object.own_scope() {
            Some(scope) => self.write_scope(f, scope, indent + INDENT),
            None => Ok(()),
        }
    }

    fn write_scope(&self, f: &mut fmt::Formatter<'_>, scope: ScopeId, indent: usize) -> fmt::Result {
        for (id, _) in self.objects_in(scope) {
            self.write_object(f, id, indent)?;
        }
        Ok(())
    }
}

/// Prints the program's scope tree, one declaration per line.
impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.program() {
            Some(program) => self.write_object(f, program, 0),
            None => Ok(()),
        }
    }
}
