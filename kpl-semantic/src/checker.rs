//! Declaration and reference checks consulted by the parser.
//!
//! Every check reports at the location of the identifier being checked. A
//! name that exists but has the wrong kind is reported exactly like a name
//! that does not exist at all.

use kpl_core::{ErrorKind, Location, Result};

use crate::object::{ObjectId, ObjectKind};
use crate::symbol_table::SymbolTable;

/// Fails when `name` is already declared in the current scope. With no active
/// scope there is nothing to clash with.
pub fn check_fresh_ident(symtab: &SymbolTable, name: &str, location: Location) -> Result<()> {
    let Some(scope) = symtab.current_scope() else {
        return Ok(());
    };

    match symtab.find_in_scope(scope, name) {
        Some(_) => Err(ErrorKind::DuplicateIdent.at(location)),
        None => Ok(()),
    }
}

/// Checks that the name of `id` is fresh in the current scope and declares
/// it there. Must be called inside a scope, see
/// [`SymbolTable::declare_object`].
pub fn declare_fresh(symtab: &mut SymbolTable, id: ObjectId, location: Location) -> Result<ObjectId> {
    let name = symtab.object(id).name.clone();
    check_fresh_ident(symtab, &name, location)?;
    symtab.declare_object(id);
    Ok(id)
}

pub fn check_declared_ident(symtab: &SymbolTable, name: &str, location: Location) -> Result<ObjectId> {
    symtab
        .lookup_object(name)
        .ok_or(ErrorKind::UndeclaredIdent.at(location))
}

fn check_declared_kind(
    symtab: &SymbolTable,
    name: &str,
    location: Location,
    accepts: impl Fn(ObjectKind) -> bool,
    error: ErrorKind,
) -> Result<ObjectId> {
    match symtab.lookup_object(name) {
        Some(id) if accepts(symtab.kind_of(id)) => Ok(id),
        _ => Err(error.at(location)),
    }
}

pub fn check_declared_constant(symtab: &SymbolTable, name: &str, location: Location) -> Result<ObjectId> {
    check_declared_kind(
        symtab,
        name,
        location,
        |kind| kind == ObjectKind::Constant,
        ErrorKind::UndeclaredConstant,
    )
}

pub fn check_declared_type(symtab: &SymbolTable, name: &str, location: Location) -> Result<ObjectId> {
    check_declared_kind(
        symtab,
        name,
        location,
        |kind| kind == ObjectKind::Type,
        ErrorKind::UndeclaredType,
    )
}

/// Parameters count as variables.
pub fn check_declared_variable(symtab: &SymbolTable, name: &str, location: Location) -> Result<ObjectId> {
    match symtab.lookup_object(name) {
        Some(id) if symtab.object(id).is_variable_like() => Ok(id),
        _ => Err(ErrorKind::UndeclaredVariable.at(location)),
    }
}

pub fn check_declared_function(symtab: &SymbolTable, name: &str, location: Location) -> Result<ObjectId> {
    check_declared_kind(
        symtab,
        name,
        location,
        |kind| kind == ObjectKind::Function,
        ErrorKind::UndeclaredFunction,
    )
}

pub fn check_declared_procedure(symtab: &SymbolTable, name: &str, location: Location) -> Result<ObjectId> {
    check_declared_kind(
        symtab,
        name,
        location,
        |kind| kind == ObjectKind::Procedure,
        ErrorKind::UndeclaredProcedure,
    )
}

/// An assignment target. Inside a function body the function's own name is
/// a valid target: assigning to it sets the result.
pub fn check_declared_lvalue_ident(symtab: &SymbolTable, name: &str, location: Location) -> Result<ObjectId> {
    if let Some(owner) = symtab.current_owner()
        && symtab.kind_of(owner) == ObjectKind::Function
        && symtab.object(owner).name == name
    {
        return Ok(owner);
    }

    check_declared_variable(symtab, name, location)
}
