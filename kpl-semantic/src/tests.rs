use kpl_core::{ErrorKind, Location};

use crate::checker::*;
use crate::{ConstantValue, ObjectAttrs, ObjectId, ObjectKind, ParamMode, SymbolTable, Type};

fn at(column: usize) -> Location {
    Location::new(1, column)
}

fn with_program() -> (SymbolTable, ObjectId) {
    let mut symtab = SymbolTable::new();
    let program = symtab.create_program("P", Some(at(9)));
    let scope = symtab.object(program).own_scope().unwrap();
    symtab.enter_block(scope);
    (symtab, program)
}

fn declare_variable(symtab: &mut SymbolTable, name: &str, ty: Type) -> ObjectId {
    let id = symtab.create_variable(name, Some(at(1)));
    declare_fresh(symtab, id, at(1)).unwrap();
    symtab.set_type(id, ty);
    id
}

#[test]
fn test_predefined_routines() {
    let symtab = SymbolTable::new();

    let names = symtab
        .globals()
        .iter()
        .map(|id| symtab.object(*id).name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["READC", "READI", "WRITEI", "WRITEC", "WRITELN"]);

    let readc = symtab.lookup_object("READC").unwrap();
    assert_eq!(symtab.kind_of(readc), ObjectKind::Function);
    assert_eq!(symtab.object(readc).ty(), Some(&Type::Char));

    let writei = symtab.lookup_object("WRITEI").unwrap();
    let params = symtab.object(writei).params();
    assert_eq!(params.len(), 1);
    assert_eq!(symtab.object(params[0]).name, "i");
    assert_eq!(symtab.object(params[0]).ty(), Some(&Type::Int));

    let writeln = symtab.lookup_object("WRITELN").unwrap();
    assert!(symtab.object(writeln).params().is_empty());
    assert!(symtab.lookup_object("writeln").is_none());
}

#[test]
fn test_scope_nesting_balance() {
    let (mut symtab, _) = with_program();
    assert_eq!(symtab.depth(), 1);

    let function = symtab.create_function("F", Some(at(1)));
    declare_fresh(&mut symtab, function, at(1)).unwrap();
    symtab.enter_block(symtab.object(function).own_scope().unwrap());
    assert_eq!(symtab.depth(), 2);
    assert_eq!(symtab.current_owner(), Some(function));

    symtab.exit_block();
    assert_eq!(symtab.depth(), 1);
    symtab.exit_block();
    assert_eq!(symtab.depth(), 0);

    assert_eq!(symtab.exit_block(), None);
    assert_eq!(symtab.depth(), 0);
}

#[test]
fn test_inner_declaration_shadows_outer() {
    let (mut symtab, _) = with_program();
    let outer = declare_variable(&mut symtab, "x", Type::Int);

    let procedure = symtab.create_procedure("Q", Some(at(1)));
    declare_fresh(&mut symtab, procedure, at(1)).unwrap();
    symtab.enter_block(symtab.object(procedure).own_scope().unwrap());

    let inner = declare_variable(&mut symtab, "x", Type::Char);
    assert_ne!(inner, outer);
    assert_eq!(symtab.lookup_object("x"), Some(inner));

    symtab.exit_block();
    assert_eq!(symtab.lookup_object("x"), Some(outer));
}

#[test]
fn test_duplicate_in_same_scope_is_rejected() {
    let (mut symtab, _) = with_program();
    declare_variable(&mut symtab, "x", Type::Int);

    let again = symtab.create_variable("x", Some(at(10)));
    let error = declare_fresh(&mut symtab, again, at(10)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::DuplicateIdent);
    assert_eq!(error.location, at(10));

    let procedure = symtab.create_procedure("Q", Some(at(1)));
    declare_fresh(&mut symtab, procedure, at(1)).unwrap();
    symtab.enter_block(symtab.object(procedure).own_scope().unwrap());

    let inner = symtab.create_variable("x", Some(at(20)));
    assert!(declare_fresh(&mut symtab, inner, at(20)).is_ok());
}

#[test]
fn test_wrong_kind_is_reported_as_undeclared_kind() {
    let (mut symtab, _) = with_program();
    declare_variable(&mut symtab, "x", Type::Int);

    let error = check_declared_constant(&symtab, "x", at(5)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredConstant);

    let error = check_declared_type(&symtab, "x", at(5)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredType);

    let error = check_declared_function(&symtab, "x", at(5)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredFunction);

    let error = check_declared_procedure(&symtab, "READI", at(5)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredProcedure);

    let error = check_declared_variable(&symtab, "missing", at(5)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredVariable);

    let error = check_declared_ident(&symtab, "missing", at(5)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredIdent);
    assert_eq!(error.location, at(5));

    assert!(check_declared_ident(&symtab, "x", at(5)).is_ok());
    assert!(check_declared_procedure(&symtab, "WRITELN", at(5)).is_ok());
}

#[test]
fn test_parameters_are_listed_twice_but_declared_once() {
    let (mut symtab, _) = with_program();

    let function = symtab.create_function("F", Some(at(1)));
    declare_fresh(&mut symtab, function, at(1)).unwrap();
    let scope = symtab.object(function).own_scope().unwrap();
    symtab.enter_block(scope);

    let a = symtab.create_parameter("a", ParamMode::Value, function, Some(at(2)));
    declare_fresh(&mut symtab, a, at(2)).unwrap();
    let b = symtab.create_parameter("b", ParamMode::Reference, function, Some(at(3)));
    declare_fresh(&mut symtab, b, at(3)).unwrap();

    assert_eq!(symtab.object(function).params(), [a, b]);
    assert_eq!(symtab.scope(scope).objects, vec![a, b]);
    assert_eq!(symtab.object(b).param_mode(), Some(ParamMode::Reference));
    assert!(check_declared_variable(&symtab, "b", at(4)).is_ok());
}

#[test]
fn test_function_name_is_an_lvalue_inside_its_body() {
    let (mut symtab, _) = with_program();

    let function = symtab.create_function("F", Some(at(1)));
    declare_fresh(&mut symtab, function, at(1)).unwrap();
    symtab.enter_block(symtab.object(function).own_scope().unwrap());

    assert_eq!(check_declared_lvalue_ident(&symtab, "F", at(7)), Ok(function));
    symtab.exit_block();

    let error = check_declared_lvalue_ident(&symtab, "F", at(7)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredVariable);
}

#[test]
fn test_procedure_name_is_not_an_lvalue() {
    let (mut symtab, _) = with_program();

    let procedure = symtab.create_procedure("Q", Some(at(1)));
    declare_fresh(&mut symtab, procedure, at(1)).unwrap();
    symtab.enter_block(symtab.object(procedure).own_scope().unwrap());

    let error = check_declared_lvalue_ident(&symtab, "Q", at(7)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UndeclaredVariable);
    assert_eq!(error.location, at(7));
}

#[test]
fn test_variables_remember_their_scope() {
    let (mut symtab, program) = with_program();
    let x = declare_variable(&mut symtab, "x", Type::Int);

    let root = symtab.object(program).own_scope();
    assert!(matches!(symtab.object(x).attrs, ObjectAttrs::Variable { scope, .. } if scope == root));
}

#[test]
fn test_dump_symbol_table() {
    let (mut symtab, _) = with_program();

    let limit = symtab.create_constant("LIMIT", Some(at(1)));
    declare_fresh(&mut symtab, limit, at(1)).unwrap();
    symtab.set_constant_value(limit, ConstantValue::Int(10));

    let row = symtab.create_type("ROW", Some(at(1)));
    declare_fresh(&mut symtab, row, at(1)).unwrap();
    symtab.set_type(row, Type::array(10, Type::Char));

    declare_variable(&mut symtab, "x", Type::Int);

    let function = symtab.create_function("F", Some(at(1)));
    declare_fresh(&mut symtab, function, at(1)).unwrap();
    symtab.set_type(function, Type::Int);
    symtab.enter_block(symtab.object(function).own_scope().unwrap());
    let n = symtab.create_parameter("n", ParamMode::Reference, function, Some(at(1)));
    declare_fresh(&mut symtab, n, at(1)).unwrap();
    symtab.set_type(n, Type::Int);
    symtab.exit_block();

    insta::assert_snapshot!(symtab.to_string(), @r"
    Program P
        Const LIMIT = 10
        Type ROW = array[10] of char
        Var x : integer
        Function F : integer
            Param VAR n : integer
    ");
}

#[test]
fn test_declaring_outside_any_scope_lists_nothing() {
    let mut symtab = SymbolTable::new();
    let x = symtab.create_variable("x", Some(at(1)));

    assert_eq!(symtab.declare_object(x), None);
    assert_eq!(symtab.lookup_object("x"), None);

    let (mut symtab, program) = with_program();
    let x = symtab.create_variable("x", Some(at(1)));
    assert_eq!(symtab.declare_object(x), symtab.object(program).own_scope());
}

#[test]
fn test_resolving_the_wrong_kind_is_ignored() {
    let (mut symtab, _) = with_program();
    let limit = symtab.create_constant("LIMIT", Some(at(1)));
    declare_fresh(&mut symtab, limit, at(1)).unwrap();

    symtab.set_type(limit, Type::Int);
    assert_eq!(symtab.object(limit).ty(), None);
    assert_eq!(symtab.object(limit).constant_value(), None);

    let x = declare_variable(&mut symtab, "x", Type::Int);
    symtab.set_constant_value(x, ConstantValue::Int(1));
    assert_eq!(symtab.object(x).constant_value(), None);
    assert_eq!(symtab.object(x).ty(), Some(&Type::Int));
}
