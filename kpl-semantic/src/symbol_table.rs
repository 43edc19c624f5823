use kpl_core::Location;

use crate::object::{Object, ObjectAttrs, ObjectId, ObjectKind, ParamMode, ScopeId};
use crate::types::{ConstantValue, Type};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Declared objects in declaration order.
    pub objects: Vec<ObjectId>,
    pub owner: Option<ObjectId>,
    pub outer: Option<ScopeId>,
}

/// State of one compilation: every object and scope ever created, the
/// predefined routines and the scope the parser is currently in.
///
/// Objects and scopes live in arenas and refer to each other through
/// [`ObjectId`] and [`ScopeId`]. A scope's object list is the single place an
/// object is declared; parameter lists of subroutines only repeat handles.
#[derive(Debug)]
pub struct SymbolTable {
    objects: Vec<Object>,
    scopes: Vec<Scope>,
    program: Option<ObjectId>,
    globals: Vec<ObjectId>,
    current: Option<ScopeId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            objects: Vec::new(),
            scopes: Vec::new(),
            program: None,
            globals: Vec::new(),
            current: None,
        };

        table.register_predefined();
        table
    }

    fn register_predefined(&mut self) {
        let readc = self.create_function("READC", None);
        self.set_type(readc, Type::Char);
        self.globals.push(readc);

        let readi = self.create_function("READI", None);
        self.set_type(readi, Type::Int);
        self.globals.push(readi);

        let writes = [("WRITEI", "i", Type::Int), ("WRITEC", "ch", Type::Char)];
        for (name, param_name, ty) in writes {
            let procedure = self.create_procedure(name, None);
            let param = self.create_parameter(param_name, ParamMode::Value, procedure, None);
            self.set_type(param, ty);
            if let Some(scope) = self.objects[procedure.0].own_scope() {
                self.attach(scope, param);
            }
            self.globals.push(procedure);
        }

        let writeln = self.create_procedure("WRITELN", None);
        self.globals.push(writeln);
    }

    fn alloc_scope(&mut self, owner: Option<ObjectId>, outer: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            objects: Vec::new(),
            owner,
            outer,
        });
        id
    }

    fn alloc_object(&mut self, name: &str, location: Option<Location>, attrs: ObjectAttrs) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(Object {
            name: name.to_string(),
            location,
            attrs,
        });
        id
    }

    /// Creates the program object and its root scope. The scope is not
    /// entered.
    pub fn create_program(&mut self, name: &str, location: Option<Location>) -> ObjectId {
        let id = ObjectId(self.objects.len());
        let scope = self.alloc_scope(Some(id), None);
        self.alloc_object(name, location, ObjectAttrs::Program { scope });
        self.program = Some(id);
        id
    }

    pub fn create_constant(&mut self, name: &str, location: Option<Location>) -> ObjectId {
        self.alloc_object(name, location, ObjectAttrs::Constant { value: None })
    }

    pub fn create_type(&mut self, name: &str, location: Option<Location>) -> ObjectId {
        self.alloc_object(name, location, ObjectAttrs::Type { actual: None })
    }

    /// Creates a variable belonging to the current scope.
    pub fn create_variable(&mut self, name: &str, location: Option<Location>) -> ObjectId {
        let scope = self.current;
        self.alloc_object(name, location, ObjectAttrs::Variable { ty: None, scope })
    }

    /// Creates a function whose scope nests inside the current one.
    pub fn create_function(&mut self, name: &str, location: Option<Location>) -> ObjectId {
        let id = ObjectId(self.objects.len());
        let scope = self.alloc_scope(Some(id), self.current);
        let attrs = ObjectAttrs::Function {
            params: Vec::new(),
            return_type: None,
            scope,
        };
        self.alloc_object(name, location, attrs)
    }

    /// Creates a procedure whose scope nests inside the current one.
    pub fn create_procedure(&mut self, name: &str, location: Option<Location>) -> ObjectId {
        let id = ObjectId(self.objects.len());
        let scope = self.alloc_scope(Some(id), self.current);
        let attrs = ObjectAttrs::Procedure {
            params: Vec::new(),
            scope,
        };
        self.alloc_object(name, location, attrs)
    }

    pub fn create_parameter(
        &mut self,
        name: &str,
        mode: ParamMode,
        owner: ObjectId,
        location: Option<Location>,
    ) -> ObjectId {
        let attrs = ObjectAttrs::Parameter {
            mode,
            ty: None,
            owner,
        };
        self.alloc_object(name, location, attrs)
    }

    /// Sets the declared type of a variable or parameter, the return type of
    /// a function or the aliased type of a type declaration. Any other kind of
    /// object is left untouched.
    pub fn set_type(&mut self, id: ObjectId, new_type: Type) {
        match &mut self.objects[id.0].attrs {
            ObjectAttrs::Variable { ty, .. } | ObjectAttrs::Parameter { ty, .. } => {
                *ty = Some(new_type)
            }
            ObjectAttrs::Function { return_type, .. } => *return_type = Some(new_type),
            ObjectAttrs::Type { actual } => *actual = Some(new_type),
            attrs => tracing::warn!(?attrs, "object does not carry a type"),
        }
    }

    /// Resolves a constant. Other kinds of object are left untouched.
    pub fn set_constant_value(&mut self, id: ObjectId, new_value: ConstantValue) {
        match &mut self.objects[id.0].attrs {
            ObjectAttrs::Constant { value } => *value = Some(new_value),
            attrs => tracing::warn!(?attrs, "object is not a constant"),
        }
    }

    pub fn enter_block(&mut self, scope: ScopeId) {
        tracing::debug!(?scope, depth = self.depth() + 1, "entering block");
        self.current = Some(scope);
    }

    /// Returns to the enclosing scope and hands back the scope that was left.
    /// Does nothing when no scope is active.
    pub fn exit_block(&mut self) -> Option<ScopeId> {
        let left = self.current?;
        self.current = self.scopes[left.0].outer;
        tracing::debug!(scope = ?left, depth = self.depth(), "left block");
        Some(left)
    }

    /// Lists `id` in the current scope and returns that scope. Parameters are
    /// also appended to their owner's parameter list. Freshness is the
    /// caller's concern, see
    /// [`checker::declare_fresh`](crate::checker::declare_fresh).
    ///
    /// Requires an active scope. Without one nothing is listed and `None` is
    /// returned.
    pub fn declare_object(&mut self, id: ObjectId) -> Option<ScopeId> {
        let Some(scope) = self.current else {
            tracing::warn!(name = %self.objects[id.0].name, "declaration outside of any scope");
            return None;
        };

        self.attach(scope, id);
        Some(scope)
    }

    fn attach(&mut self, scope: ScopeId, id: ObjectId) {
        if let ObjectAttrs::Parameter { owner, .. } = self.objects[id.0].attrs {
            match &mut self.objects[owner.0].attrs {
                ObjectAttrs::Function { params, .. } | ObjectAttrs::Procedure { params, .. } => {
                    params.push(id)
                }
                _ => {}
            }
        }

        self.scopes[scope.0].objects.push(id);
        tracing::debug!(name = %self.objects[id.0].name, kind = %self.objects[id.0].kind(), ?scope, "declared");
    }

    /// Finds `name` in the current scope, then the enclosing ones, then the
    /// predefined routines.
    pub fn lookup_object(&self, name: &str) -> Option<ObjectId> {
        let mut scope = self.current;
        while let Some(id) = scope {
            if let Some(object) = self.find_in_scope(id, name) {
                return Some(object);
            }
            scope = self.scopes[id.0].outer;
        }

        self.globals
            .iter()
            .copied()
            .find(|id| self.objects[id.0].name == name)
    }

    pub fn find_in_scope(&self, scope: ScopeId, name: &str) -> Option<ObjectId> {
        self.scopes[scope.0]
            .objects
            .iter()
            .copied()
            .find(|id| self.objects[id.0].name == name)
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn current_scope(&self) -> Option<ScopeId> {
        self.current
    }

    /// Owner of the current scope.
    pub fn current_owner(&self) -> Option<ObjectId> {
        self.current.and_then(|scope| self.scopes[scope.0].owner)
    }

    /// Number of active scopes, the current one included.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.current;
        while let Some(id) = scope {
            depth += 1;
            scope = self.scopes[id.0].outer;
        }
        depth
    }

    pub fn program(&self) -> Option<ObjectId> {
        self.program
    }

    pub fn globals(&self) -> &[ObjectId] {
        &self.globals
    }

    /// Objects declared in `scope`, in declaration order.
    pub fn objects_in(&self, scope: ScopeId) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.scopes[scope.0]
            .objects
            .iter()
            .map(|id| (*id, &self.objects[id.0]))
    }

    /// Looks `name` up directly in the program's root scope.
    pub fn find_global_declaration(&self, name: &str) -> Option<&Object> {
        let program = self.program?;
        let scope = self.objects[program.0].own_scope()?;
        self.find_in_scope(scope, name).map(|id| self.object(id))
    }

    pub fn kind_of(&self, id: ObjectId) -> ObjectKind {
        self.objects[id.0].kind()
    }
}
