//! Finding the declaration behind a variable reference
//!
//! The engine never looks up names itself. It asks a [`Resolver`], which a
//! host can back with whatever symbol tables it has. [`ScopeResolver`] is the
//! in-memory one used when a unit is checked on its own.

use std::collections::HashMap;

use ftn_ast::{
    expr::Designator,
    stmt::{ArraySpec, EntityDecl, IntrinsicTypeSpec, ProgramUnit, TypeDeclarationStmt},
};
use log::{debug, trace};

/// One declared entity together with the statement that declares it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'ast> {
    /// The declaring statement
    pub statement: &'ast TypeDeclarationStmt,
    /// The entity within it
    pub entity: &'ast EntityDecl,
}

impl<'ast> Declaration<'ast> {
    /// The declared intrinsic type
    #[must_use]
    pub const fn type_spec(&self) -> &'ast IntrinsicTypeSpec {
        &self.statement.type_spec
    }

    /// The declared shape, if this is an array
    #[must_use]
    pub fn shape(&self) -> Option<&'ast ArraySpec> {
        self.statement.shape_of(self.entity)
    }
}

/// Maps a variable reference to its declaration
pub trait Resolver<'ast> {
    /// Find the declaration `designator` refers to, or [`None`] if it is not
    /// visible
    fn resolve(&self, designator: &Designator) -> Option<Declaration<'ast>>;
}

impl<'ast, F> Resolver<'ast> for F
where
    F: Fn(&Designator) -> Option<Declaration<'ast>>,
{
    fn resolve(&self, designator: &Designator) -> Option<Declaration<'ast>> {
        self(designator)
    }
}

/// Resolves names against the declarations of a single program unit
///
/// Fortran names are case-insensitive. When a name is declared twice the
/// first declaration wins.
#[derive(Debug, Default)]
pub struct ScopeResolver<'ast> {
    /// Declarations keyed by lowercased name
    declarations: HashMap<String, Declaration<'ast>>,
}

impl<'ast> ScopeResolver<'ast> {
    /// An empty scope
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope holding every entity declared in `unit`
    #[must_use]
    pub fn from_unit(unit: &'ast ProgramUnit) -> Self {
        let mut scope = Self::new();
        for statement in &unit.declarations {
            scope.declare_all(statement.value());
        }
        scope
    }

    /// Add every entity of `statement`
    pub fn declare_all(&mut self, statement: &'ast TypeDeclarationStmt) {
        for entity in &statement.entities {
            self.declare(Declaration { statement, entity });
        }
    }

    /// Add one declaration. Returns `false` if the name was already taken.
    pub fn declare(&mut self, declaration: Declaration<'ast>) -> bool {
        let name = declaration.entity.name.value();
        let key = name.to_ascii_lowercase();
        if self.declarations.contains_key(&key) {
            debug!("`{name}` is declared more than once, keeping the first declaration");
            return false;
        }
        self.declarations.insert(key, declaration);
        true
    }

    /// Look a name up directly
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Declaration<'ast>> {
        self.declarations.get(&name.to_ascii_lowercase()).copied()
    }

    /// Number of declared names
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if nothing is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<'ast> Resolver<'ast> for ScopeResolver<'ast> {
    fn resolve(&self, designator: &Designator) -> Option<Declaration<'ast>> {
        let found = self.get(designator.name.value());
        trace!(
            "resolving `{}`: {}",
            designator.name,
            if found.is_some() { "found" } else { "not found" }
        );
        found
    }
}
