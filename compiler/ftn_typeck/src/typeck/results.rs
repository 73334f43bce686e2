//! What one inference pass produces

use ftn_ast::expr::ExprId;
use indexmap::IndexMap;
use log::warn;

use super::diagnostic_kind::TypeDiagnostic;
use crate::ty::Type;

/// The inferred type of every visited expression node, in visit order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExprTypeMap(IndexMap<ExprId, Type>);

impl ExprTypeMap {
    /// An empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type of `id`. A node is typed once; a second write is
    /// ignored and returns `false`.
    pub fn insert(&mut self, id: ExprId, ty: Type) -> bool {
        if self.0.contains_key(&id) {
            warn!("expression {id} was typed twice, keeping the first type");
            return false;
        }
        self.0.insert(id, ty);
        true
    }

    /// The type recorded for `id`
    #[must_use]
    pub fn get(&self, id: ExprId) -> Option<&Type> {
        self.0.get(&id)
    }

    /// Returns `true` if `id` was typed
    #[must_use]
    pub fn contains(&self, id: ExprId) -> bool {
        self.0.contains_key(&id)
    }

    /// Number of typed nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in visit order
    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &Type)> {
        self.0.iter().map(|(id, ty)| (*id, ty))
    }
}

/// The outcome of checking one program unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceResult {
    /// Types of all visited expressions
    pub types: ExprTypeMap,
    /// Diagnostics, in traversal order
    pub diagnostics: Vec<TypeDiagnostic>,
}

impl InferenceResult {
    /// The type inferred for `id`
    #[must_use]
    pub fn type_of(&self, id: ExprId) -> Option<&Type> {
        self.types.get(id)
    }
}
