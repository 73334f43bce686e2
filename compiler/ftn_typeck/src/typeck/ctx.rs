//! Per-pass state of the inference engine

use std::cell::RefCell;

use ftn_ast::expr::{Designator, Expr, ExprId};
use ftn_utils::span::Span;
use log::trace;

use super::{
    diagnostic_kind::TypeDiagnosticKind,
    diagnostics::DiagnosticCollector,
    expr::type_expr,
    options::InferenceOptions,
    resolve::{Declaration, Resolver},
    results::{ExprTypeMap, InferenceResult},
};
use crate::ty::Type;

/// Everything one inference pass reads from and writes to
///
/// A context owns its type map and diagnostics, so independent passes never
/// share state. It is not meant to be shared between threads.
pub struct InferCtx<'r, 'ast> {
    /// Finds declarations for variable references
    resolver: &'r dyn Resolver<'ast>,
    /// Pass settings
    options: &'r InferenceOptions,
    /// Types inferred so far
    types: RefCell<ExprTypeMap>,
    /// Diagnostics reported so far
    diagnostics: DiagnosticCollector,
    /// Implied-do variables in scope, innermost last, lowercased
    loop_variables: RefCell<Vec<String>>,
}

impl<'r, 'ast> InferCtx<'r, 'ast> {
    /// A fresh context
    #[must_use]
    pub fn new(resolver: &'r dyn Resolver<'ast>, options: &'r InferenceOptions) -> Self {
        Self {
            resolver,
            options,
            types: RefCell::new(ExprTypeMap::new()),
            diagnostics: DiagnosticCollector::new(),
            loop_variables: RefCell::new(Vec::new()),
        }
    }

    /// Infer the type of `expr` and everything below it.
    ///
    /// `expected` is the type of the variable the value is stored into, if
    /// any. Only array constructors look at it. A node that was already typed
    /// in this pass keeps its first type.
    pub fn infer_expr(&self, expr: &Expr, expected: Option<&Type>) -> Type {
        type_expr(self, expr, expected)
    }

    /// Pass settings
    #[must_use]
    pub const fn options(&self) -> &InferenceOptions {
        self.options
    }

    /// The type already recorded for `id`
    #[must_use]
    pub fn type_of(&self, id: ExprId) -> Option<Type> {
        self.types.borrow().get(id).cloned()
    }

    /// Record the type of `expr` and hand it back
    pub(crate) fn record(&self, expr: &Expr, ty: Type) -> Type {
        trace!("{} `{expr}` : {ty}", expr.id);
        self.types.borrow_mut().insert(expr.id, ty.clone());
        ty
    }

    /// Ask the resolver for the declaration of `designator`
    pub(crate) fn resolve(&self, designator: &Designator) -> Option<Declaration<'ast>> {
        self.resolver.resolve(designator)
    }

    /// Report a diagnostic
    pub(crate) fn report(&self, span: Span, kind: TypeDiagnosticKind) {
        self.diagnostics.report(span, kind);
    }

    /// Report a diagnostic and return an unknown type caused by it
    pub(crate) fn poison(&self, span: Span, kind: TypeDiagnosticKind) -> Type {
        let cause = kind.to_string();
        self.report(span, kind);
        Type::unknown_because(cause)
    }

    /// Whether a diagnostic about something built from `inputs` should be
    /// reported. Unknown inputs were either reported already or are
    /// deliberately silent.
    pub(crate) fn should_report(&self, inputs: &[&Type]) -> bool {
        !(self.options.suppress_cascading_diagnostics && inputs.iter().any(|ty| ty.is_unknown()))
    }

    /// Run `f` with `name` bound as an implied-do variable
    pub(crate) fn with_loop_variable<R>(&self, name: &str, f: impl FnOnce() -> R) -> R {
        self.loop_variables
            .borrow_mut()
            .push(name.to_ascii_lowercase());
        let result = f();
        self.loop_variables.borrow_mut().pop();
        result
    }

    /// Whether `name` is an implied-do variable in scope
    pub(crate) fn is_loop_variable(&self, name: &str) -> bool {
        self.loop_variables
            .borrow()
            .iter()
            .any(|variable| variable.eq_ignore_ascii_case(name))
    }

    /// Finish the pass
    #[must_use]
    pub fn finish(self) -> InferenceResult {
        InferenceResult {
            types: self.types.into_inner(),
            diagnostics: self.diagnostics.into_diagnostics(),
        }
    }
}

impl std::fmt::Debug for InferCtx<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferCtx")
            .field("options", &self.options)
            .field("types", &self.types)
            .field("diagnostics", &self.diagnostics)
            .field("loop_variables", &self.loop_variables)
            .finish_non_exhaustive()
    }
}
