//! Diagnostic collection for error recovery during type checking

use std::cell::RefCell;

use ftn_diagnostics::SpanExt;
use ftn_utils::span::Span;

use super::diagnostic_kind::{TypeDiagnostic, TypeDiagnosticKind};

/// A collector for diagnostics during type checking.
///
/// This structure uses interior mutability to allow collecting diagnostics
/// while the checker only holds shared references to its state.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    /// The collected diagnostics, in report order
    diagnostics: RefCell<Vec<TypeDiagnostic>>,
}

impl DiagnosticCollector {
    /// Create a new empty diagnostic collector
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Add a diagnostic to the collection
    pub fn push(&self, diagnostic: TypeDiagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Report `kind` at `span` with the severity the kind calls for
    pub fn report(&self, span: Span, kind: TypeDiagnosticKind) {
        let severity = kind.severity();
        self.push(span.diagnostic(severity, kind));
    }

    /// Get all collected diagnostics, consuming the collector
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<TypeDiagnostic> {
        self.diagnostics.into_inner()
    }

    /// Get the number of diagnostics collected
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Check if the collector is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}
