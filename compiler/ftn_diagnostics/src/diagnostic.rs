//! Defines the generic diagnostic record.
//!
//! A [`GenericDiagnostic`] is a [`Severity`] plus a spanned, producer-defined
//! kind. It owns no reference into the tree it was produced from.

use derive_more::Display;
use ftn_utils::span::{Span, Spanned};

/// The severity of a [`GenericDiagnostic`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
pub enum Severity {
    /// Informational. Usually marks something the checker could not look at.
    #[display("note")]
    Note,
    /// Likely a bug in the inspected program.
    #[display("warning")]
    Warning,
    /// Definitely invalid.
    #[display("error")]
    Error,
}

/// A diagnostic of kind `K` located at a span
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{severity}: {kind}")]
pub struct GenericDiagnostic<K> {
    /// How severe the problem is
    pub severity: Severity,
    /// What the problem is, and where
    pub kind: Spanned<K>,
}

impl<K> GenericDiagnostic<K> {
    /// Create a diagnostic with an explicit [`Severity`]
    #[must_use]
    pub const fn new(severity: Severity, kind: Spanned<K>) -> Self {
        Self { severity, kind }
    }

    /// The span this diagnostic points at
    #[must_use]
    pub const fn span(&self) -> Span {
        self.kind.span()
    }

    /// The kind of this diagnostic, without its span
    #[must_use]
    pub const fn kind(&self) -> &K {
        self.kind.value()
    }
}
