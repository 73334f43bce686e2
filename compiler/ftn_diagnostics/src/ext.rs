//! Extension traits for building diagnostics from spans

use ftn_utils::span::{Span, Spannable};

use crate::{GenericDiagnostic, Severity};

/// A trait to easily create [`GenericDiagnostic`]s from [`Span`]s
pub trait SpanExt {
    /// Create a diagnostic of the given [`Severity`] at this span
    #[must_use]
    fn diagnostic<K>(self, severity: Severity, kind: K) -> GenericDiagnostic<K>;
}
impl SpanExt for Span {
    #[inline]
    fn diagnostic<K>(self, severity: Severity, kind: K) -> GenericDiagnostic<K> {
        GenericDiagnostic::new(severity, kind.in_span(self))
    }
}
