//! Associations to spans within the input source
//!
//! This module declares two types, [`Span`] and [`Spanned<T>`], which let the
//! tree view and the diagnostics point back at byte offsets inside a program
//! unit. The [`Spannable`] trait allows attaching a span to any value in a
//! chained call.

use std::fmt::Display;

/// A half-open byte range `start..end` within a source file
///
/// Spans can be obtained in a few ways:
/// - Direct construction ([`Span::from_positions`])
/// - Joining two spans ([`Span::cover`])
/// - Stripping the value from a [`Spanned<T>`] ([`Spanned::span`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span(usize, usize);
impl Span {
    /// Create a new [`Span`] given a start and end location.
    ///
    /// # Panics
    /// Panics if `start > end`.
    #[must_use]
    pub fn from_positions(start: usize, end: usize) -> Self {
        assert!(
            end >= start,
            "span must have positive length (got span {start}..{end})"
        );
        Self(start, end)
    }

    /// Obtains the starting position of this [`Span`]
    #[must_use]
    #[inline]
    pub const fn start(&self) -> usize {
        self.0
    }

    /// Obtains the ending position of this [`Span`]
    #[must_use]
    #[inline]
    pub const fn end(&self) -> usize {
        self.1
    }

    /// Number of bytes covered
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.1 - self.0
    }

    /// Returns `true` if this span covers no bytes
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == self.1
    }

    /// Returns `true` if `other` lies entirely within this span
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// The smallest span covering both `a` and `b`
    #[must_use]
    pub fn cover(a: Self, b: Self) -> Self {
        Self::from_positions(a.start().min(b.start()), a.end().max(b.end()))
    }
}
impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start(), self.end())
    }
}

/// Represents something (`T`) located at a [`Span`].
///
/// Tree nodes, names and diagnostics all travel as [`Spanned`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spanned<T>(Span, T);
impl<T> Spanned<T> {
    /// Create a new [`Spanned<T>`] instance from a [`Span`] and value
    #[must_use]
    #[inline]
    pub const fn from_span_and_value(span: Span, value: T) -> Self {
        Self(span, value)
    }

    /// Obtains the [`Span`] associated with this [`Spanned<T>`] instance
    #[must_use]
    #[inline]
    pub const fn span(&self) -> Span {
        self.0
    }

    /// Obtains a reference to the value this [`Spanned<T>`] instance wraps
    #[inline]
    pub const fn value(&self) -> &T {
        &self.1
    }

    /// Applies a function to the contained value, keeping the [`Span`]
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        let span = self.span();
        Spanned::from_span_and_value(span, f(self.into_value()))
    }

    /// "Strips" the [`Spanned<T>`] of its [`Span`], returning the inner value
    #[allow(clippy::missing_const_for_fn)]
    #[inline]
    pub fn into_value(self) -> T {
        self.1
    }

    /// Obtains the starting position of the contained [`Span`]
    #[must_use]
    #[inline]
    pub const fn start(&self) -> usize {
        self.span().start()
    }

    /// Obtains the ending position of the contained [`Span`]
    #[must_use]
    #[inline]
    pub const fn end(&self) -> usize {
        self.span().end()
    }

    /// Converts a [`&Spanned<T>`][Spanned] to a [`Spanned<&T>`].
    #[inline]
    pub const fn as_ref(&self) -> Spanned<&T> {
        Spanned::from_span_and_value(self.span(), &self.1)
    }
}
impl<T> Display for Spanned<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value().fmt(f)
    }
}

/// A trait automatically implemented on all types that allows you to attach a
/// [`Span`] to something, creating a [`Spanned<T>`] instance.
pub trait Spannable
where
    Self: Sized,
{
    /// Attach a [`Span`] to this value, creating a [`Spanned<T>`] instance
    fn in_span(self, span: Span) -> Spanned<Self>;
}

impl<T: Sized> Spannable for T {
    #[inline]
    fn in_span(self, span: Span) -> Spanned<Self> {
        Spanned::from_span_and_value(span, self)
    }
}

/// Create a [`Spanned<T>`] instance from two locations and a value.
///
/// # Panics
/// Panics if `start > end`.
#[macro_export]
macro_rules! spanned {
    ($start:expr, $value:expr, $end:expr) => {
        $crate::span::Spanned::from_span_and_value(
            $crate::span::Span::from_positions($start, $end),
            $value,
        )
    };
}
