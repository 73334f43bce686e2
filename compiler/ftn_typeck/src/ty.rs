//! The Fortran type model
//!
//! Types are plain values: scalar intrinsics, fixed-size one-dimensional
//! arrays of a scalar, and [`Type::Unknown`] for anything that could not be
//! typed. [`is_assignable`] and [`unify`] are the two relations the inference
//! engine builds on.

use std::fmt::Display;

use derive_more::Display;

/// Data attached to a [`Type::Array`]
///
/// The base is always a known scalar. Use [`Type::array`] to build one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{base}, dimension({size})")]
pub struct ArrayType {
    /// The element type
    base: Box<Type>,
    /// Number of elements
    size: u64,
}
impl ArrayType {
    /// The element type
    #[must_use]
    pub fn base(&self) -> &Type {
        &self.base
    }

    /// Number of elements
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Take the element type out
    #[must_use]
    pub fn into_base(self) -> Type {
        *self.base
    }
}

/// The possible Fortran types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// `integer`, any kind
    Integer,
    /// `real` and `double precision`
    Real,
    /// `logical`
    Logical,
    /// `complex`
    Complex,
    /// `character(len=n)`. `None` when the length is not known statically.
    Character(Option<u64>),
    /// A fixed-size, one-dimensional array
    Array(ArrayType),
    /// Could not be typed. May carry the message of the diagnostic that
    /// explains why.
    Unknown(Option<String>),
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::Logical => write!(f, "logical"),
            Self::Complex => write!(f, "complex"),
            Self::Character(_) => write!(f, "character"),
            Self::Array(array) => write!(f, "{array}"),
            Self::Unknown(_) => write!(f, "unknown type"),
        }
    }
}

impl Type {
    /// `character(len=length)`
    #[must_use]
    pub const fn character(length: u64) -> Self {
        Self::Character(Some(length))
    }

    /// An array of `size` elements of `base`.
    ///
    /// Arrays do not nest and cannot hold unknowns, so this is
    /// [`Type::Unknown`] if `base` is an array or unknown.
    #[must_use]
    pub fn array(base: Self, size: u64) -> Self {
        match base {
            Self::Array(_) | Self::Unknown(_) => Self::unknown(),
            base => Self::Array(ArrayType {
                base: Box::new(base),
                size,
            }),
        }
    }

    /// An unknown type with no recorded cause
    #[must_use]
    pub const fn unknown() -> Self {
        Self::Unknown(None)
    }

    /// An unknown type explained by `cause`
    #[must_use]
    pub fn unknown_because(cause: impl Into<String>) -> Self {
        Self::Unknown(Some(cause.into()))
    }

    /// Returns `true` for [`Type::Unknown`]
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Returns `true` for [`Type::Array`]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns `true` for a known scalar type
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Unknown(_))
    }

    /// Returns `true` for [`Type::Integer`] and [`Type::Real`]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    /// The recorded cause of an unknown type
    #[must_use]
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::Unknown(cause) => cause.as_deref(),
            _ => None,
        }
    }

    /// Try to access the array data if we are an array
    #[must_use]
    pub const fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }
}

/// Whether a value of type `source` may be stored into a variable of type
/// `target`.
///
/// Only `integer` widens, and only into `real`. A character value fits if its
/// length does not exceed the target's. Arrays need the same size and
/// assignable elements. Nothing is assignable to or from [`Type::Unknown`].
#[must_use]
pub fn is_assignable(target: &Type, source: &Type) -> bool {
    match (target, source) {
        (Type::Integer, Type::Integer)
        | (Type::Real, Type::Integer | Type::Real)
        | (Type::Logical, Type::Logical)
        | (Type::Complex, Type::Complex) => true,
        (Type::Character(capacity), Type::Character(length)) => match (capacity, length) {
            (Some(capacity), Some(length)) => length <= capacity,
            // an unknown length on either side cannot be checked
            _ => true,
        },
        (Type::Array(target), Type::Array(source)) => {
            target.size == source.size && is_assignable(&target.base, &source.base)
        }
        _ => false,
    }
}

/// The least upper bound of two types, used to type heterogeneous literal
/// collections.
///
/// Identical types unify to themselves, `integer` and `real` to `real`,
/// characters to the longer length, and equally sized arrays element-wise.
/// Everything else is [`Type::Unknown`].
#[must_use]
pub fn unify(a: &Type, b: &Type) -> Type {
    match (a, b) {
        _ if a == b => a.clone(),
        (Type::Integer, Type::Real) | (Type::Real, Type::Integer) => Type::Real,
        (Type::Character(a), Type::Character(b)) => {
            Type::Character(a.zip(*b).map(|(a, b)| a.max(b)))
        }
        (Type::Array(a), Type::Array(b)) if a.size == b.size => {
            Type::array(unify(&a.base, &b.base), a.size)
        }
        _ => Type::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every scalar, plus a few awkward ones
    fn samples() -> Vec<Type> {
        vec![
            Type::Integer,
            Type::Real,
            Type::Logical,
            Type::Complex,
            Type::character(3),
            Type::Character(None),
            Type::array(Type::Integer, 4),
            Type::array(Type::Real, 4),
            Type::unknown(),
        ]
    }

    #[test]
    fn display_uses_fortran_names() {
        assert_eq!(Type::Integer.to_string(), "integer");
        assert_eq!(Type::Real.to_string(), "real");
        assert_eq!(Type::Logical.to_string(), "logical");
        assert_eq!(Type::Complex.to_string(), "complex");
        assert_eq!(Type::character(17).to_string(), "character");
        assert_eq!(Type::unknown_because("oops").to_string(), "unknown type");
        assert_eq!(
            Type::array(Type::Integer, 6).to_string(),
            "integer, dimension(6)"
        );
    }

    #[test]
    fn arrays_do_not_nest() {
        let inner = Type::array(Type::Integer, 2);
        assert!(Type::array(inner, 3).is_unknown());
        assert!(Type::array(Type::unknown(), 3).is_unknown());
        let array = Type::array(Type::Logical, 3);
        let array = array.as_array().expect("logical array should build");
        assert_eq!(array.base(), &Type::Logical);
        assert_eq!(array.size(), 3);
    }

    #[test]
    fn widening_is_one_directional() {
        assert!(is_assignable(&Type::Real, &Type::Integer));
        assert!(!is_assignable(&Type::Integer, &Type::Real));
    }

    #[test]
    fn scalars_only_accept_themselves_otherwise() {
        for target in [Type::Integer, Type::Logical, Type::Complex] {
            for source in samples() {
                assert_eq!(
                    is_assignable(&target, &source),
                    target == source,
                    "{target} <- {source}"
                );
            }
        }
    }

    #[test]
    fn unknown_is_never_assignable() {
        for other in samples() {
            assert!(!is_assignable(&Type::unknown(), &other));
            assert!(!is_assignable(&other, &Type::unknown()));
        }
    }

    #[test]
    fn character_capacity() {
        assert!(is_assignable(&Type::character(3), &Type::character(3)));
        assert!(is_assignable(&Type::character(3), &Type::character(0)));
        assert!(!is_assignable(&Type::character(3), &Type::character(4)));
        assert!(is_assignable(&Type::Character(None), &Type::character(40)));
        assert!(is_assignable(&Type::character(1), &Type::Character(None)));
        assert!(!is_assignable(&Type::character(8), &Type::Integer));
        assert!(!is_assignable(&Type::Integer, &Type::character(1)));
    }

    #[test]
    fn arrays_need_equal_size_and_assignable_elements() {
        let reals = Type::array(Type::Real, 3);
        assert!(is_assignable(&reals, &Type::array(Type::Integer, 3)));
        assert!(!is_assignable(&reals, &Type::array(Type::Integer, 4)));
        assert!(!is_assignable(&Type::array(Type::Integer, 3), &reals));
        assert!(!is_assignable(&reals, &Type::Real));
        assert!(!is_assignable(&Type::Real, &reals));
    }

    #[test]
    fn unify_identical_and_numeric() {
        for t in samples() {
            assert_eq!(unify(&t, &t), t);
        }
        assert_eq!(unify(&Type::Integer, &Type::Real), Type::Real);
        assert_eq!(unify(&Type::Real, &Type::Integer), Type::Real);
        assert!(unify(&Type::Integer, &Type::Logical).is_unknown());
        assert!(unify(&Type::Complex, &Type::Real).is_unknown());
        assert!(unify(&Type::character(1), &Type::Logical).is_unknown());
    }

    #[test]
    fn unify_characters_to_the_longer_length() {
        assert_eq!(
            unify(&Type::character(2), &Type::character(3)),
            Type::character(3)
        );
        assert_eq!(
            unify(&Type::character(3), &Type::character(2)),
            Type::character(3)
        );
        assert_eq!(
            unify(&Type::Character(None), &Type::character(2)),
            Type::Character(None)
        );
    }

    #[test]
    fn unify_arrays() {
        assert_eq!(
            unify(&Type::array(Type::Integer, 2), &Type::array(Type::Real, 2)),
            Type::array(Type::Real, 2)
        );
        assert!(unify(&Type::array(Type::Integer, 2), &Type::array(Type::Integer, 3)).is_unknown());
        assert!(unify(&Type::array(Type::Logical, 2), &Type::array(Type::Integer, 2)).is_unknown());
        assert!(unify(&Type::array(Type::Integer, 2), &Type::Integer).is_unknown());
    }

    #[test]
    fn unknown_keeps_its_cause() {
        let t = Type::unknown_because("unresolved variable `x`");
        assert_eq!(t.cause(), Some("unresolved variable `x`"));
        assert_eq!(Type::Integer.cause(), None);
        assert!(!t.is_scalar());
        assert!(Type::character(1).is_scalar());
    }
}
