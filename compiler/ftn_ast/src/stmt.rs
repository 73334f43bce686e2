//! Declarations, statements and program units for the Fortran tree view

use std::fmt::Display;

use ftn_utils::span::Spanned;

use crate::expr::Expr;

/// The base type keyword of an intrinsic type spec
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TypeKeyword {
    /// `integer`
    Integer,
    /// `real`
    Real,
    /// `double precision`
    DoublePrecision,
    /// `complex`
    Complex,
    /// `logical`
    Logical,
    /// `character`
    Character,
}
impl Display for TypeKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::DoublePrecision => write!(f, "double precision"),
            Self::Complex => write!(f, "complex"),
            Self::Logical => write!(f, "logical"),
            Self::Character => write!(f, "character"),
        }
    }
}

/// `integer(kind=8)`, `character(len=17)`, ...
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct IntrinsicTypeSpec {
    /// The base type keyword
    pub keyword: Spanned<TypeKeyword>,
    /// `kind=` selector, if any
    pub kind: Option<Expr>,
    /// `len=` selector (or `character*n`), only meaningful for `character`
    pub length: Option<Expr>,
}

/// One dimension of an explicit shape: `n`, `lo:hi`, or a deferred `:`
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ShapeSpec {
    /// Lower bound, `1` when absent
    pub lower: Option<Expr>,
    /// Upper bound, `None` for a deferred or assumed shape (`:`)
    pub upper: Option<Expr>,
}

/// The dimension list of an array declaration
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ArraySpec(pub Vec<ShapeSpec>);
impl ArraySpec {
    /// Number of dimensions
    #[must_use]
    pub fn rank(&self) -> usize {
        self.0.len()
    }
}

/// Attributes on a type declaration statement
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum AttrSpec {
    /// `dimension(...)`
    Dimension(ArraySpec),
    /// `parameter`
    Parameter,
    /// Any attribute the checker does not look at (`allocatable`, `save`, ...)
    Other(String),
}

/// One declared entity: `a`, `a(5)`, `a = 3`
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct EntityDecl {
    /// The declared name
    pub name: Spanned<String>,
    /// Entity-level shape, overriding any `dimension` attribute
    pub array_spec: Option<ArraySpec>,
    /// Initializer expression
    pub init: Option<Expr>,
}

/// `integer, dimension(6) :: a, b = ...`
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TypeDeclarationStmt {
    /// The declared intrinsic type
    pub type_spec: IntrinsicTypeSpec,
    /// Attributes, in source order
    pub attrs: Vec<AttrSpec>,
    /// Declared entities, in source order
    pub entities: Vec<EntityDecl>,
}
impl TypeDeclarationStmt {
    /// The shape given by a `dimension` attribute, if present
    #[must_use]
    pub fn dimension(&self) -> Option<&ArraySpec> {
        self.attrs.iter().find_map(|attr| match attr {
            AttrSpec::Dimension(spec) => Some(spec),
            AttrSpec::Parameter | AttrSpec::Other(_) => None,
        })
    }

    /// The shape that applies to `entity`: its own array spec, otherwise the
    /// statement's `dimension` attribute
    #[must_use]
    pub fn shape_of<'a>(&'a self, entity: &'a EntityDecl) -> Option<&'a ArraySpec> {
        entity.array_spec.as_ref().or_else(|| self.dimension())
    }
}

/// Executable statements
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Stmt {
    /// `target = value`
    Assignment {
        /// The assigned designator
        target: Expr,
        /// The assigned value
        value: Expr,
    },
    /// Any statement the checker ignores
    Opaque,
}

/// What kind of program unit a [`ProgramUnit`] is
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ProgramUnitKind {
    /// `program p`
    MainProgram,
    /// `module m`
    Module,
    /// `subroutine s`
    Subroutine,
    /// `function f`
    Function,
}

/// One program unit: a specification part and an execution part
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ProgramUnit {
    /// What kind of unit this is
    pub kind: ProgramUnitKind,
    /// The unit's name
    pub name: Spanned<String>,
    /// Type declaration statements, in source order
    pub declarations: Vec<Spanned<TypeDeclarationStmt>>,
    /// Executable statements, in source order
    pub statements: Vec<Spanned<Stmt>>,
}
