//! Expression representation for the Fortran tree view
//!
//! The main thing within this module you will need is the [`Expr`] struct.

use std::fmt::Display;

use ftn_utils::span::{Span, Spanned};

/// Identity of an expression node within one program unit
///
/// Ids are handed out by whoever builds the tree (see
/// [`AstBuilder`](crate::build::AstBuilder)) and must be unique per unit. The
/// type checker keys its results by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprId(u32);
impl ExprId {
    /// Wrap a raw id
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}
impl Display for ExprId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Literal constants, grouped by lexical category
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Literal {
    /// `42`, `42_8`. The text is kept verbatim, kind suffix included.
    Integer(String),
    /// `9.0`, `1.5e3`, `2d0`
    Real(String),
    /// `"abc"` or `'abc'`, holding the content between the quotes
    Character(String),
    /// `.true.` / `.false.`
    Logical(bool),
    /// `(re, im)` with the text of both parts
    Complex(String, String),
}
impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(text) | Self::Real(text) => write!(f, "{text}"),
            Self::Character(content) => write!(f, "\"{content}\""),
            Self::Logical(true) => write!(f, ".true."),
            Self::Logical(false) => write!(f, ".false."),
            Self::Complex(re, im) => write!(f, "({re}, {im})"),
        }
    }
}

/// Prefix operators
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `.not. x`
    Not,
}
impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Not => write!(f, ".not."),
        }
    }
}

/// Relational operators
///
/// Both the symbolic (`<`) and the dotted (`.lt.`) spellings map here.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum RelOp {
    /// `==`
    Eq,
    /// `/=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}
impl Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eq => write!(f, "=="),
            Self::Ne => write!(f, "/="),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// Infix operators
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `**`
    Pow,
    /// `//`
    Concat,
    /// Any [`RelOp`]
    Rel(RelOp),
    /// `.and.`
    And,
    /// `.or.`
    Or,
    /// `.eqv.`
    Eqv,
    /// `.neqv.`
    Neqv,
}
impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Pow => write!(f, "**"),
            Self::Concat => write!(f, "//"),
            Self::Rel(op) => write!(f, "{op}"),
            Self::And => write!(f, ".and."),
            Self::Or => write!(f, ".or."),
            Self::Eqv => write!(f, ".eqv."),
            Self::Neqv => write!(f, ".neqv."),
        }
    }
}

/// A variable reference, optionally subscripted: `a` or `a(3)`
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Designator {
    /// The referenced name, as written
    pub name: Spanned<String>,
    /// `Some` when the reference carries a subscript list
    pub subscripts: Option<Vec<Expr>>,
}
impl Designator {
    /// Returns `true` if an element (not the whole variable) is selected
    #[must_use]
    pub const fn is_subscripted(&self) -> bool {
        self.subscripts.is_some()
    }
}
impl Display for Designator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(subscripts) = &self.subscripts {
            write!(
                f,
                "({})",
                subscripts
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }
        Ok(())
    }
}

/// An implied-do range inside an array constructor: `(body, i = start, end[, stride])`
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ImpliedDo {
    /// The values produced on every trip
    pub body: Vec<AcValue>,
    /// The loop variable
    pub variable: Spanned<String>,
    /// First value of the loop variable
    pub start: Box<Expr>,
    /// Last value of the loop variable
    pub end: Box<Expr>,
    /// Increment, `1` when absent
    pub stride: Option<Box<Expr>>,
}
impl Display for ImpliedDo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for value in &self.body {
            write!(f, "{value}, ")?;
        }
        write!(f, "{} = {}, {}", self.variable, self.start, self.end)?;
        if let Some(stride) = &self.stride {
            write!(f, ", {stride}")?;
        }
        write!(f, ")")
    }
}

/// One entry of an array constructor
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum AcValue {
    /// A plain element
    Expr(Expr),
    /// An implied-do range
    ImpliedDo(Spanned<ImpliedDo>),
}
impl AcValue {
    /// The span of this entry
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Expr(expr) => expr.kind.span(),
            Self::ImpliedDo(implied_do) => implied_do.span(),
        }
    }
}
impl Display for AcValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{expr}"),
            Self::ImpliedDo(implied_do) => write!(f, "{implied_do}"),
        }
    }
}

/// A Fortran expression node
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Expr {
    /// Node identity
    pub id: ExprId,
    /// What kind of expression this is, and where
    pub kind: Spanned<ExprKind>,
}
impl Expr {
    /// The span of this expression
    #[must_use]
    pub const fn span(&self) -> Span {
        self.kind.span()
    }

    /// End offset of this expression
    #[must_use]
    pub const fn end(&self) -> usize {
        self.kind.end()
    }

    /// Looks through any number of parentheses
    #[must_use]
    pub fn peel_parentheses(&self) -> &Self {
        let mut expr = self;
        while let ExprKind::Parenthesized(inner) = expr.kind.value() {
            expr = inner;
        }
        expr
    }

    /// Returns `true` if this is an array constructor, possibly parenthesized
    #[must_use]
    pub fn is_array_constructor(&self) -> bool {
        matches!(
            self.peel_parentheses().kind.value(),
            ExprKind::ArrayConstructor(_)
        )
    }
}
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.value().fmt(f)
    }
}

/// The different kinds of expressions
#[derive(PartialEq, Eq, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub enum ExprKind {
    /// A literal constant
    Literal(Literal),
    /// `op x`
    Unary(UnaryOp, Box<Expr>),
    /// `x op y`
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// `(x)`
    Parenthesized(Box<Expr>),
    /// A variable reference
    Designator(Designator),
    /// `[a, b, (i, i = 1, 3)]`
    ArrayConstructor(Vec<AcValue>),
}
impl Display for ExprKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Unary(UnaryOp::Not, x) => write!(f, ".not. {x}"),
            Self::Unary(op, x) => write!(f, "{op}{x}"),
            Self::Binary(op, lhs, rhs) => write!(f, "{lhs} {op} {rhs}"),
            Self::Parenthesized(x) => write!(f, "({x})"),
            Self::Designator(designator) => write!(f, "{designator}"),
            Self::ArrayConstructor(values) => write!(
                f,
                "[{}]",
                values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
