//! Defines everything the type checker can report.

use derive_more::Display;
use ftn_ast::expr::{BinaryOp, ExprId, RelOp, UnaryOp};
use ftn_diagnostics::{GenericDiagnostic, Severity};
use thiserror::Error;

use crate::ty::Type;

/// A diagnostic produced by the type checker
pub type TypeDiagnostic = GenericDiagnostic<TypeDiagnosticKind>;

/// Something the checker could not look at. Reported as a
/// [note](Severity::Note) when the host opts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Unsupported {
    /// An array bound that is not an integer literal
    #[display("array bound is not a literal constant")]
    NonLiteralBound,
    /// More than one dimension
    #[display("arrays of rank {_0} are not checked")]
    Rank(usize),
    /// `:` in a declaration
    #[display("deferred or assumed shape arrays are not checked")]
    DeferredShape,
    /// An implied-do bound that is not an integer literal
    #[display("implied-do bounds are not literal constants")]
    NonLiteralImpliedDoBound,
    /// An implied-do with a stride of zero
    #[display("implied-do stride is zero")]
    ZeroStride,
}

/// The list of possible type checker diagnostics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeDiagnosticKind {
    /// A value does not fit the variable it is stored into
    #[error("Assigning {actual} value to a variable of {expected} type")]
    TypeMismatch {
        /// The offending value
        expr: ExprId,
        /// The declared type of the variable
        expected: Type,
        /// The inferred type of the value
        actual: Type,
    },
    /// No typing rule applies to a binary operation
    #[error(
        "Can't infer type of this {} expression where arguments are: {left} and {right}",
        describe_binary(.op)
    )]
    MalformedBinaryExpression {
        /// The operation
        expr: ExprId,
        /// The operator
        op: BinaryOp,
        /// Type of the left operand
        left: Type,
        /// Type of the right operand
        right: Type,
    },
    /// No typing rule applies to a unary operation
    #[error(
        "Can't infer type of this {} expression where argument is: {operand}",
        describe_unary(.op)
    )]
    MalformedUnaryExpression {
        /// The operation
        expr: ExprId,
        /// The operator
        op: UnaryOp,
        /// Type of the operand
        operand: Type,
    },
    /// An array constructor element that does not fit the rest
    #[error("Array constructor element of {element} type does not fit an array of {expected_base} type")]
    MalformedArrayConstructor {
        /// The element, or the constructor for an implied-do entry
        expr: ExprId,
        /// The element type the constructor was expected to have
        expected_base: Type,
        /// The element's own type
        element: Type,
    },
    /// An implied-do bound or stride that is not an integer
    #[error("Implied-do loop bound must be integer, got {ty}")]
    MalformedImplicitDoLoop {
        /// The bound
        expr: ExprId,
        /// Its type
        ty: Type,
    },
    /// An array subscript that is not an integer
    #[error("Array subscript must be integer, got {ty}")]
    MalformedSubscript {
        /// The subscript
        expr: ExprId,
        /// Its type
        ty: Type,
    },
    /// An integer literal that does not fit its kind
    #[error("Integer literal {literal} is too big for integer(kind={kind})")]
    IntegerLiteralOutOfRange {
        /// The literal
        expr: ExprId,
        /// Its text
        literal: String,
        /// The kind it was checked against
        kind: u8,
    },
    /// A variable with no declaration in scope
    #[error("Can't resolve declaration of `{name}`")]
    UnresolvedDesignator {
        /// The reference
        expr: ExprId,
        /// The name as written
        name: String,
    },
    /// Something the checker skipped
    #[error("Type checking skipped: {reason}")]
    UnsupportedConstruct {
        /// The expression involved, if the construct is one
        expr: Option<ExprId>,
        /// What was skipped
        reason: Unsupported,
    },
}

impl TypeDiagnosticKind {
    /// The node this diagnostic is about, if it is about one
    #[must_use]
    pub const fn expr(&self) -> Option<ExprId> {
        match self {
            Self::TypeMismatch { expr, .. }
            | Self::MalformedBinaryExpression { expr, .. }
            | Self::MalformedUnaryExpression { expr, .. }
            | Self::MalformedArrayConstructor { expr, .. }
            | Self::MalformedImplicitDoLoop { expr, .. }
            | Self::MalformedSubscript { expr, .. }
            | Self::IntegerLiteralOutOfRange { expr, .. }
            | Self::UnresolvedDesignator { expr, .. } => Some(*expr),
            Self::UnsupportedConstruct { expr, .. } => *expr,
        }
    }

    /// How severe this kind of diagnostic is
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::IntegerLiteralOutOfRange { .. } => Severity::Error,
            Self::UnsupportedConstruct { .. } => Severity::Note,
            _ => Severity::Warning,
        }
    }
}

/// How a binary operation is named in messages
const fn describe_binary(op: &BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add | BinaryOp::Sub => "addition",
        BinaryOp::Mul | BinaryOp::Div => "multiplication",
        BinaryOp::Pow => "power",
        BinaryOp::Concat => "concatenation",
        BinaryOp::Rel(RelOp::Eq | RelOp::Ne) => "equality",
        BinaryOp::Rel(_) => "binary relation",
        BinaryOp::And => "logical and",
        BinaryOp::Or => "logical or",
        BinaryOp::Eqv | BinaryOp::Neqv => "logical equivalence",
    }
}

/// How a unary operation is named in messages
const fn describe_unary(op: &UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus | UnaryOp::Minus => "unary addition",
        UnaryOp::Not => "logical not",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_wording() {
        let kind = TypeDiagnosticKind::TypeMismatch {
            expr: ExprId::new(0),
            expected: Type::Integer,
            actual: Type::character(3),
        };
        insta::assert_snapshot!(kind, @"Assigning character value to a variable of integer type");
        assert_eq!(kind.severity(), Severity::Warning);
        assert_eq!(kind.expr(), Some(ExprId::new(0)));
    }

    #[test]
    fn array_mismatch_wording() {
        let kind = TypeDiagnosticKind::TypeMismatch {
            expr: ExprId::new(3),
            expected: Type::array(Type::Integer, 6),
            actual: Type::array(Type::Integer, 5),
        };
        insta::assert_snapshot!(
            kind,
            @"Assigning integer, dimension(5) value to a variable of integer, dimension(6) type"
        );
    }

    #[test]
    fn operator_wording() {
        let binary = TypeDiagnosticKind::MalformedBinaryExpression {
            expr: ExprId::new(2),
            op: BinaryOp::Add,
            left: Type::Real,
            right: Type::Logical,
        };
        insta::assert_snapshot!(
            binary,
            @"Can't infer type of this addition expression where arguments are: real and logical"
        );

        let relation = TypeDiagnosticKind::MalformedBinaryExpression {
            expr: ExprId::new(2),
            op: BinaryOp::Rel(RelOp::Lt),
            left: Type::Complex,
            right: Type::Integer,
        };
        insta::assert_snapshot!(
            relation,
            @"Can't infer type of this binary relation expression where arguments are: complex and integer"
        );

        let unary = TypeDiagnosticKind::MalformedUnaryExpression {
            expr: ExprId::new(1),
            op: UnaryOp::Not,
            operand: Type::Integer,
        };
        insta::assert_snapshot!(
            unary,
            @"Can't infer type of this logical not expression where argument is: integer"
        );
    }

    #[test]
    fn severities() {
        let overflow = TypeDiagnosticKind::IntegerLiteralOutOfRange {
            expr: ExprId::new(0),
            literal: "3000000000".to_string(),
            kind: 4,
        };
        assert_eq!(overflow.severity(), Severity::Error);

        let skipped = TypeDiagnosticKind::UnsupportedConstruct {
            expr: None,
            reason: Unsupported::Rank(2),
        };
        assert_eq!(skipped.severity(), Severity::Note);
        assert_eq!(skipped.expr(), None);
        insta::assert_snapshot!(skipped, @"Type checking skipped: arrays of rank 2 are not checked");
    }
}
