//! for binary expressions

use ftn_ast::expr::{BinaryOp, Expr};

use crate::{
    ty::Type,
    typeck::{ctx::InferCtx, diagnostic_kind::TypeDiagnosticKind},
};

use super::type_expr;

/// The arithmetic combination rule shared by `+ - * /` and comparisons.
///
/// Numeric scalars widen to `real`, two `complex` stay `complex`, and arrays
/// combine element-wise with scalars or with arrays of the same size.
/// Anything else is [`Type::Unknown`].
#[must_use]
pub fn combine_arithmetic(lhs: &Type, rhs: &Type) -> Type {
    match (lhs, rhs) {
        (Type::Integer, Type::Integer) => Type::Integer,
        (Type::Integer | Type::Real, Type::Integer | Type::Real) => Type::Real,
        (Type::Complex, Type::Complex) => Type::Complex,
        (Type::Array(lhs), Type::Array(rhs)) => {
            if lhs.size() == rhs.size() {
                Type::array(combine_arithmetic(lhs.base(), rhs.base()), lhs.size())
            } else {
                Type::unknown()
            }
        }
        (Type::Array(array), scalar) | (scalar, Type::Array(array)) => {
            Type::array(combine_arithmetic(array.base(), scalar), array.size())
        }
        _ => Type::unknown(),
    }
}

/// `x ** y`: a numeric base raised to an integer power
fn power(lhs: &Type, rhs: &Type) -> Type {
    if lhs.is_numeric() && *rhs == Type::Integer {
        lhs.clone()
    } else {
        Type::unknown()
    }
}

/// `x // y`: known lengths add up
fn concatenation(lhs: &Type, rhs: &Type) -> Type {
    match (lhs, rhs) {
        (Type::Character(lhs), Type::Character(rhs)) => {
            Type::Character(lhs.zip(*rhs).and_then(|(lhs, rhs)| lhs.checked_add(rhs)))
        }
        _ => Type::unknown(),
    }
}

/// `.and.`, `.or.`, `.eqv.`, `.neqv.`
fn logical(lhs: &Type, rhs: &Type) -> Type {
    if *lhs == Type::Logical && *rhs == Type::Logical {
        Type::Logical
    } else {
        Type::unknown()
    }
}

/// Whether two operands may be compared
fn comparable(lhs: &Type, rhs: &Type) -> bool {
    matches!((lhs, rhs), (Type::Character(_), Type::Character(_)))
        || !combine_arithmetic(lhs, rhs).is_unknown()
}

/// Infer the type of a binary expression
pub fn type_expr_binary(
    ctx: &InferCtx,
    expr: &Expr,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> Type {
    let left = type_expr(ctx, lhs, None);
    let right = type_expr(ctx, rhs, None);

    let ty = match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            combine_arithmetic(&left, &right)
        }
        BinaryOp::Pow => power(&left, &right),
        BinaryOp::Concat => concatenation(&left, &right),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Eqv | BinaryOp::Neqv => logical(&left, &right),
        BinaryOp::Rel(_) => {
            // a comparison is logical even when its operands do not fit
            if !comparable(&left, &right) && ctx.should_report(&[&left, &right]) {
                ctx.report(expr.span(), malformed(expr, op, left, right));
            }
            return Type::Logical;
        }
    };

    if !ty.is_unknown() || !ctx.should_report(&[&left, &right]) {
        return ty;
    }
    ctx.poison(expr.span(), malformed(expr, op, left, right))
}

/// Build the diagnostic for an operation no rule applies to
const fn malformed(expr: &Expr, op: BinaryOp, left: Type, right: Type) -> TypeDiagnosticKind {
    TypeDiagnosticKind::MalformedBinaryExpression {
        expr: expr.id,
        op,
        left,
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_combination() {
        assert_eq!(combine_arithmetic(&Type::Integer, &Type::Integer), Type::Integer);
        assert_eq!(combine_arithmetic(&Type::Integer, &Type::Real), Type::Real);
        assert_eq!(combine_arithmetic(&Type::Real, &Type::Integer), Type::Real);
        assert_eq!(combine_arithmetic(&Type::Real, &Type::Real), Type::Real);
        assert_eq!(combine_arithmetic(&Type::Complex, &Type::Complex), Type::Complex);
        for odd in [Type::Logical, Type::character(2)] {
            for other in [Type::Integer, Type::Real, Type::Complex, Type::Logical] {
                assert!(combine_arithmetic(&odd, &other).is_unknown());
                assert!(combine_arithmetic(&other, &odd).is_unknown());
            }
        }
        assert!(combine_arithmetic(&Type::Complex, &Type::Real).is_unknown());
    }

    #[test]
    fn arrays_combine_element_wise() {
        let ints = Type::array(Type::Integer, 3);
        assert_eq!(
            combine_arithmetic(&ints, &Type::Real),
            Type::array(Type::Real, 3)
        );
        assert_eq!(
            combine_arithmetic(&Type::Integer, &ints),
            Type::array(Type::Integer, 3)
        );
        assert_eq!(
            combine_arithmetic(&ints, &Type::array(Type::Real, 3)),
            Type::array(Type::Real, 3)
        );
        assert!(combine_arithmetic(&ints, &Type::array(Type::Integer, 4)).is_unknown());
        assert!(combine_arithmetic(&ints, &Type::Logical).is_unknown());
    }

    #[test]
    fn power_needs_integer_exponent() {
        assert_eq!(power(&Type::Real, &Type::Integer), Type::Real);
        assert_eq!(power(&Type::Integer, &Type::Integer), Type::Integer);
        assert!(power(&Type::Integer, &Type::Real).is_unknown());
        assert!(power(&Type::Complex, &Type::Integer).is_unknown());
    }

    #[test]
    fn concatenation_adds_lengths() {
        assert_eq!(
            concatenation(&Type::character(2), &Type::character(3)),
            Type::character(5)
        );
        assert_eq!(
            concatenation(&Type::Character(None), &Type::character(3)),
            Type::Character(None)
        );
        assert!(concatenation(&Type::character(2), &Type::Integer).is_unknown());
    }

    #[test]
    fn comparisons() {
        assert!(comparable(&Type::Integer, &Type::Real));
        assert!(comparable(&Type::character(1), &Type::character(9)));
        assert!(!comparable(&Type::Logical, &Type::Logical));
        assert!(!comparable(&Type::Integer, &Type::character(1)));
    }
}
