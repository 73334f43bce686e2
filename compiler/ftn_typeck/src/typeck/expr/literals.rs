//! for literals

use ftn_ast::expr::{Expr, ExprKind, Literal, UnaryOp};

use crate::{
    ty::Type,
    typeck::{ctx::InferCtx, diagnostic_kind::TypeDiagnosticKind},
};

/// Kind used when an integer literal has no `_kind` suffix
const DEFAULT_INTEGER_KIND: u8 = 4;

/// Splits `123_8` into `("123", Some("8"))`
fn split_kind(text: &str) -> (&str, Option<&str>) {
    match text.split_once('_') {
        Some((digits, kind)) => (digits, Some(kind)),
        None => (text, None),
    }
}

/// Largest value representable by `integer(kind=kind)`, for the kinds whose
/// width is known
#[allow(clippy::cast_sign_loss)]
const fn integer_kind_max(kind: u8) -> Option<u128> {
    match kind {
        1 => Some(i8::MAX as u128),
        2 => Some(i16::MAX as u128),
        4 => Some(i32::MAX as u128),
        8 => Some(i64::MAX as u128),
        16 => Some(i128::MAX as u128),
        _ => None,
    }
}

/// Check that an integer literal fits its kind, returning the kind it
/// overflows
fn integer_overflow(text: &str) -> Option<u8> {
    let (digits, kind) = split_kind(text);
    let kind = match kind {
        None => DEFAULT_INTEGER_KIND,
        // a named kind constant cannot be checked here
        Some(kind) => kind.parse().ok()?,
    };
    let max = integer_kind_max(kind)?;
    match digits.parse::<u128>() {
        Ok(value) if value <= max => None,
        _ => Some(kind),
    }
}

/// Infer the type of a literal
pub fn type_expr_literal(ctx: &InferCtx, expr: &Expr, literal: &Literal) -> Type {
    match literal {
        Literal::Integer(text) => {
            if let Some(kind) = integer_overflow(text) {
                ctx.report(
                    expr.span(),
                    TypeDiagnosticKind::IntegerLiteralOutOfRange {
                        expr: expr.id,
                        literal: text.clone(),
                        kind,
                    },
                );
            }
            Type::Integer
        }
        Literal::Real(_) => Type::Real,
        Literal::Character(content) => {
            Type::character(u64::try_from(content.chars().count()).unwrap_or(u64::MAX))
        }
        Literal::Logical(_) => Type::Logical,
        Literal::Complex(..) => Type::Complex,
    }
}

/// Evaluate an integer literal, possibly signed or parenthesized
///
/// Anything else, including a literal too big for an `i64`, is [`None`].
#[must_use]
pub fn literal_integer_value(expr: &Expr) -> Option<i64> {
    match expr.kind.value() {
        ExprKind::Literal(Literal::Integer(text)) => split_kind(text).0.parse().ok(),
        ExprKind::Unary(UnaryOp::Minus, x) => literal_integer_value(x)?.checked_neg(),
        ExprKind::Unary(UnaryOp::Plus, x) | ExprKind::Parenthesized(x) => literal_integer_value(x),
        _ => None,
    }
}
