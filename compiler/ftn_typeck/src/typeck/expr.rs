//! for expressions

mod array;
mod binary;
mod designator;
mod literals;
mod unary;

use ftn_ast::expr::{Expr, ExprKind};

pub use self::{binary::combine_arithmetic, literals::literal_integer_value};
use super::ctx::InferCtx;
use crate::ty::Type;

/// Infer the type of an expression node, typing its children first.
///
/// Every node is recorded in the context's type map. `expected` is only
/// consulted by array constructors.
pub fn type_expr(ctx: &InferCtx, expr: &Expr, expected: Option<&Type>) -> Type {
    if let Some(ty) = ctx.type_of(expr.id) {
        return ty;
    }

    let ty = match expr.kind.value() {
        ExprKind::Literal(literal) => literals::type_expr_literal(ctx, expr, literal),
        ExprKind::Unary(op, x) => unary::type_expr_unary(ctx, expr, *op, x),
        ExprKind::Binary(op, lhs, rhs) => binary::type_expr_binary(ctx, expr, *op, lhs, rhs),
        ExprKind::Parenthesized(x) => type_expr(ctx, x, expected),
        ExprKind::Designator(designator) => {
            designator::type_expr_designator(ctx, expr, designator)
        }
        ExprKind::ArrayConstructor(values) => {
            array::type_expr_array_constructor(ctx, expr, values, expected)
        }
    };

    ctx.record(expr, ty)
}
