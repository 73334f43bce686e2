//! for unary expressions

use ftn_ast::expr::{Expr, UnaryOp};

use crate::{
    ty::Type,
    typeck::{ctx::InferCtx, diagnostic_kind::TypeDiagnosticKind},
};

use super::type_expr;

/// Infer the type of a unary expression
pub fn type_expr_unary(ctx: &InferCtx, expr: &Expr, op: UnaryOp, x: &Expr) -> Type {
    let operand = type_expr(ctx, x, None);

    let valid = match op {
        UnaryOp::Plus | UnaryOp::Minus => operand.is_numeric(),
        UnaryOp::Not => operand == Type::Logical,
    };
    if valid {
        return operand;
    }

    if !ctx.should_report(&[&operand]) {
        return Type::unknown();
    }
    ctx.poison(
        expr.span(),
        TypeDiagnosticKind::MalformedUnaryExpression {
            expr: expr.id,
            op,
            operand,
        },
    )
}
