//! for variable references

use ftn_ast::expr::{Designator, Expr};

use crate::{
    ty::Type,
    typeck::{ctx::InferCtx, declaration::declared_type, diagnostic_kind::TypeDiagnosticKind},
};

use super::type_expr;

/// Infer the type of a variable reference.
///
/// A subscripted reference to an array selects one element, so its type is
/// the array's base. References the resolver cannot find are unknown.
pub fn type_expr_designator(ctx: &InferCtx, expr: &Expr, designator: &Designator) -> Type {
    for subscript in designator.subscripts.iter().flatten() {
        let ty = type_expr(ctx, subscript, None);
        if ty != Type::Integer && ctx.should_report(&[&ty]) {
            ctx.report(
                subscript.span(),
                TypeDiagnosticKind::MalformedSubscript {
                    expr: subscript.id,
                    ty,
                },
            );
        }
    }

    let name = designator.name.value();
    if ctx.is_loop_variable(name) {
        return Type::Integer;
    }

    let Some(declaration) = ctx.resolve(designator) else {
        if ctx.options().report_unresolved_designators {
            ctx.report(
                designator.name.span(),
                TypeDiagnosticKind::UnresolvedDesignator {
                    expr: expr.id,
                    name: name.clone(),
                },
            );
        }
        return Type::unknown_because(format!("unresolved variable `{name}`"));
    };

    match declared_type(declaration, ctx.options()) {
        Ok(Type::Array(array)) if designator.is_subscripted() => array.into_base(),
        Ok(ty) => ty,
        Err(reason) => Type::unknown_because(reason.to_string()),
    }
}
