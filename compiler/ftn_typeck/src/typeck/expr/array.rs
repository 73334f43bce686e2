//! for array constructors and implied-do ranges

use ftn_ast::expr::{AcValue, Expr, ExprId, ImpliedDo};
use ftn_utils::span::{Span, Spanned};

use crate::{
    ty::{is_assignable, unify, Type},
    typeck::{
        ctx::InferCtx,
        diagnostic_kind::{TypeDiagnosticKind, Unsupported},
    },
};

use super::{literal_integer_value, type_expr};

/// What one constructor entry adds to the array
struct Entry {
    /// Where diagnostics about this entry point: the element itself, or the
    /// constructor for an implied-do range
    handle: ExprId,
    /// The entry's source
    span: Span,
    /// Element type contributed
    ty: Type,
    /// Number of elements contributed, if known statically
    count: Option<u64>,
}

/// Infer an implied-do bound or stride, which must be an integer
fn type_loop_control(ctx: &InferCtx, bound: &Expr) -> bool {
    let ty = type_expr(ctx, bound, None);
    if ty == Type::Integer {
        return true;
    }
    if ctx.should_report(&[&ty]) {
        ctx.report(
            bound.span(),
            TypeDiagnosticKind::MalformedImplicitDoLoop { expr: bound.id, ty },
        );
    }
    false
}

/// Report something the constructor rule cannot look into, if asked to
fn unsupported(ctx: &InferCtx, span: Span, expr: ExprId, reason: Unsupported) {
    if ctx.options().report_unsupported_constructs {
        ctx.report(
            span,
            TypeDiagnosticKind::UnsupportedConstruct {
                expr: Some(expr),
                reason,
            },
        );
    }
}

/// Number of trips through `start, end, stride`, or [`None`] for a zero
/// stride
fn trip_count(start: i64, end: i64, stride: i64) -> Option<u64> {
    if stride == 0 {
        return None;
    }
    let (start, end, stride) = (i128::from(start), i128::from(end), i128::from(stride));
    u64::try_from(((end - start + stride) / stride).max(0)).ok()
}

/// Number of elements one trip through `values` produces, typing everything
/// on the way
fn body_count(ctx: &InferCtx, constructor: ExprId, values: &[AcValue]) -> Option<u64> {
    let mut total = Some(0_u64);
    for value in values {
        let count = match value {
            AcValue::Expr(element) => {
                type_expr(ctx, element, None);
                Some(1)
            }
            AcValue::ImpliedDo(implied_do) => type_implied_do(ctx, constructor, implied_do).count,
        };
        total = total.zip(count).and_then(|(total, count)| total.checked_add(count));
    }
    total
}

/// Type an implied-do range. Its elements are always integers; the count is
/// known when all bounds are literals.
fn type_implied_do(ctx: &InferCtx, constructor: ExprId, implied_do: &Spanned<ImpliedDo>) -> Entry {
    let ImpliedDo {
        body,
        variable,
        start,
        end,
        stride,
    } = implied_do.value();

    let per_trip = ctx.with_loop_variable(variable.value(), || body_count(ctx, constructor, body));

    let mut well_formed = type_loop_control(ctx, start);
    well_formed &= type_loop_control(ctx, end);
    if let Some(stride) = stride {
        well_formed &= type_loop_control(ctx, stride);
    }

    let mut entry = Entry {
        handle: constructor,
        span: implied_do.span(),
        ty: Type::Integer,
        count: None,
    };
    if !well_formed {
        entry.ty = Type::unknown();
        return entry;
    }

    let bounds = (
        literal_integer_value(start),
        literal_integer_value(end),
        stride.as_deref().map_or(Some(1), literal_integer_value),
    );
    let (Some(first), Some(last), Some(step)) = bounds else {
        unsupported(ctx, implied_do.span(), constructor, Unsupported::NonLiteralImpliedDoBound);
        return entry;
    };
    let Some(trips) = trip_count(first, last, step) else {
        unsupported(ctx, implied_do.span(), constructor, Unsupported::ZeroStride);
        return entry;
    };

    entry.count = per_trip.and_then(|per_trip| per_trip.checked_mul(trips));
    entry
}

/// Infer the type of an array constructor.
///
/// The element types unify into the base and the sizes add up. With an
/// `expected` array type every element is checked against its base instead,
/// and an empty constructor is an empty array of that base.
pub fn type_expr_array_constructor(
    ctx: &InferCtx,
    expr: &Expr,
    values: &[AcValue],
    expected: Option<&Type>,
) -> Type {
    let entries: Vec<Entry> = values
        .iter()
        .map(|value| match value {
            AcValue::Expr(element) => Entry {
                handle: element.id,
                span: element.span(),
                ty: type_expr(ctx, element, None),
                count: Some(1),
            },
            AcValue::ImpliedDo(implied_do) => type_implied_do(ctx, expr.id, implied_do),
        })
        .collect();

    let expected_array = expected.and_then(Type::as_array);

    let mut base: Option<Type> = None;
    let mut reported = false;
    for entry in &entries {
        let unified = match &base {
            None => entry.ty.clone(),
            Some(so_far) => {
                let unified = unify(so_far, &entry.ty);
                if unified.is_unknown()
                    && !reported
                    && expected_array.is_none()
                    && ctx.should_report(&[so_far, &entry.ty])
                {
                    ctx.report(
                        entry.span,
                        TypeDiagnosticKind::MalformedArrayConstructor {
                            expr: entry.handle,
                            expected_base: so_far.clone(),
                            element: entry.ty.clone(),
                        },
                    );
                    reported = true;
                }
                unified
            }
        };
        base = Some(unified);
    }

    let size = entries
        .iter()
        .map(|entry| entry.count)
        .try_fold(0_u64, |total, count| total.checked_add(count?));
    let built = match (base, size) {
        // `[]` takes its element type from the variable it initializes
        (None, _) => expected_array.map_or_else(
            || Type::unknown_because("empty array constructor"),
            |array| Type::array(array.base().clone(), 0),
        ),
        (Some(_), None) => Type::unknown_because("array constructor size is not known"),
        (Some(base), Some(size)) => Type::array(base, size),
    };

    if let Some(expected) = expected {
        check_against_expected(ctx, expr, &entries, expected, &built);
    }
    built
}

/// Validate a constructor against the type of the variable it initializes
fn check_against_expected(
    ctx: &InferCtx,
    expr: &Expr,
    entries: &[Entry],
    expected: &Type,
    built: &Type,
) {
    if is_assignable(expected, built) {
        return;
    }

    if let Some(array) = expected.as_array() {
        let mut reported = false;
        for entry in entries {
            if !is_assignable(array.base(), &entry.ty) && ctx.should_report(&[&entry.ty]) {
                ctx.report(
                    entry.span,
                    TypeDiagnosticKind::MalformedArrayConstructor {
                        expr: entry.handle,
                        expected_base: array.base().clone(),
                        element: entry.ty.clone(),
                    },
                );
                reported = true;
            }
        }
        if reported {
            return;
        }
    }

    if ctx.should_report(&[built]) {
        ctx.report(
            expr.span(),
            TypeDiagnosticKind::TypeMismatch {
                expr: expr.id,
                expected: expected.clone(),
                actual: built.clone(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trips() {
        assert_eq!(trip_count(1, 4, 1), Some(4));
        assert_eq!(trip_count(1, 10, 3), Some(4));
        assert_eq!(trip_count(10, 1, -2), Some(5));
        assert_eq!(trip_count(5, 1, 1), Some(0));
        assert_eq!(trip_count(1, 1, 1), Some(1));
        assert_eq!(trip_count(1, 4, 0), None);
    }
}
