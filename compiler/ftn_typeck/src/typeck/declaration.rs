//! for declarations and assignments

use ftn_ast::{
    expr::{Expr, ExprKind},
    stmt::{ArraySpec, IntrinsicTypeSpec, TypeDeclarationStmt, TypeKeyword},
};
use ftn_utils::span::Spanned;
use log::debug;

use super::{
    ctx::InferCtx,
    diagnostic_kind::{TypeDiagnosticKind, Unsupported},
    expr::{literal_integer_value, type_expr},
    options::InferenceOptions,
    resolve::Declaration,
};
use crate::ty::{is_assignable, Type};

/// The scalar type named by an intrinsic type spec
fn scalar_type(spec: &IntrinsicTypeSpec, options: &InferenceOptions) -> Type {
    match spec.keyword.value() {
        TypeKeyword::Integer => Type::Integer,
        TypeKeyword::Real | TypeKeyword::DoublePrecision => Type::Real,
        TypeKeyword::Complex => Type::Complex,
        TypeKeyword::Logical => Type::Logical,
        TypeKeyword::Character => match &spec.length {
            None => Type::character(options.default_character_length),
            // a negative length declares an empty string
            Some(length) => Type::Character(
                literal_integer_value(length).map(|length| length.max(0).unsigned_abs()),
            ),
        },
    }
}

/// Number of elements in a one-dimensional shape with literal bounds
fn shape_size(shape: &ArraySpec) -> Result<u64, Unsupported> {
    let [dimension] = shape.0.as_slice() else {
        return Err(Unsupported::Rank(shape.rank()));
    };
    let Some(upper) = &dimension.upper else {
        return Err(Unsupported::DeferredShape);
    };
    let lower = match &dimension.lower {
        Some(lower) => literal_integer_value(lower),
        None => Some(1),
    };
    let (Some(lower), Some(upper)) = (lower, literal_integer_value(upper)) else {
        return Err(Unsupported::NonLiteralBound);
    };
    let size = (i128::from(upper) - i128::from(lower) + 1).max(0);
    u64::try_from(size).map_err(|_| Unsupported::NonLiteralBound)
}

/// The type a declared entity was given
///
/// # Errors
/// Returns what could not be looked at if the declared shape is not a single
/// dimension with literal bounds.
pub fn declared_type(
    declaration: Declaration<'_>,
    options: &InferenceOptions,
) -> Result<Type, Unsupported> {
    let scalar = scalar_type(declaration.type_spec(), options);
    match declaration.shape() {
        None => Ok(scalar),
        Some(shape) => Ok(Type::array(scalar, shape_size(shape)?)),
    }
}

/// Infer `value` as stored into a variable of type `expected` and report a
/// mismatch.
///
/// Array constructors check themselves against `expected`, so they are not
/// checked again here.
fn check_value(ctx: &InferCtx, value: &Expr, expected: &Type) {
    let expected = (!expected.is_unknown()).then_some(expected);
    let inferred = type_expr(ctx, value, expected);

    let Some(expected) = expected else {
        return;
    };
    if value.is_array_constructor() || !ctx.should_report(&[&inferred]) {
        return;
    }
    if !is_assignable(expected, &inferred) {
        ctx.report(
            value.span(),
            TypeDiagnosticKind::TypeMismatch {
                expr: value.id,
                expected: expected.clone(),
                actual: inferred,
            },
        );
    }
}

/// Type the `kind=` and `len=` selectors of a type spec
fn type_selectors(ctx: &InferCtx, spec: &IntrinsicTypeSpec) {
    for selector in spec.kind.iter().chain(&spec.length) {
        type_expr(ctx, selector, None);
    }
}

/// Type every bound of a shape
fn type_bounds(ctx: &InferCtx, shape: &ArraySpec) {
    for dimension in &shape.0 {
        for bound in dimension.lower.iter().chain(&dimension.upper) {
            type_expr(ctx, bound, None);
        }
    }
}

/// Check every initializer of a type declaration statement
///
/// Selector and bound expressions are typed too. Declared types only use
/// their literal values.
pub fn check_declaration(ctx: &InferCtx, statement: &Spanned<TypeDeclarationStmt>) {
    let stmt = statement.value();
    type_selectors(ctx, &stmt.type_spec);
    if let Some(shape) = stmt.dimension() {
        type_bounds(ctx, shape);
    }
    for entity in &stmt.entities {
        if let Some(shape) = &entity.array_spec {
            type_bounds(ctx, shape);
        }
        let declaration = Declaration {
            statement: stmt,
            entity,
        };
        let expected = match declared_type(declaration, ctx.options()) {
            Ok(ty) => ty,
            Err(reason) => {
                if ctx.options().report_unsupported_constructs {
                    ctx.report(
                        entity.name.span(),
                        TypeDiagnosticKind::UnsupportedConstruct { expr: None, reason },
                    );
                }
                Type::unknown_because(reason.to_string())
            }
        };
        debug!("declaration of `{}` : {expected}", entity.name);

        if let Some(init) = &entity.init {
            check_value(ctx, init, &expected);
        }
    }
}

/// Check `target = value`
pub fn check_assignment(ctx: &InferCtx, target: &Expr, value: &Expr) {
    let expected = type_expr(ctx, target, None);
    debug!("assignment to `{target}` : {expected}");

    if matches!(target.kind.value(), ExprKind::Designator(_)) {
        check_value(ctx, value, &expected);
    } else {
        type_expr(ctx, value, None);
    }
}

#[cfg(test)]
mod tests {
    use ftn_ast::build::AstBuilder;

    use super::*;

    #[test]
    fn scalar_types_follow_the_keyword() {
        let mut b = AstBuilder::new();
        let options = InferenceOptions::default();
        assert_eq!(
            scalar_type(&b.type_spec(TypeKeyword::DoublePrecision), &options),
            Type::Real
        );
        assert_eq!(
            scalar_type(&b.character(None), &options),
            Type::character(1)
        );
        let len = b.int("17");
        assert_eq!(
            scalar_type(&b.character(Some(len)), &options),
            Type::character(17)
        );
        let len = b.var("n");
        assert_eq!(
            scalar_type(&b.character(Some(len)), &options),
            Type::Character(None)
        );
        let options = options.with_default_character_length(4);
        assert_eq!(
            scalar_type(&b.character(None), &options),
            Type::character(4)
        );
    }

    #[test]
    fn shape_sizes() {
        let mut b = AstBuilder::new();
        let six = b.int("6");
        assert_eq!(shape_size(&ArraySpec(vec![AstBuilder::extent(six)])), Ok(6));

        let lower = b.int("0");
        let upper = b.int("9");
        assert_eq!(
            shape_size(&ArraySpec(vec![AstBuilder::bounds(lower, upper)])),
            Ok(10)
        );

        let one = b.int("1");
        let lower = b.neg(one);
        let upper = b.int("1");
        assert_eq!(
            shape_size(&ArraySpec(vec![AstBuilder::bounds(lower, upper)])),
            Ok(3)
        );

        let lower = b.int("5");
        let upper = b.int("1");
        assert_eq!(
            shape_size(&ArraySpec(vec![AstBuilder::bounds(lower, upper)])),
            Ok(0)
        );

        let n = b.var("n");
        assert_eq!(
            shape_size(&ArraySpec(vec![AstBuilder::extent(n)])),
            Err(Unsupported::NonLiteralBound)
        );
        assert_eq!(
            shape_size(&ArraySpec(vec![AstBuilder::deferred()])),
            Err(Unsupported::DeferredShape)
        );
        let two = b.int("2");
        let three = b.int("3");
        assert_eq!(
            shape_size(&ArraySpec(vec![
                AstBuilder::extent(two),
                AstBuilder::extent(three)
            ])),
            Err(Unsupported::Rank(2))
        );
    }
}
