//! Type inference and assignment checking over program units
//!
//! The main entry point is [`infer_types_in`]. It walks the declarations of a
//! unit and then its statements, typing every expression bottom-up exactly
//! once, and checks each initializer and assignment against the declared
//! type of its variable. Problems are never fatal: anything that cannot be
//! typed becomes [`Type::Unknown`](crate::ty::Type::Unknown) and a
//! diagnostic is recorded.

mod ctx;
mod declaration;
mod diagnostic_kind;
mod diagnostics;
mod expr;
mod options;
mod resolve;
mod results;

use ftn_ast::stmt::{ProgramUnit, Stmt};
use log::debug;

pub use self::{
    ctx::InferCtx,
    declaration::declared_type,
    diagnostic_kind::{TypeDiagnostic, TypeDiagnosticKind, Unsupported},
    diagnostics::DiagnosticCollector,
    expr::{combine_arithmetic, literal_integer_value, type_expr},
    options::InferenceOptions,
    resolve::{Declaration, Resolver, ScopeResolver},
    results::{ExprTypeMap, InferenceResult},
};

/// Infer and check every expression in `unit`.
///
/// Variable references are looked up through `resolver`. The result holds
/// the type of every visited expression and the diagnostics in traversal
/// order. Running this twice on the same inputs gives the same result.
pub fn infer_types_in<'ast>(
    unit: &'ast ProgramUnit,
    resolver: &dyn Resolver<'ast>,
    options: &InferenceOptions,
) -> InferenceResult {
    debug!(
        "inferring types in {:?} `{}` ({} declarations, {} statements)",
        unit.kind,
        unit.name,
        unit.declarations.len(),
        unit.statements.len()
    );

    let ctx = InferCtx::new(resolver, options);
    for statement in &unit.declarations {
        declaration::check_declaration(&ctx, statement);
    }
    for statement in &unit.statements {
        match statement.value() {
            Stmt::Assignment { target, value } => {
                declaration::check_assignment(&ctx, target, value);
            }
            Stmt::Opaque => {}
        }
    }

    let result = ctx.finish();
    debug!(
        "typed {} expressions in `{}`, {} diagnostics",
        result.types.len(),
        unit.name,
        result.diagnostics.len()
    );
    result
}

/// [`infer_types_in`] with the unit's own declarations as the only scope and
/// default options
#[must_use]
pub fn infer_unit(unit: &ProgramUnit) -> InferenceResult {
    let resolver = ScopeResolver::from_unit(unit);
    infer_types_in(unit, &resolver, &InferenceOptions::default())
}

#[cfg(test)]
mod tests {
    use ftn_ast::{build::AstBuilder, expr::Designator, stmt::TypeKeyword};

    use super::*;
    use crate::ty::Type;

    #[test]
    fn closures_can_resolve_across_units() {
        // the declaration lives in another unit, as if use-associated
        let mut b = AstBuilder::new();
        let spec = b.type_spec(TypeKeyword::Logical);
        let entity = b.entity("flag", None);
        let declaration = b.declaration(spec, vec![], vec![entity]);
        let module = b.program("m", vec![declaration], vec![]);

        let target = b.var("FLAG");
        let value = b.int("0");
        let unit = b.program("p", vec![], vec![AstBuilder::assignment(target, value)]);

        let elsewhere = ScopeResolver::from_unit(&module);
        let resolver = |designator: &Designator| elsewhere.resolve(designator);
        let result = infer_types_in(&unit, &resolver, &InferenceOptions::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert!(matches!(
            result.diagnostics[0].kind(),
            TypeDiagnosticKind::TypeMismatch {
                expected: Type::Logical,
                actual: Type::Integer,
                ..
            }
        ));
    }

    #[test]
    fn single_expressions_are_typed_once() {
        let mut b = AstBuilder::new();
        let one = b.int("1");
        let two = b.real("2.0");
        let sum = b.add(one, two);
        let negated = b.neg(sum);

        let resolver = ScopeResolver::new();
        let options = InferenceOptions::default();
        let ctx = InferCtx::new(&resolver, &options);
        assert_eq!(ctx.infer_expr(&negated, None), Type::Real);
        assert_eq!(ctx.infer_expr(&negated, None), Type::Real);

        let result = ctx.finish();
        assert_eq!(result.types.len(), 4);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn unary_operators_check_their_operand() {
        let mut b = AstBuilder::new();
        let s = b.string("x");
        let negated = b.neg(s);
        let one = b.int("1");
        let not = b.not(one);

        let resolver = ScopeResolver::new();
        let options = InferenceOptions::default();
        let ctx = InferCtx::new(&resolver, &options);
        assert!(ctx.infer_expr(&negated, None).is_unknown());
        assert!(ctx.infer_expr(&not, None).is_unknown());

        let messages: Vec<String> = ctx
            .finish()
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            messages,
            vec![
                "warning: Can't infer type of this unary addition expression where argument is: \
                 character",
                "warning: Can't infer type of this logical not expression where argument is: \
                 integer",
            ]
        );
    }
}
