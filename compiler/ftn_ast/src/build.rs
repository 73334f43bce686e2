//! Assembling trees without a parser
//!
//! [`AstBuilder`] hands out fresh [`ExprId`]s and synthetic, monotonically
//! increasing spans. Leaves advance an internal cursor by the width of their
//! source text; composite nodes cover their children. Host glue can use it to
//! lower its own syntax tree, and tests use it to write programs by hand.

use ftn_utils::span::{Span, Spannable, Spanned};

use crate::{
    expr::{AcValue, BinaryOp, Designator, Expr, ExprId, ExprKind, ImpliedDo, Literal, RelOp, UnaryOp},
    stmt::{
        ArraySpec, AttrSpec, EntityDecl, IntrinsicTypeSpec, ProgramUnit, ProgramUnitKind,
        ShapeSpec, Stmt, TypeDeclarationStmt, TypeKeyword,
    },
};

impl From<Expr> for AcValue {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

/// Builds tree nodes with fresh identities
#[derive(Debug, Default)]
pub struct AstBuilder {
    /// The next [`ExprId`] to hand out
    next_id: u32,
    /// Where the next leaf starts
    cursor: usize,
}

impl AstBuilder {
    /// Create a builder starting at id 0, offset 0
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            cursor: 0,
        }
    }

    /// Reserve a fresh [`ExprId`]
    pub fn fresh_id(&mut self) -> ExprId {
        let id = ExprId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Reserve a span of `width` bytes (plus one separator)
    fn advance(&mut self, width: usize) -> Span {
        let span = Span::from_positions(self.cursor, self.cursor + width);
        self.cursor += width + 1;
        span
    }

    /// A spanned name
    pub fn name(&mut self, name: &str) -> Spanned<String> {
        name.to_string().in_span(self.advance(name.len()))
    }

    /// Wrap a kind into a node with a fresh id
    fn node(&mut self, kind: ExprKind, span: Span) -> Expr {
        Expr {
            id: self.fresh_id(),
            kind: kind.in_span(span),
        }
    }

    /// A literal leaf
    pub fn literal(&mut self, literal: Literal) -> Expr {
        let span = self.advance(literal.to_string().len());
        self.node(ExprKind::Literal(literal), span)
    }

    /// An integer literal, kind suffix allowed (`"42_8"`)
    pub fn int(&mut self, text: &str) -> Expr {
        self.literal(Literal::Integer(text.to_string()))
    }

    /// A real literal
    pub fn real(&mut self, text: &str) -> Expr {
        self.literal(Literal::Real(text.to_string()))
    }

    /// A character literal with the given content
    pub fn string(&mut self, content: &str) -> Expr {
        self.literal(Literal::Character(content.to_string()))
    }

    /// A logical literal
    pub fn logical(&mut self, value: bool) -> Expr {
        self.literal(Literal::Logical(value))
    }

    /// A complex literal `(re, im)`
    pub fn complex(&mut self, re: &str, im: &str) -> Expr {
        self.literal(Literal::Complex(re.to_string(), im.to_string()))
    }

    /// `op x`
    pub fn unary(&mut self, op: UnaryOp, x: Expr) -> Expr {
        let span = x.span();
        self.node(ExprKind::Unary(op, Box::new(x)), span)
    }

    /// `+x`
    pub fn plus(&mut self, x: Expr) -> Expr {
        self.unary(UnaryOp::Plus, x)
    }

    /// `-x`
    pub fn neg(&mut self, x: Expr) -> Expr {
        self.unary(UnaryOp::Minus, x)
    }

    /// `.not. x`
    pub fn not(&mut self, x: Expr) -> Expr {
        self.unary(UnaryOp::Not, x)
    }

    /// `lhs op rhs`
    pub fn binary(&mut self, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = Span::cover(lhs.span(), rhs.span());
        self.node(ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)), span)
    }

    /// `lhs + rhs`
    pub fn add(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    /// `lhs - rhs`
    pub fn sub(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Sub, lhs, rhs)
    }

    /// `lhs * rhs`
    pub fn mul(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Mul, lhs, rhs)
    }

    /// `lhs / rhs`
    pub fn div(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Div, lhs, rhs)
    }

    /// `lhs ** rhs`
    pub fn pow(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Pow, lhs, rhs)
    }

    /// `lhs // rhs`
    pub fn concat(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Concat, lhs, rhs)
    }

    /// `lhs op rhs` for a relational `op`
    pub fn rel(&mut self, op: RelOp, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Rel(op), lhs, rhs)
    }

    /// `lhs .and. rhs`
    pub fn and(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::And, lhs, rhs)
    }

    /// `lhs .or. rhs`
    pub fn or(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Or, lhs, rhs)
    }

    /// `(x)`
    pub fn paren(&mut self, x: Expr) -> Expr {
        let span = x.span();
        self.node(ExprKind::Parenthesized(Box::new(x)), span)
    }

    /// A whole-variable reference
    pub fn var(&mut self, name: &str) -> Expr {
        let name = self.name(name);
        let span = name.span();
        self.node(
            ExprKind::Designator(Designator {
                name,
                subscripts: None,
            }),
            span,
        )
    }

    /// A subscripted reference `name(subscripts...)`
    pub fn element(&mut self, name: &str, subscripts: Vec<Expr>) -> Expr {
        let name = self.name(name);
        let span = subscripts
            .iter()
            .fold(name.span(), |span, subscript| Span::cover(span, subscript.span()));
        self.node(
            ExprKind::Designator(Designator {
                name,
                subscripts: Some(subscripts),
            }),
            span,
        )
    }

    /// `[values...]`
    pub fn array(&mut self, values: Vec<AcValue>) -> Expr {
        let span = values.iter().map(AcValue::span).reduce(Span::cover);
        let span = span.unwrap_or_else(|| self.advance(2));
        self.node(ExprKind::ArrayConstructor(values), span)
    }

    /// `(body..., variable = start, end)`
    pub fn implied_do(
        &mut self,
        body: Vec<AcValue>,
        variable: &str,
        start: Expr,
        end: Expr,
    ) -> AcValue {
        self.implied_do_with_stride(body, variable, start, end, None)
    }

    /// `(body..., variable = start, end, stride)`
    pub fn implied_do_with_stride(
        &mut self,
        body: Vec<AcValue>,
        variable: &str,
        start: Expr,
        end: Expr,
        stride: Option<Expr>,
    ) -> AcValue {
        let variable = self.name(variable);
        let mut span = body
            .iter()
            .map(AcValue::span)
            .fold(Span::cover(variable.span(), end.span()), Span::cover);
        if let Some(stride) = &stride {
            span = Span::cover(span, stride.span());
        }
        AcValue::ImpliedDo(
            ImpliedDo {
                body,
                variable,
                start: Box::new(start),
                end: Box::new(end),
                stride: stride.map(Box::new),
            }
            .in_span(span),
        )
    }

    /// A type spec with no selectors
    pub fn type_spec(&mut self, keyword: TypeKeyword) -> IntrinsicTypeSpec {
        let span = self.advance(keyword.to_string().len());
        IntrinsicTypeSpec {
            keyword: keyword.in_span(span),
            kind: None,
            length: None,
        }
    }

    /// `character(len=length)`, or plain `character` for `None`
    pub fn character(&mut self, length: Option<Expr>) -> IntrinsicTypeSpec {
        IntrinsicTypeSpec {
            length,
            ..self.type_spec(TypeKeyword::Character)
        }
    }

    /// A scalar entity with an optional initializer
    pub fn entity(&mut self, name: &str, init: Option<Expr>) -> EntityDecl {
        EntityDecl {
            name: self.name(name),
            array_spec: None,
            init,
        }
    }

    /// An entity with its own shape, `name(shape) = init`
    pub fn array_entity(
        &mut self,
        name: &str,
        shape: Vec<ShapeSpec>,
        init: Option<Expr>,
    ) -> EntityDecl {
        EntityDecl {
            array_spec: Some(ArraySpec(shape)),
            ..self.entity(name, init)
        }
    }

    /// `dimension(shape...)`
    #[must_use]
    pub const fn dimension(shape: Vec<ShapeSpec>) -> AttrSpec {
        AttrSpec::Dimension(ArraySpec(shape))
    }

    /// An extent: `upper`
    #[must_use]
    pub const fn extent(upper: Expr) -> ShapeSpec {
        ShapeSpec {
            lower: None,
            upper: Some(upper),
        }
    }

    /// A bounds pair: `lower:upper`
    #[must_use]
    pub const fn bounds(lower: Expr, upper: Expr) -> ShapeSpec {
        ShapeSpec {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    /// A deferred shape: `:`
    #[must_use]
    pub const fn deferred() -> ShapeSpec {
        ShapeSpec {
            lower: None,
            upper: None,
        }
    }

    /// A type declaration statement
    pub fn declaration(
        &mut self,
        type_spec: IntrinsicTypeSpec,
        attrs: Vec<AttrSpec>,
        entities: Vec<EntityDecl>,
    ) -> Spanned<TypeDeclarationStmt> {
        let end = entities
            .iter()
            .map(|entity| entity.init.as_ref().map_or(entity.name.end(), Expr::end))
            .max()
            .unwrap_or_else(|| type_spec.keyword.end());
        let span = Span::from_positions(type_spec.keyword.start(), end.max(type_spec.keyword.end()));
        TypeDeclarationStmt {
            type_spec,
            attrs,
            entities,
        }
        .in_span(span)
    }

    /// `target = value`
    #[must_use]
    pub fn assignment(target: Expr, value: Expr) -> Spanned<Stmt> {
        let span = Span::cover(target.span(), value.span());
        Stmt::Assignment { target, value }.in_span(span)
    }

    /// A statement the checker ignores
    pub fn opaque(&mut self) -> Spanned<Stmt> {
        let span = self.advance(1);
        Stmt::Opaque.in_span(span)
    }

    /// `program name ... end program`
    pub fn program(
        &mut self,
        name: &str,
        declarations: Vec<Spanned<TypeDeclarationStmt>>,
        statements: Vec<Spanned<Stmt>>,
    ) -> ProgramUnit {
        ProgramUnit {
            kind: ProgramUnitKind::MainProgram,
            name: self.name(name),
            declarations,
            statements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_fresh_and_post_order() {
        let mut b = AstBuilder::new();
        let one = b.int("1");
        let two = b.int("2");
        let sum = b.add(one.clone(), two.clone());
        assert_eq!(one.id, ExprId::new(0));
        assert_eq!(two.id, ExprId::new(1));
        assert_eq!(sum.id, ExprId::new(2));
    }

    #[test]
    fn composite_spans_cover_children() {
        let mut b = AstBuilder::new();
        let lhs = b.int("12");
        let rhs = b.real("3.5");
        let sum = b.add(lhs.clone(), rhs.clone());
        assert!(sum.span().contains(lhs.span()));
        assert!(sum.span().contains(rhs.span()));
        assert!(lhs.span().end() < rhs.span().start());
    }

    #[test]
    fn entity_shape_overrides_dimension_attribute() {
        let mut b = AstBuilder::new();
        let spec = b.type_spec(TypeKeyword::Integer);
        let six = b.int("6");
        let two = b.int("2");
        let plain = b.entity("a", None);
        let shaped = b.array_entity("b", vec![AstBuilder::extent(two)], None);
        let decl = b.declaration(
            spec,
            vec![AttrSpec::Parameter, AstBuilder::dimension(vec![AstBuilder::extent(six)])],
            vec![plain, shaped],
        );
        let decl = decl.value();
        assert_eq!(decl.shape_of(&decl.entities[0]).map(ArraySpec::rank), Some(1));
        assert!(std::ptr::eq(
            decl.shape_of(&decl.entities[1]).expect("entity has a shape"),
            decl.entities[1].array_spec.as_ref().expect("entity has a shape"),
        ));
    }

    #[test]
    fn empty_constructor_still_gets_a_span() {
        let mut b = AstBuilder::new();
        let ctor = b.array(vec![]);
        assert_eq!(ctor.span().len(), 2);
    }
}
