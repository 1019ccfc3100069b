use crate::token::Token;
use crate::types::Literal;

pub trait ExpressionVisitor {
    type Result;

    fn visit_expr(&mut self, expression: &Expression) -> Self::Result;
}

/// The closed set of expression nodes.
///
/// Each node exclusively owns its children; a tree is built bottom-up by the
/// parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    Grouping {
        expr: Box<Expression>,
    },
    Literal {
        literal: Literal,
    },
    Unary {
        operator: Token,
        expr: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(left: Box<Expression>, operator: Token, right: Box<Expression>) -> Self {
        Expression::Binary {
            left,
            operator,
            right,
        }
    }

    pub fn grouping(expr: Box<Expression>) -> Self {
        Expression::Grouping { expr }
    }

    pub fn literal(literal: Literal) -> Self {
        Expression::Literal { literal }
    }

    pub fn unary(operator: Token, expr: Box<Expression>) -> Self {
        Expression::Unary { operator, expr }
    }

    pub fn accept<V: ExpressionVisitor>(&self, visitor: &mut V) -> V::Result {
        visitor.visit_expr(self)
    }
}
