use crate::{
    ast::{Expression, ExpressionVisitor},
    types::Literal,
};

/// Renders a tree as fully parenthesized prefix notation, e.g.
/// `(* (- 123) (group 45.67))`. Diagnostic output only.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, e: &Expression) -> String {
        e.accept(self)
    }
}

impl ExpressionVisitor for AstPrinter {
    type Result = String;

    fn visit_expr(&mut self, expression: &Expression) -> Self::Result {
        match expression {
            Expression::Binary {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                left.accept(self),
                right.accept(self)
            ),
            Expression::Grouping { expr } => format!("(group {})", expr.accept(self)),
            Expression::Literal { literal } => match literal {
                Literal::String(s) => format!("\"{}\"", s),
                literal => literal.to_string(),
            },
            Expression::Unary { operator, expr } => {
                format!("({} {})", operator.lexeme, expr.accept(self))
            }
        }
    }
}
