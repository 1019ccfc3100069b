use std::{error::Error, fmt};

use crate::{
    ast::Expression,
    report,
    token::{Token, TokenType},
    types::Literal,
};

pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Grammar, lowest precedence first:
//
// expression → equality ;
// equality   → comparison ( ( "!=" | "==" ) comparison )* ;
// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
// term       → factor ( ( "-" | "+" ) factor )* ;
// factor     → unary ( ( "/" | "*" ) unary )* ;
// unary      → ( "!" | "-" ) unary
//            | primary ;
// primary    → NUMBER | STRING | "true" | "false" | "nil"
//            | "(" expression ")" ;
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses one top-level expression.
    ///
    /// The first syntax error aborts the rule chain, is reported to the
    /// error stream and yields `None`; no error escapes this boundary.
    pub fn parse(&mut self) -> Option<Expression> {
        match self.expression() {
            Ok(expression) => Some(expression),
            Err(error) => {
                report::emit(&error);
                None
            }
        }
    }

    fn expression(&mut self) -> ParseResult<Expression> {
        self.equality()
    }

    fn equality(&mut self) -> ParseResult<Expression> {
        let mut left = self.comparison()?;

        while self.matches(&[TokenType::NotEqual, TokenType::EqualEqual]) {
            let operator = self.previous();
            let right = self.comparison()?;
            left = Expression::binary(Box::new(left), operator, Box::new(right));
        }

        Ok(left)
    }

    fn comparison(&mut self) -> ParseResult<Expression> {
        let mut left = self.term()?;

        while self.matches(&[
            TokenType::Greater,
            TokenType::GreaterEqual,
            TokenType::Less,
            TokenType::LessEqual,
        ]) {
            let operator = self.previous();
            let right = self.term()?;
            left = Expression::binary(Box::new(left), operator, Box::new(right));
        }

        Ok(left)
    }

    fn term(&mut self) -> ParseResult<Expression> {
        let mut left = self.factor()?;

        while self.matches(&[TokenType::Minus, TokenType::Plus]) {
            let operator = self.previous();
            let right = self.factor()?;
            left = Expression::binary(Box::new(left), operator, Box::new(right));
        }

        Ok(left)
    }

    fn factor(&mut self) -> ParseResult<Expression> {
        let mut left = self.unary()?;

        while self.matches(&[TokenType::Slash, TokenType::Star]) {
            let operator = self.previous();
            let right = self.unary()?;
            left = Expression::binary(Box::new(left), operator, Box::new(right));
        }

        Ok(left)
    }

    fn unary(&mut self) -> ParseResult<Expression> {
        if self.matches(&[TokenType::Bang, TokenType::Minus]) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expression::unary(operator, Box::new(right)));
        }

        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expression> {
        if self.matches(&[TokenType::True]) {
            return Ok(Expression::literal(Literal::True));
        }

        if self.matches(&[TokenType::False]) {
            return Ok(Expression::literal(Literal::False));
        }

        if self.matches(&[TokenType::Nil]) {
            return Ok(Expression::literal(Literal::Nil));
        }

        if self.matches(&[TokenType::Number, TokenType::String]) {
            return Ok(Expression::literal(self.previous().literal.unwrap()));
        }

        if self.matches(&[TokenType::LeftParen]) {
            let expression = self.expression()?;
            return self
                .consume(
                    TokenType::RightParen,
                    ParseErrorKind::ExpectedRightParenthesis,
                )
                .map(|_| Expression::grouping(Box::new(expression)));
        }

        Err(ParseError {
            token: self.peek(),
            kind: ParseErrorKind::ExpectedExpression,
        })
    }

    fn matches(&mut self, token_types: &[TokenType]) -> bool {
        for &token_type in token_types.iter() {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }

        false
    }

    fn check(&self, token_type: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == token_type
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    fn peek(&self) -> Token {
        self.tokens.get(self.current).unwrap().clone()
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    fn previous(&mut self) -> Token {
        self.tokens.get(self.current - 1).unwrap().clone()
    }

    fn consume(&mut self, token_type: TokenType, error_kind: ParseErrorKind) -> ParseResult<Token> {
        if self.check(token_type) {
            return Ok(self.advance());
        }

        Err(ParseError {
            token: self.peek(),
            kind: error_kind,
        })
    }

    /// Discards tokens up to the next statement boundary: just past a `;`,
    /// or just before a keyword that starts a statement.
    ///
    /// Not reached by the single-expression grammar; kept as the recovery
    /// primitive for a statement grammar. Always advances at least one token
    /// so it cannot stall on the error token itself.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().token_type == TokenType::Semicolon {
                return;
            }

            if [
                TokenType::Class,
                TokenType::Fun,
                TokenType::Var,
                TokenType::For,
                TokenType::If,
                TokenType::While,
                TokenType::Print,
                TokenType::Return,
            ]
            .iter()
            .any(|&token_type| token_type == self.peek().token_type)
            {
                return;
            }

            self.advance();
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseError {
    token: Token,
    kind: ParseErrorKind,
}

impl ParseError {
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let context = if self.token.token_type == TokenType::Eof {
            " at end".to_string()
        } else {
            format!(" at \"{}\"", self.token.lexeme)
        };
        write!(
            f,
            "{}",
            report::diagnostic(self.token.line, &self.kind, context)
        )
    }
}

#[derive(Debug, Clone)]
pub enum ParseErrorKind {
    ExpectedExpression,
    ExpectedRightParenthesis,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Self::ExpectedExpression => write!(f, "Expected expression."),
            Self::ExpectedRightParenthesis => write!(f, "Expected ')' after expression."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printers::AstPrinter;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> Option<Expression> {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens().to_vec();
        assert!(!scanner.had_error(), "unexpected scan errors");
        Parser::new(tokens).parse()
    }

    fn parse_and_print(source: &str) -> String {
        AstPrinter.print(&parse(source).expect("expected a tree"))
    }

    #[test]
    fn parses_the_full_grammar() {
        assert_eq!(
            parse_and_print("!!(-123 * (45.67) * \"asd\") == (\"abc\" != 42.42)"),
            "(== (! (! (group (* (* (- 123) (group 45.67)) \"asd\")))) (group (!= \"abc\" 42.42)))"
        );
    }

    #[test]
    fn unary_binds_tighter_than_factor() {
        assert_eq!(
            parse_and_print("-123 * (45.67) * \"asd\""),
            "(* (* (- 123) (group 45.67)) \"asd\")"
        );
    }

    #[test]
    fn same_tier_operators_fold_left_to_right() {
        assert_eq!(parse_and_print("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(parse_and_print("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    }

    #[test]
    fn precedence_climbs_from_equality_to_unary() {
        assert_eq!(
            parse_and_print("1 + 2 * 3 < 4 == true"),
            "(== (< (+ 1 (* 2 3)) 4) true)"
        );
    }

    #[test]
    fn unary_is_right_associative() {
        assert_eq!(parse_and_print("!!true"), "(! (! true))");
        assert_eq!(parse_and_print("--1"), "(- (- 1))");
    }

    #[test]
    fn parses_keyword_literals() {
        assert_eq!(parse_and_print("nil"), "nil");
        assert_eq!(parse_and_print("true == false"), "(== true false)");
    }

    #[test]
    fn an_unclosed_grouping_produces_no_tree() {
        assert_eq!(parse("(1 + 2"), None);
    }

    #[test]
    fn a_lone_operator_produces_no_tree() {
        assert_eq!(parse("+"), None);
        assert_eq!(parse("1 +"), None);
    }

    #[test]
    fn an_empty_token_stream_produces_no_tree() {
        assert_eq!(parse(""), None);
    }

    #[test]
    fn an_identifier_is_not_a_primary_expression() {
        assert_eq!(parse("foo"), None);
    }

    #[test]
    fn errors_carry_the_offending_token() {
        let mut scanner = Scanner::new("(1");
        let tokens = scanner.scan_tokens().to_vec();
        let mut parser = Parser::new(tokens);
        let error = parser.expression().unwrap_err();
        assert_eq!(error.token().token_type, TokenType::Eof);
        assert_eq!(
            error.to_string(),
            "Error at line: 1: Expected ')' after expression.:  at end"
        );
    }

    #[test]
    fn errors_at_a_token_name_its_lexeme() {
        let mut scanner = Scanner::new("1 + *");
        let tokens = scanner.scan_tokens().to_vec();
        let mut parser = Parser::new(tokens);
        let error = parser.expression().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Error at line: 1: Expected expression.:  at \"*\""
        );
    }

    #[test]
    fn synchronize_skips_to_the_next_statement_boundary() {
        let mut scanner = Scanner::new("+ 1; 42");
        let tokens = scanner.scan_tokens().to_vec();
        let mut parser = Parser::new(tokens);

        assert!(parser.parse().is_none());
        parser.synchronize();
        assert_eq!(
            AstPrinter.print(&parser.parse().expect("expected a tree")),
            "42"
        );
    }

    #[test]
    fn synchronize_stops_before_a_statement_keyword() {
        let mut scanner = Scanner::new("+ 1 2 var");
        let tokens = scanner.scan_tokens().to_vec();
        let mut parser = Parser::new(tokens);

        assert!(parser.parse().is_none());
        parser.synchronize();
        let error = parser.expression().unwrap_err();
        assert_eq!(error.token().token_type, TokenType::Var);
    }
}
