use std::error::Error;
use std::fmt;

use crate::report;
use crate::token::{Token, TokenType};
use crate::types::Literal;

/// The scanner separates raw source text into lexemes and bundles each with
/// its classification, literal value and line into a token.
///
/// One forward pass, one character of lookahead. Lexical errors are recorded
/// and scanning continues at the next character, so the returned stream is
/// always complete and always ends in `Eof`.
pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    start: usize,
    current: usize,
    line: u32,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn scan_tokens(&mut self) -> &[Token] {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenType::Eof, String::new(), None, self.line));

        self.tokens()
    }

    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_slice()
    }

    pub fn errors(&self) -> &[ScanError] {
        self.errors.as_slice()
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) {
        match self.advance() {
            // Single character tokens
            '(' => self.add_token(TokenType::LeftParen, None),
            ')' => self.add_token(TokenType::RightParen, None),
            '{' => self.add_token(TokenType::LeftBrace, None),
            '}' => self.add_token(TokenType::RightBrace, None),
            ',' => self.add_token(TokenType::Comma, None),
            '.' => self.add_token(TokenType::Dot, None),
            '-' => self.add_token(TokenType::Minus, None),
            '+' => self.add_token(TokenType::Plus, None),
            ';' => self.add_token(TokenType::Semicolon, None),
            '*' => self.add_token(TokenType::Star, None),

            // One or two character tokens
            '!' => {
                if self.matches('=') {
                    self.add_token(TokenType::NotEqual, None)
                } else {
                    self.add_token(TokenType::Bang, None)
                }
            }
            '=' => {
                if self.matches('=') {
                    self.add_token(TokenType::EqualEqual, None)
                } else {
                    self.add_token(TokenType::Equal, None)
                }
            }
            '>' => {
                if self.matches('=') {
                    self.add_token(TokenType::GreaterEqual, None)
                } else {
                    self.add_token(TokenType::Greater, None)
                }
            }
            '<' => {
                if self.matches('=') {
                    self.add_token(TokenType::LessEqual, None)
                } else {
                    self.add_token(TokenType::Less, None)
                }
            }

            '/' => {
                if self.matches('/') {
                    // A comment goes until the end of the line
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash, None)
                }
            }

            // Ignore whitespace
            ' ' | '\r' | '\t' => {}

            '\n' => {
                self.line += 1;
            }

            '"' => self.string(),

            c => {
                if Scanner::is_digit(c) {
                    self.number()
                } else if Scanner::is_alpha(c) {
                    self.identifier()
                } else {
                    self.error(ScanErrorKind::UnexpectedCharacter)
                }
            }
        }
    }

    fn string(&mut self) {
        let mut newlines = 0u32;
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                newlines += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            // Reported at the line the string started on; no token emitted
            self.error(ScanErrorKind::UnterminatedString);
            return;
        }

        // Consume the closing "
        self.advance();

        // Trim the surrounding quotes; embedded newlines stay verbatim
        let literal = self.source[self.start + 1..self.current - 1]
            .iter()
            .collect();
        self.add_token(TokenType::String, Some(Literal::String(literal)));

        // The token keeps the opening line; the counter catches up here
        self.line += newlines;
    }

    fn number(&mut self) {
        while let Some(c) = self.peek() {
            if !Scanner::is_digit(c) {
                break;
            }
            self.advance();
        }

        // Look for a fractional part; the dot is only consumed when a digit
        // follows, so a trailing `.` stays in the stream
        if self.peek() == Some('.') && self.peek_next().is_some_and(Scanner::is_digit) {
            self.advance();

            while let Some(c) = self.peek() {
                if !Scanner::is_digit(c) {
                    break;
                }
                self.advance();
            }
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        // A digit-only lexeme with an optional fraction always parses
        let value = text.parse::<f64>().unwrap();
        self.add_token(TokenType::Number, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while let Some(c) = self.peek() {
            if !Scanner::is_alphanumeric(c) {
                break;
            }
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();

        // Reserved words match exactly and case-sensitively
        let token_type = match text.as_str() {
            "and" => TokenType::And,
            "class" => TokenType::Class,
            "else" => TokenType::Else,
            "false" => TokenType::False,
            "for" => TokenType::For,
            "fun" => TokenType::Fun,
            "if" => TokenType::If,
            "nil" => TokenType::Nil,
            "or" => TokenType::Or,
            "print" => TokenType::Print,
            "return" => TokenType::Return,
            "super" => TokenType::Super,
            "this" => TokenType::This,
            "true" => TokenType::True,
            "var" => TokenType::Var,
            "while" => TokenType::While,
            _ => TokenType::Identifier,
        };

        let literal = if token_type == TokenType::Identifier {
            Some(Literal::Identifier(text))
        } else {
            None
        };
        self.add_token(token_type, literal);
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn is_alpha(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    fn is_alphanumeric(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }

        self.current += 1;
        true
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn add_token(&mut self, token_type: TokenType, literal: Option<Literal>) {
        let lexeme = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(token_type, lexeme, literal, self.line));
    }

    fn error(&mut self, kind: ScanErrorKind) {
        self.errors.push(ScanError::new(self.line, kind));
    }
}

#[derive(Debug, Clone)]
pub struct ScanError {
    line: u32,
    kind: ScanErrorKind,
}

impl ScanError {
    pub fn new(line: u32, kind: ScanErrorKind) -> Self {
        ScanError { line, kind }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn kind(&self) -> &ScanErrorKind {
        &self.kind
    }
}

impl Error for ScanError {}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", report::diagnostic(self.line, "", &self.kind))
    }
}

#[derive(Debug, Clone)]
pub enum ScanErrorKind {
    UnexpectedCharacter,
    UnterminatedString,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Self::UnexpectedCharacter => write!(f, "Unexpected character."),
            Self::UnterminatedString => write!(f, "Unterminated string."),
        }
    }
}
