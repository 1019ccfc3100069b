use std::fmt;

/// A literal value carried by a token or an AST leaf.
///
/// Numbers and strings come straight from the scanner; `True`, `False` and
/// `Nil` are produced by the parser when it lowers the matching keywords.
/// `Identifier` only ever appears on tokens, never in a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Identifier(String),
    True,
    False,
    Nil,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            // f64's Display is the shortest text that round-trips, so
            // 123.000 scans and prints back as 123
            Self::Number(n) => write!(f, "{}", n),
            Self::Identifier(name) => write!(f, "{}", name),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Nil => write!(f, "nil"),
        }
    }
}
