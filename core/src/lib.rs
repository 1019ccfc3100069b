pub mod ast;
pub mod lox;
pub mod parser;
pub mod printers;
pub mod report;
pub mod scanner;
pub mod token;
pub mod types;

pub use crate::lox::Lox;
