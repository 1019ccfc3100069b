use std::fmt;

/// Formats one diagnostic line: `Error at line: <N>: <message>: <context>`.
///
/// Scan errors leave the message slot empty and carry their description in
/// the context slot; parse errors carry their description in the message
/// slot and the offending lexeme (or ` at end`) in the context slot.
pub fn diagnostic(line: u32, message: impl fmt::Display, context: impl fmt::Display) -> String {
    format!("Error at line: {}: {}: {}", line, message, context)
}

/// Writes one diagnostic to the error stream.
pub fn emit(diagnostic: impl fmt::Display) {
    eprintln!("{}", diagnostic);
}
