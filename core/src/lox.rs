use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use crate::{parser::Parser, printers::AstPrinter, report, scanner::Scanner};

/// Front-end pipeline: source text → scanner → parser → printed tree.
///
/// Tracks the aggregate error flag across both stages; the caller maps it to
/// a process exit status.
#[derive(Default)]
pub struct Lox {
    had_error: bool,
}

impl Lox {
    /// Reads the whole file into memory and runs it. Returns whether the
    /// scan or the parse reported any error.
    pub fn run_file(&mut self, path: &Path) -> io::Result<bool> {
        let source = fs::read_to_string(path)?;
        self.run(&source);
        Ok(self.had_error)
    }

    /// Reads lines from standard input until EOF. Errors are reported but
    /// do not carry over from one line to the next.
    pub fn run_prompt(&mut self) -> io::Result<()> {
        print!("> ");
        io::stdout().flush()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => self.run(&line),
                Err(_) => break,
            }
            self.had_error = false;

            print!("> ");
            io::stdout().flush()?;
        }
        println!();

        Ok(())
    }

    fn run(&mut self, source: &str) {
        // Scan source into tokens
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens().to_vec();
        for error in scanner.errors() {
            report::emit(error);
        }
        self.had_error = scanner.had_error();

        // Parse tokens into a tree; parse errors are reported inside parse()
        let mut parser = Parser::new(tokens);
        match parser.parse() {
            Some(expression) => {
                if !self.had_error {
                    println!("{}", AstPrinter.print(&expression));
                }
            }
            None => self.had_error = true,
        }
    }
}
