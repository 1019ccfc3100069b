use std::{path::PathBuf, process::exit};

use clap::Parser;
use console::style;

use lox::Lox;

#[derive(Parser)]
#[command(name = "lox", about = "Scan, parse and pretty-print Lox expressions")]
struct Args {
    /// Script to run; omit to start an interactive prompt
    script: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let mut lox = Lox::default();

    match args.script {
        Some(path) => match lox.run_file(&path) {
            // sysexits: EX_DATAERR for malformed input
            Ok(true) => exit(65),
            Ok(false) => {}
            // EX_NOINPUT for an unreadable script
            Err(err) => {
                eprintln!("{}: {}: {}", style("error").red(), path.display(), err);
                exit(66);
            }
        },
        None => {
            let _ = lox.run_prompt();
        }
    }
}
