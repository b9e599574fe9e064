//! Example: redacting banned words read from a dictionary file.
//!
//! Reads text from stdin and writes it to stdout with every dictionary pattern
//! replaced. Lines of the dictionary starting with '#' are comments.
//!
//! Run with: cargo run --example redact -- banned.txt '***' < input.txt
//! Set RUST_LOG=libaho=debug to see the build events.

use std::error::Error;
use std::io::{self, BufRead, Write};

use libaho::aho::Automaton;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(dictionary) = args.next() else {
        eprintln!("usage: redact <dictionary> [replacement]");
        std::process::exit(2);
    };
    let replacement = args.next().unwrap_or_else(|| "***".to_string());

    let automaton = Automaton::from_file(&dictionary)?;
    eprintln!("loaded {} patterns from {dictionary}", automaton.size());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut hits = 0;
    for line in io::stdin().lock().lines() {
        let line = line?;
        hits += automaton.matches(line.as_str()).len();
        writeln!(out, "{}", automaton.replace(&line, &replacement))?;
    }
    eprintln!("{hits} occurrences");
    Ok(())
}
