//! Operator confirmation gates
//!
//! The workflow suspends at two decision points (commit-first, update
//! version). The `Confirm` trait keeps those gates swappable: an
//! interactive stdin provider for normal runs, an assume-yes provider for
//! `--yes`, and scripted providers in tests.

use std::io::{self, BufRead, Write};

/// A blocking source of operator decisions.
pub trait Confirm {
    /// Ask a yes/no question; blocks until answered.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Ask for a free-text line (commit message); blocks until answered.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Interactive provider reading from stdin. Waits indefinitely; an
/// unanswerable prompt (closed stdin) reads as "no".
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        loop {
            print!("{} [y/n] ", question);
            io::stdout().flush()?;

            let mut answer = String::new();
            if stdin.lock().read_line(&mut answer)? == 0 {
                return Ok(false);
            }
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please answer y or n."),
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Non-interactive provider for `--yes` runs: every gate passes, and the
/// free-text prompt returns the preset message (or empty, letting the
/// caller substitute its generated default).
pub struct AssumeYes {
    pub message: Option<String>,
}

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }

    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        Ok(self.message.clone().unwrap_or_default())
    }
}
