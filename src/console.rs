//! Operator decision prompts.
//!
//! All interactive decisions go through the [`Prompter`] trait so the
//! pipeline can be driven by scripted decisions in tests. The production
//! implementation reads single-key answers from the terminal.

use crate::error::{ReleaseError, Result};
use std::io::{BufRead, Write};

/// Operator decision at the changelog freshness gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateChoice {
    /// Check the file again
    Retry,
    /// Proceed despite the stale file
    Continue,
    /// Abort the whole run
    Abort,
}

/// Source of operator decisions.
pub trait Prompter {
    /// Asks a yes/no question.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Asks a retry/continue/abort question.
    fn gate(&mut self, question: &str) -> Result<GateChoice>;
}

/// Prompter reading single-key answers from standard input.
///
/// A closed stdin is treated as an abort so unattended invocations cannot
/// spin forever on a prompt.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn next_key(&self) -> Result<char> {
        let mut line = String::new();
        let stdin = std::io::stdin();
        loop {
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Err(ReleaseError::Cancelled);
            }
            if let Some(c) = line.trim().chars().next() {
                return Ok(c.to_ascii_lowercase());
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            print!("{question} (y/n) ");
            std::io::stdout().flush()?;
            match self.next_key()? {
                'y' => {
                    println!("Yes");
                    return Ok(true);
                }
                'n' => {
                    println!("No");
                    return Ok(false);
                }
                _ => continue,
            }
        }
    }

    fn gate(&mut self, question: &str) -> Result<GateChoice> {
        loop {
            print!("{question} (r)etry / (c)ontinue / (a)bort ");
            std::io::stdout().flush()?;
            match self.next_key()? {
                'r' => return Ok(GateChoice::Retry),
                'c' => return Ok(GateChoice::Continue),
                'a' => return Ok(GateChoice::Abort),
                _ => continue,
            }
        }
    }
}

/// Prompter replaying a fixed sequence of decisions, for tests.
///
/// Confirm prompts consume [`GateChoice::Continue`] as "yes" and
/// [`GateChoice::Abort`] as "no". Running out of scripted decisions is an
/// error, so a test that prompts more often than expected fails loudly.
#[derive(Debug)]
pub struct ScriptedPrompter {
    decisions: std::vec::IntoIter<GateChoice>,
}

impl ScriptedPrompter {
    /// Creates a prompter that will hand out `decisions` in order.
    pub fn new(decisions: Vec<GateChoice>) -> Self {
        Self {
            decisions: decisions.into_iter(),
        }
    }

    fn next(&mut self) -> Result<GateChoice> {
        self.decisions.next().ok_or(ReleaseError::Cancelled)
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(self.next()? == GateChoice::Continue)
    }

    fn gate(&mut self, _question: &str) -> Result<GateChoice> {
        self.next()
    }
}
