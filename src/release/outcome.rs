//! Tri-state step results and their aggregation.

/// Result of a single pipeline step.
///
/// Every component operation reports one of three verdicts. The orchestrator
/// aggregates them with [`Outcome::merge`], which is monotonic: once a run
/// has seen a fatal outcome it can never become successful again.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Step completed as intended.
    Success,
    /// Step completed with a diagnostic that does not fail the run
    /// (e.g. strip failure, operator chose to continue past a gate).
    Recoverable(String),
    /// Step failed; the run must not publish release artifacts.
    Fatal(String),
}

impl Outcome {
    /// True iff this outcome fails the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Outcome::Fatal(_))
    }

    /// True iff this outcome is a clean success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// The diagnostic attached to this outcome, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Outcome::Success => None,
            Outcome::Recoverable(d) | Outcome::Fatal(d) => Some(d),
        }
    }

    /// Combines two outcomes; the worse verdict wins and diagnostics are
    /// concatenated.
    pub fn merge(self, other: Outcome) -> Outcome {
        use Outcome::*;
        match (self, other) {
            (Success, o) => o,
            (o, Success) => o,
            (Fatal(a), Fatal(b) | Recoverable(b)) | (Recoverable(a), Fatal(b)) => {
                Fatal(join(a, b))
            }
            (Recoverable(a), Recoverable(b)) => Recoverable(join(a, b)),
        }
    }

    /// Builds a fatal outcome from anything displayable.
    pub fn fatal(diagnostic: impl std::fmt::Display) -> Outcome {
        Outcome::Fatal(diagnostic.to_string())
    }
}

fn join(a: String, b: String) -> String {
    if a.is_empty() {
        b
    } else if b.is_empty() {
        a
    } else {
        format!("{a}\n{b}")
    }
}
