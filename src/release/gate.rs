//! Changelog freshness gate.
//!
//! A release must ship a changelog that was touched today. If it was not,
//! the operator decides: re-check after editing, continue anyway, or abort
//! the whole run. The loop is uncapped; only an operator choice or a
//! freshened file ends it.

use super::outcome::Outcome;
use crate::console::{GateChoice, Prompter};
use crate::error::{ReleaseError, Result};
use chrono::{DateTime, Local, NaiveDate};
use std::path::Path;

/// Checks that the changelog was modified today, prompting the operator
/// while it is not.
pub async fn ensure_changelog_fresh(
    changelog: &Path,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    let changelog = changelog.to_path_buf();
    gate_with(
        || {
            let modified = std::fs::metadata(&changelog)?.modified()?;
            Ok(DateTime::<Local>::from(modified).date_naive())
        },
        || Local::now().date_naive(),
        prompter,
    )
}

/// Gate logic over injected date probes, so tests never have to fake file
/// mtimes.
fn gate_with(
    observed: impl Fn() -> Result<NaiveDate>,
    today: impl Fn() -> NaiveDate,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    loop {
        let modified = observed()?;
        if modified >= today() {
            return Ok(Outcome::Success);
        }

        eprintln!("The changelog was last updated on {modified}, not today.");
        match prompter.gate("What now?")? {
            GateChoice::Retry => continue,
            GateChoice::Continue => {
                return Ok(Outcome::Recoverable(format!(
                    "changelog last updated {modified}; recent edits may be missing"
                )));
            }
            GateChoice::Abort => return Err(ReleaseError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedPrompter;
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fresh_changelog_passes_without_prompting() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        let outcome = gate_with(
            || Ok(date(2026, 8, 30)),
            || date(2026, 8, 30),
            &mut prompter,
        )
        .unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn stale_changelog_never_passes_without_explicit_continue() {
        let mut prompter = ScriptedPrompter::new(vec![GateChoice::Continue]);
        let outcome = gate_with(
            || Ok(date(2026, 8, 29)),
            || date(2026, 8, 30),
            &mut prompter,
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Recoverable(_)));
    }

    #[test]
    fn abort_unwinds_the_pipeline() {
        let mut prompter = ScriptedPrompter::new(vec![GateChoice::Abort]);
        let result = gate_with(
            || Ok(date(2026, 8, 29)),
            || date(2026, 8, 30),
            &mut prompter,
        );
        assert!(matches!(result, Err(ReleaseError::Cancelled)));
    }

    #[test]
    fn retry_observes_the_file_again() {
        // First observation stale, second fresh after an edit.
        let calls = Cell::new(0);
        let mut prompter = ScriptedPrompter::new(vec![GateChoice::Retry]);
        let outcome = gate_with(
            || {
                calls.set(calls.get() + 1);
                Ok(if calls.get() == 1 {
                    date(2026, 8, 29)
                } else {
                    date(2026, 8, 30)
                })
            },
            || date(2026, 8, 30),
            &mut prompter,
        )
        .unwrap();
        assert!(outcome.is_success());
        assert_eq!(calls.get(), 2);
    }
}
