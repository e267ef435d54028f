//! Pre-build environment validation.
//!
//! Everything that can fail before the first mutation is checked here: tool
//! availability, working-copy state, required auxiliary files and the
//! library source base. Missing tools and files are always fatal; branch and
//! cleanliness findings are operator-overridable.

use super::arch::Arch;
use super::outcome::Outcome;
use super::paths::PathSet;
use super::vcs::Vcs;
use crate::config::ReleaseConfig;
use crate::console::Prompter;
use crate::error::Result;
use crate::process;
use std::path::{Path, PathBuf};

/// Branch releases are expected to be cut from.
pub const RELEASE_BRANCH: &str = "default";

/// Environment variable locating the library source base directory.
pub const DEVKIT_ENV: &str = "LUMEN_DEVKIT";

/// Validates the build environment. Returns a fatal outcome (with the
/// offending tool/path in the diagnostic) before any mutation has happened.
pub async fn check_build_env(
    config: &ReleaseConfig,
    paths: &PathSet,
    prompter: &mut dyn Prompter,
) -> Result<Outcome> {
    let mut verdict = check_tools(config).await;
    if verdict.is_fatal() {
        return Ok(verdict);
    }

    let vcs = Vcs::new(&config.commands.hg);

    let branch = vcs.branch().await?;
    if branch != RELEASE_BRANCH {
        log::warn!("working copy is set to branch \"{branch}\" instead of \"{RELEASE_BRANCH}\"");
        eprintln!("Working copy is set to branch \"{branch}\" instead of \"{RELEASE_BRANCH}\".");
        if !prompter.confirm("Continue anyway?")? {
            return Ok(Outcome::fatal("wrong release branch"));
        }
        verdict = verdict.merge(Outcome::Recoverable(format!(
            "released from branch \"{branch}\""
        )));
    }

    // The working copy should be clean. The changelog is the one exception,
    // so a run can be started while it is still being edited.
    if !vcs.is_clean().await? {
        let status = vcs.status_lines().await?;
        if !blocking_entries(&status).is_empty() {
            eprintln!("Working copy has uncommitted changes.");
            if !prompter.confirm("Continue anyway?")? {
                return Ok(Outcome::fatal("working copy has uncommitted changes"));
            }
            verdict = verdict.merge(Outcome::Recoverable(
                "released with uncommitted changes".into(),
            ));
        }
    }

    verdict = verdict.merge(check_files(paths));
    if verdict.is_fatal() {
        return Ok(verdict);
    }

    Ok(verdict.merge(check_devkit()))
}

async fn check_tools(config: &ReleaseConfig) -> Outcome {
    let mut verdict = Outcome::Success;
    for tool in [
        &config.commands.qmake,
        &config.commands.make,
        &config.commands.hg,
        &config.commands.iscc,
        &config.commands.strip,
    ] {
        if !process::tool_available(tool).await {
            eprintln!("ERROR: Required command not found: {tool}");
            verdict = verdict.merge(Outcome::fatal(format!("required command not found: {tool}")));
        }
    }
    verdict
}

/// Status entries that require operator confirmation: everything except the
/// changelog.
fn blocking_entries<'a>(status_lines: &'a [String]) -> Vec<&'a str> {
    status_lines
        .iter()
        .map(String::as_str)
        .filter(|line| !line.contains("Changelog.txt"))
        .collect()
}

fn check_files(paths: &PathSet) -> Outcome {
    let mut required: Vec<(&Path, &str)> = vec![
        (&paths.date_style_file, "Style file"),
        (&paths.version_style_file, "Style file"),
        (&paths.license_file, "License file"),
    ];
    for arch in Arch::ALL {
        required.push((paths.iss_file.get(arch), "Installer script"));
    }

    let mut verdict = Outcome::Success;
    for (path, what) in required {
        if !path.is_file() {
            eprintln!("ERROR: {what} \"{}\" missing.", path.display());
            verdict = verdict.merge(Outcome::fatal(format!("{what} {} missing", path.display())));
        }
    }
    verdict
}

/// Resolves the devkit base directory from the environment.
pub fn devkit_dir() -> std::result::Result<PathBuf, String> {
    match std::env::var_os(DEVKIT_ENV) {
        None => Err(format!(
            "environment variable {DEVKIT_ENV} is not set; it must point at the library source base directory"
        )),
        Some(value) => {
            let dir = PathBuf::from(value);
            if dir.is_dir() {
                Ok(dir)
            } else {
                Err(format!(
                    "source directory missing: {DEVKIT_ENV} points at \"{}\"",
                    dir.display()
                ))
            }
        }
    }
}

fn check_devkit() -> Outcome {
    match devkit_dir() {
        Ok(dir) => {
            log::debug!("library sources at {}", dir.display());
            Outcome::Success
        }
        Err(diag) => {
            eprintln!("ERROR: {diag}");
            Outcome::Fatal(diag)
        }
    }
}
