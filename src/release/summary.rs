//! Final status report.

use super::arch::Arch;
use super::outcome::Outcome;
use super::paths::PathSet;
use super::vcs::Vcs;
use crate::error::Result;
use std::path::Path;

const DIVIDER: &str =
    "------------------------------------------------------------------------------";

/// Prints the final artifact status and the released changeset, and returns
/// the overall verdict. Success requires both installers to exist on disk.
pub async fn show_summary(
    paths: &PathSet,
    vcs: &Vcs,
    branch: &str,
    release_date: &str,
) -> Result<Outcome> {
    println!("\n{DIVIDER}\nFinal status\n{DIVIDER}");
    println!("The packages are located in:\n  {}", paths.pkg_base_dir.display());
    println!();

    let mut verdict = Outcome::Success;
    for arch in [Arch::Win64, Arch::Win32] {
        let installer = paths.installer_file(release_date, arch);
        print!("Lumen installer {}bit: ", arch.bits());
        if !print_file_status(&installer) {
            verdict = verdict.merge(Outcome::fatal(format!(
                "installer {} missing",
                installer.display()
            )));
        }
    }

    println!("\nChangeset info:");
    vcs.print_last_change(branch).await?;
    println!("{DIVIDER}");

    Ok(verdict)
}

fn print_file_status(path: &Path) -> bool {
    let present = path.is_file();
    println!("{}", if present { "OK" } else { "MISSING" });
    present
}
