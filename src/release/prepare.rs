//! Package tree reset.

use super::outcome::Outcome;
use super::paths::PathSet;
use super::sync;
use crate::release::arch::Arch;
use tokio::fs;

/// Resets the package base directory to a known-empty state.
///
/// Removes the whole tree if it exists, then recreates the base plus the
/// per-architecture build and bin directories. Not transactional: a partial
/// failure leaves a partial tree and reports fatal. The recovery action is
/// simply running the preparer again, which starts with the same removal.
pub async fn prepare_dirs(paths: &PathSet) -> Outcome {
    match reset(paths).await {
        Ok(()) => Outcome::Success,
        Err(e) => Outcome::fatal(format!(
            "setup of build directory tree {} failed: {e}",
            paths.pkg_base_dir.display()
        )),
    }
}

async fn reset(paths: &PathSet) -> crate::error::Result<()> {
    sync::remove_dir_all(&paths.pkg_base_dir).await?;
    fs::create_dir_all(&paths.pkg_base_dir).await?;
    for arch in Arch::ALL {
        fs::create_dir(paths.build_dir.get(arch)).await?;
        fs::create_dir(paths.bin_dir.get(arch)).await?;
    }
    Ok(())
}
