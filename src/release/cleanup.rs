//! Post-release cleanup.

use super::arch::Arch;
use super::outcome::Outcome;
use super::paths::PathSet;
use super::sync;
use crate::config::ReleaseConfig;

/// Removes everything the run created except the installers.
///
/// With an archive directory configured the installers are moved there and
/// the whole package base is deleted; without one the build and bin
/// directories are deleted and the installers stay in the package base.
pub async fn clean_up(
    config: &ReleaseConfig,
    paths: &PathSet,
    release_date: &str,
) -> Outcome {
    match run(config, paths, release_date).await {
        Ok(()) => Outcome::Success,
        Err(e) => Outcome::fatal(format!("cleanup failed: {e}")),
    }
}

async fn run(config: &ReleaseConfig, paths: &PathSet, release_date: &str) -> crate::error::Result<()> {
    match &config.archive_dir {
        Some(archive) => {
            tokio::fs::create_dir_all(archive).await?;
            for arch in Arch::ALL {
                let installer = paths.installer_file(release_date, arch);
                let name = installer
                    .file_name()
                    .ok_or_else(|| std::io::Error::other("installer path has no file name"))?
                    .to_os_string();
                sync::move_file(&installer, &archive.join(name)).await?;
            }
            sync::remove_dir_all(&paths.pkg_base_dir).await?;
        }
        None => {
            for arch in Arch::ALL {
                sync::remove_dir_all(paths.build_dir.get(arch)).await?;
                sync::remove_dir_all(paths.bin_dir.get(arch)).await?;
            }
        }
    }
    Ok(())
}
