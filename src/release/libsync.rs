//! Third-party library synchronization into an architecture's bin directory.

use super::arch::Arch;
use super::manifest::{self, LibraryManifest, LibraryRoots};
use super::outcome::Outcome;
use super::sync::{self, CopyPolicy};
use crate::error::Result;
use std::path::Path;

/// Synchronizes the architecture's full library manifest into `dest_dir`.
///
/// Existing dynamic libraries are purged first, so two consecutive runs over
/// the same inputs produce an identical destination file set. Copying is
/// best-effort: every manifest entry is attempted and every failure is
/// reported, so the operator can fix the complete set of missing libraries
/// in one pass.
pub async fn sync_libraries(devkit: &Path, dest_dir: &Path, arch: Arch) -> Result<Outcome> {
    let roots = LibraryRoots::resolve(devkit, arch);
    sync_with_manifest(&manifest::manifest_for(arch), &roots, dest_dir).await
}

/// Manifest-parameterized entry point backing [`sync_libraries`].
pub async fn sync_with_manifest(
    manifest: &LibraryManifest,
    roots: &LibraryRoots,
    dest_dir: &Path,
) -> Result<Outcome> {
    tokio::fs::create_dir_all(dest_dir).await?;

    let purge = sync::purge_matching(dest_dir, "*.dll").await?;
    if purge.is_fatal() {
        return Ok(purge);
    }

    let tasks = manifest::resolve_tasks(manifest, roots, dest_dir);
    log::info!(
        "syncing {} libraries into {}",
        tasks.len(),
        dest_dir.display()
    );

    let copied = sync::copy_files(&tasks, CopyPolicy::BestEffort).await;
    if copied.is_success() {
        log::info!("libraries successfully updated");
    }
    Ok(purge.merge(copied))
}
