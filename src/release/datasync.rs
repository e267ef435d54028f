//! Mirroring of fixed content directories into the package tree.

use super::outcome::Outcome;
use super::sync::{self, CopyPolicy, CopyTask};
use crate::error::Result;
use std::path::Path;

/// Content subdirectories shipped with every release, with an optional
/// file-name exclusion pattern.
const DATA_DIRS: &[(&str, Option<&str>)] = &[
    ("ChannelMixers", None),
    ("Curves", None),
    ("LensfunDatabase", None),
    ("Presets", None),
    ("Profiles", None),
    ("Themes", None),
    // Qt translation sources; only the compiled .qm files ship
    ("Translations", Some("*.ts")),
    ("UiSettings", None),
];

/// Mirrors every content subdirectory from `src_dir` into `dest_dir`.
///
/// Each destination subdirectory is removed and recreated from scratch.
/// Unlike the library synchronizer this is fail-fast: these directories are
/// required user-facing content, so the first failure aborts the whole
/// synchronization as fatal.
pub async fn sync_data(src_dir: &Path, dest_dir: &Path) -> Result<Outcome> {
    for (name, _) in DATA_DIRS {
        if let Err(e) = sync::remove_dir_all(&dest_dir.join(name)).await {
            return Ok(Outcome::fatal(format!(
                "removing existing destination {name} failed: {e}"
            )));
        }
    }

    for (name, exclude) in DATA_DIRS {
        println!("Updating: {name}");

        let tasks = match expand_dir(&src_dir.join(name), &dest_dir.join(name), *exclude) {
            Ok(tasks) => tasks,
            Err(e) => {
                return Ok(Outcome::fatal(format!(
                    "reading data directory {name} failed: {e}"
                )));
            }
        };

        let copied = sync::copy_files(&tasks, CopyPolicy::FailFast).await;
        if copied.is_fatal() {
            return Ok(copied);
        }
    }

    log::info!("data files successfully updated");
    Ok(Outcome::Success)
}

/// Expands a directory tree into per-file copy tasks, skipping files whose
/// name matches the exclusion pattern.
fn expand_dir(
    src: &Path,
    dest: &Path,
    exclude: Option<&str>,
) -> crate::error::Result<Vec<CopyTask>> {
    let exclude = exclude.map(glob::Pattern::new).transpose()?;
    let mut tasks = Vec::new();

    for entry in walkdir::WalkDir::new(src) {
        let entry = entry.map_err(|e| std::io::Error::other(e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(pattern) = &exclude {
            let name = entry.file_name().to_string_lossy();
            if pattern.matches(&name) {
                continue;
            }
        }
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| std::io::Error::other(e))?;
        tasks.push(CopyTask {
            src: entry.path().to_path_buf(),
            dest: dest.join(rel),
        });
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_repo(base: &Path) {
        for (name, _) in DATA_DIRS {
            std::fs::create_dir_all(base.join(name)).unwrap();
            std::fs::write(base.join(name).join("default.cfg"), b"cfg").unwrap();
        }
        std::fs::write(base.join("Translations/lumen_de.qm"), b"qm").unwrap();
        std::fs::write(base.join("Translations/lumen_de.ts"), b"ts").unwrap();
        std::fs::create_dir_all(base.join("Themes/dark")).unwrap();
        std::fs::write(base.join("Themes/dark/style.qss"), b"qss").unwrap();
    }

    #[tokio::test]
    async fn mirrors_content_and_honors_exclusions() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("repo");
        let dest = dir.path().join("bin");
        seed_repo(&src);
        std::fs::create_dir_all(&dest).unwrap();

        let outcome = sync_data(&src, &dest).await.unwrap();
        assert!(outcome.is_success());

        assert!(dest.join("Presets/default.cfg").is_file());
        assert!(dest.join("Themes/dark/style.qss").is_file());
        assert!(dest.join("Translations/lumen_de.qm").is_file());
        // Translation sources are excluded.
        assert!(!dest.join("Translations/lumen_de.ts").exists());
    }

    #[tokio::test]
    async fn stale_destination_content_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("repo");
        let dest = dir.path().join("bin");
        seed_repo(&src);
        std::fs::create_dir_all(dest.join("Presets")).unwrap();
        std::fs::write(dest.join("Presets/old.cfg"), b"old").unwrap();

        let outcome = sync_data(&src, &dest).await.unwrap();
        assert!(outcome.is_success());
        assert!(!dest.join("Presets/old.cfg").exists());
        assert!(dest.join("Presets/default.cfg").is_file());
    }

    #[tokio::test]
    async fn missing_source_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("repo");
        seed_repo(&src);
        std::fs::remove_dir_all(src.join("Curves")).unwrap();

        let outcome = sync_data(&src, &dir.path().join("bin")).await.unwrap();
        assert!(outcome.is_fatal());
        assert!(outcome.diagnostic().unwrap().contains("Curves"));
    }
}
