//! Shared file synchronization primitives.
//!
//! Both synchronizers funnel their work through [`copy_files`] so the choice
//! between best-effort and fail-fast behavior is an explicit parameter at the
//! call site instead of two divergent implementations.

use super::outcome::Outcome;
use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A resolved single source-to-destination copy instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyTask {
    /// File to copy
    pub src: PathBuf,
    /// Full destination path, including the file name
    pub dest: PathBuf,
}

/// Failure policy for a batch of copy tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyPolicy {
    /// Attempt every task; report all failures in one aggregate diagnostic.
    /// Used for libraries, so the operator sees the complete set of missing
    /// files in a single run.
    BestEffort,
    /// Stop at the first failure. Used for required user-facing content.
    FailFast,
}

/// Copies a batch of files, creating destination parent directories as
/// needed.
///
/// The returned outcome is fatal if any task failed, with one diagnostic
/// line per failed copy.
pub async fn copy_files(tasks: &[CopyTask], policy: CopyPolicy) -> Outcome {
    let mut failures = Vec::new();

    for task in tasks {
        match copy_one(task).await {
            Ok(()) => {}
            Err(e) => {
                log::error!("could not copy {}: {}", task.src.display(), e);
                failures.push(format!("could not copy {}: {}", task.src.display(), e));
                if policy == CopyPolicy::FailFast {
                    break;
                }
            }
        }
    }

    if failures.is_empty() {
        Outcome::Success
    } else {
        Outcome::Fatal(failures.join("\n"))
    }
}

async fn copy_one(task: &CopyTask) -> io::Result<()> {
    if let Some(parent) = task.dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::copy(&task.src, &task.dest).await?;
    Ok(())
}

/// Moves a file, falling back to copy-and-remove across filesystems.
pub async fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).await?;
    }
    match fs::rename(src, dest).await {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dest).await?;
            fs::remove_file(src).await?;
            Ok(())
        }
    }
}

/// Removes a directory tree if it exists (idempotent).
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Deletes every file matching `pattern` directly inside `dir`.
///
/// Idempotent: no match is a success. Deletion failures are aggregated, not
/// short-circuited.
pub async fn purge_matching(dir: &Path, pattern: &str) -> Result<Outcome> {
    let full_pattern = dir.join(pattern);
    let full_pattern = full_pattern
        .to_str()
        .ok_or_else(|| std::io::Error::other("non-UTF-8 purge path"))?
        .to_string();

    let mut failures = Vec::new();
    for entry in glob::glob(&full_pattern)? {
        match entry {
            Ok(path) => {
                if let Err(e) = fs::remove_file(&path).await {
                    log::error!("could not delete {}: {}", path.display(), e);
                    failures.push(format!("could not delete {}: {}", path.display(), e));
                }
            }
            Err(e) => failures.push(e.to_string()),
        }
    }

    Ok(if failures.is_empty() {
        Outcome::Success
    } else {
        Outcome::Fatal(failures.join("\n"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(src: &Path, dest: &Path) -> CopyTask {
        CopyTask {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn best_effort_attempts_every_task_and_reports_all_failures() {
        let dir = tempfile::tempdir().unwrap();
        let src_ok = dir.path().join("ok.dll");
        std::fs::write(&src_ok, b"x").unwrap();

        let tasks = vec![
            task(&dir.path().join("missing-a.dll"), &dir.path().join("out/a.dll")),
            task(&src_ok, &dir.path().join("out/ok.dll")),
            task(&dir.path().join("missing-b.dll"), &dir.path().join("out/b.dll")),
        ];

        let outcome = copy_files(&tasks, CopyPolicy::BestEffort).await;
        let diag = outcome.diagnostic().unwrap().to_string();
        assert!(outcome.is_fatal());
        // Both failures reported, and the good copy still happened.
        assert!(diag.contains("missing-a.dll"));
        assert!(diag.contains("missing-b.dll"));
        assert!(dir.path().join("out/ok.dll").is_file());
    }

    #[tokio::test]
    async fn fail_fast_stops_at_the_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let src_ok = dir.path().join("ok.txt");
        std::fs::write(&src_ok, b"x").unwrap();

        let tasks = vec![
            task(&dir.path().join("missing.txt"), &dir.path().join("out/missing.txt")),
            task(&src_ok, &dir.path().join("out/ok.txt")),
        ];

        let outcome = copy_files(&tasks, CopyPolicy::FailFast).await;
        assert!(outcome.is_fatal());
        assert!(!dir.path().join("out/ok.txt").exists());
    }

    #[tokio::test]
    async fn copy_creates_nested_destination_directories() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("qwindows.dll");
        std::fs::write(&src, b"plugin").unwrap();

        let dest = dir.path().join("out/plugins/platforms/qwindows.dll");
        let outcome = copy_files(&[task(&src, &dest)], CopyPolicy::FailFast).await;
        assert!(outcome.is_success());
        assert!(dest.is_file());
    }

    #[tokio::test]
    async fn purge_is_idempotent_and_selective() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.dll"), b"").unwrap();
        std::fs::write(dir.path().join("b.dll"), b"").unwrap();
        std::fs::write(dir.path().join("keep.exe"), b"").unwrap();

        let outcome = purge_matching(dir.path(), "*.dll").await.unwrap();
        assert!(outcome.is_success());
        assert!(!dir.path().join("a.dll").exists());
        assert!(dir.path().join("keep.exe").exists());

        // Second purge finds nothing and still succeeds.
        let outcome = purge_matching(dir.path(), "*.dll").await.unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn move_file_removes_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("lumen.exe");
        std::fs::write(&src, b"bin").unwrap();

        let dest = dir.path().join("bin/lumen.exe");
        move_file(&src, &dest).await.unwrap();
        assert!(!src.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"bin");
    }
}
