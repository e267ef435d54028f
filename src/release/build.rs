//! Per-architecture compile step and binary placement.

use super::outcome::Outcome;
use super::paths::PathSet;
use super::sync;
use super::toolchain::ToolchainContext;
use crate::config::ReleaseConfig;
use crate::error::Result;
use crate::process;
use std::path::Path;

/// Primary application binary produced by the build.
pub const PRIMARY_BINARY: &str = "lumen.exe";
/// Auxiliary settings-reset helper shipped alongside it.
pub const AUXILIARY_BINARY: &str = "lumen-clear.exe";

/// Builds Lumen for the context's architecture and places the binaries into
/// the bin directory.
///
/// The build tools may exit zero while skipping a target, so success
/// additionally requires both expected binaries to exist in the build
/// directory afterward.
pub async fn build_binaries(
    config: &ReleaseConfig,
    paths: &PathSet,
    ctx: &ToolchainContext,
) -> Result<Outcome> {
    let arch = ctx.arch();
    let build_dir = paths.build_dir.get(arch);
    let bin_dir = paths.bin_dir.get(arch);
    let envs = [("PATH", ctx.search_path())];

    println!("Building Lumen ({arch}) ...");

    let project = paths.repo_dir.join(super::paths::PROJECT_MARKER);
    let project = project.to_string_lossy().into_owned();

    let configured = process::run_tool(
        &config.commands.qmake,
        &[project.as_str(), "CONFIG+=release", "CONFIG-=debug"],
        Some(build_dir.as_path()),
        &envs,
    )
    .await?;
    let compiled = configured
        && process::run_tool(&config.commands.make, &[], Some(build_dir.as_path()), &envs).await?;

    let primary = build_dir.join(PRIMARY_BINARY);
    let auxiliary = build_dir.join(AUXILIARY_BINARY);
    if !compiled || !primary.is_file() || !auxiliary.is_file() {
        eprintln!("ERROR: Building Lumen failed.");
        return Ok(Outcome::fatal(format!("building Lumen ({arch}) failed")));
    }

    if let Err(e) = place_binaries(&primary, &auxiliary, bin_dir).await {
        eprintln!(
            "ERROR: Copying binaries to \"{}\" failed.",
            bin_dir.display()
        );
        return Ok(Outcome::fatal(format!(
            "copying binaries to {} failed: {e}",
            bin_dir.display()
        )));
    }

    Ok(Outcome::Success)
}

async fn place_binaries(primary: &Path, auxiliary: &Path, bin_dir: &Path) -> Result<()> {
    sync::move_file(primary, &bin_dir.join(PRIMARY_BINARY)).await?;
    tokio::fs::copy(auxiliary, bin_dir.join(AUXILIARY_BINARY)).await?;
    Ok(())
}

/// Strips debug symbols from every binary and library in `bin_dir`.
///
/// Failure only costs installer size, so it degrades to a warning instead of
/// failing the run.
pub async fn strip_binaries(config: &ReleaseConfig, bin_dir: &Path) -> Result<Outcome> {
    // Plugins nest below the bin directory, so the walk must recurse.
    let mut targets = Vec::new();
    for entry in walkdir::WalkDir::new(bin_dir) {
        let entry = entry.map_err(|e| std::io::Error::other(e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let strippable = entry.path().extension().is_some_and(|ext| {
            ext.eq_ignore_ascii_case("exe") || ext.eq_ignore_ascii_case("dll")
        });
        if strippable {
            targets.push(entry.path().to_string_lossy().into_owned());
        }
    }

    let mut verdict = Outcome::Success;
    for target in &targets {
        let stripped = process::run_tool(&config.commands.strip, &[target.as_str()], None, &[]).await;
        match stripped {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("stripping {target} failed; the artifact will be larger");
                verdict = verdict.merge(Outcome::Recoverable(format!("could not strip {target}")));
            }
            Err(e) => {
                log::warn!("strip did not run for {target}: {e}");
                verdict = verdict.merge(Outcome::Recoverable(format!("could not strip {target}")));
            }
        }
    }

    Ok(verdict)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::Commands;
    use crate::release::arch::{Arch, PerArch};
    use crate::release::paths::PathSet;

    fn stub_tool(dir: &Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    fn test_config(dir: &Path, qmake: String, make: String, strip: String) -> ReleaseConfig {
        ReleaseConfig {
            commands: Commands {
                qmake,
                make,
                strip,
                ..Default::default()
            },
            toolchain_dir: PerArch {
                win32: dir.join("toolchain32"),
                win64: dir.join("toolchain64"),
            },
            archive_dir: None,
        }
    }

    fn seed_tree(paths: &PathSet) {
        for arch in Arch::ALL {
            std::fs::create_dir_all(paths.build_dir.get(arch)).unwrap();
            std::fs::create_dir_all(paths.bin_dir.get(arch)).unwrap();
        }
    }

    #[tokio::test]
    async fn zero_exit_without_binaries_is_a_failed_build() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathSet::resolve(dir.path());
        seed_tree(&paths);

        // Both tools report success but produce nothing.
        let qmake = stub_tool(dir.path(), "qmake", "exit 0");
        let make = stub_tool(dir.path(), "make", "exit 0");
        let config = test_config(dir.path(), qmake, make, "strip".into());

        let ctx = ToolchainContext::acquire(Arch::Win64, &config).await;
        let outcome = build_binaries(&config, &paths, &ctx).await.unwrap();
        assert!(outcome.is_fatal());
        assert!(outcome.diagnostic().unwrap().contains("win64"));
    }

    #[tokio::test]
    async fn built_binaries_are_placed_into_the_bin_directory() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathSet::resolve(dir.path());
        seed_tree(&paths);

        let qmake = stub_tool(dir.path(), "qmake", "exit 0");
        // The build tools run inside the build directory.
        let make = stub_tool(
            dir.path(),
            "make",
            ": > lumen.exe\n: > lumen-clear.exe",
        );
        let config = test_config(dir.path(), qmake, make, "strip".into());

        let ctx = ToolchainContext::acquire(Arch::Win32, &config).await;
        let outcome = build_binaries(&config, &paths, &ctx).await.unwrap();
        assert!(outcome.is_success());

        let bin = paths.bin_dir.get(Arch::Win32);
        let build = paths.build_dir.get(Arch::Win32);
        assert!(bin.join(PRIMARY_BINARY).is_file());
        assert!(bin.join(AUXILIARY_BINARY).is_file());
        // The primary binary is moved, the auxiliary one copied.
        assert!(!build.join(PRIMARY_BINARY).exists());
        assert!(build.join(AUXILIARY_BINARY).is_file());
    }

    #[tokio::test]
    async fn strip_reaches_nested_plugin_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(bin.join("plugins/platforms")).unwrap();
        std::fs::create_dir_all(bin.join("Presets")).unwrap();
        std::fs::write(bin.join("lumen.exe"), b"").unwrap();
        std::fs::write(bin.join("Qt5Core.dll"), b"").unwrap();
        std::fs::write(bin.join("plugins/platforms/qwindows.dll"), b"").unwrap();
        std::fs::write(bin.join("Presets/default.cfg"), b"").unwrap();

        let log = dir.path().join("stripped.txt");
        let strip = stub_tool(
            dir.path(),
            "strip",
            &format!("echo \"$1\" >> {}", log.display()),
        );
        let config = test_config(dir.path(), "qmake".into(), "make".into(), strip);

        let outcome = strip_binaries(&config, &bin).await.unwrap();
        assert!(outcome.is_success());

        let stripped = std::fs::read_to_string(&log).unwrap();
        assert!(stripped.contains("lumen.exe"));
        assert!(stripped.contains("Qt5Core.dll"));
        assert!(stripped.contains("qwindows.dll"));
        assert!(!stripped.contains("default.cfg"));
    }

    #[tokio::test]
    async fn strip_failures_only_warn() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("lumen.exe"), b"").unwrap();

        let strip = stub_tool(dir.path(), "strip", "exit 1");
        let config = test_config(dir.path(), "qmake".into(), "make".into(), strip);

        let outcome = strip_binaries(&config, &bin).await.unwrap();
        assert!(matches!(outcome, Outcome::Recoverable(_)));
    }
}
