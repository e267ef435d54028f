//! Exclusive toolchain selection.
//!
//! Which architecture's compiler and libraries are active is a host-global
//! choice, so builds for different architectures must never overlap. The
//! context is modeled as a resource: acquiring it takes a process-wide lock
//! held for the duration of the architecture's build phase, and the selected
//! search path is handed to build subprocesses explicitly instead of
//! mutating the ambient environment.

use super::arch::Arch;
use crate::config::ReleaseConfig;
use std::ffi::OsString;
use tokio::sync::{Mutex, MutexGuard};

// The guard is held across the build subprocess awaits, so the lock must be
// an async-aware one.
static TOOLCHAIN_LOCK: Mutex<()> = Mutex::const_new(());

/// Exclusive hold on the toolchain selection for one architecture.
pub struct ToolchainContext {
    arch: Arch,
    search_path: OsString,
    _guard: MutexGuard<'static, ()>,
}

impl ToolchainContext {
    /// Acquires the toolchain for `arch`, waiting until no other context is
    /// active.
    pub async fn acquire(arch: Arch, config: &ReleaseConfig) -> ToolchainContext {
        let guard = TOOLCHAIN_LOCK.lock().await;

        let toolchain_bin = config.toolchain_dir.get(arch).join("bin");
        log::info!(
            "toolchain for {} selected: {}",
            arch,
            toolchain_bin.display()
        );

        let mut search_path = OsString::from(toolchain_bin);
        if let Some(existing) = std::env::var_os("PATH") {
            search_path.push(path_separator());
            search_path.push(existing);
        }

        ToolchainContext {
            arch,
            search_path,
            _guard: guard,
        }
    }

    /// Architecture this context is selected for.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// `PATH` value build subprocesses must run with.
    pub fn search_path(&self) -> &std::ffi::OsStr {
        &self.search_path
    }
}

fn path_separator() -> &'static str {
    if cfg!(windows) { ";" } else { ":" }
}
