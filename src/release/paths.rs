//! Resolution of every directory and file path used by the pipeline.

use super::arch::{Arch, PerArch};
use std::path::{Path, PathBuf};

/// Name of the qmake project file that marks the Lumen repository root.
pub const PROJECT_MARKER: &str = "lumen.pro";

/// Subdirectory of the repository where the whole release is assembled.
pub const PACKAGE_DIR_NAME: &str = "build-for-release";

/// All paths used by the release pipeline, resolved once per run from the
/// repository root and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct PathSet {
    /// Lumen repository root (where `lumen.pro` lives)
    pub repo_dir: PathBuf,
    /// Base directory the release is assembled in
    pub pkg_base_dir: PathBuf,
    /// Per-architecture compile directories
    pub build_dir: PerArch<PathBuf>,
    /// Per-architecture directories for finished binaries and data files
    pub bin_dir: PerArch<PathBuf>,
    /// Per-architecture Inno Setup script templates
    pub iss_file: PerArch<PathBuf>,
    /// Changelog shipped with the release
    pub changelog_file: PathBuf,
    /// License file referenced by the installer
    pub license_file: PathBuf,
    /// Mercurial style template producing the short release date
    pub date_style_file: PathBuf,
    /// Mercurial style template producing the full version string
    pub version_style_file: PathBuf,
}

impl PathSet {
    /// Computes the full path set from the repository root.
    pub fn resolve(repo_dir: &Path) -> PathSet {
        let repo_dir = repo_dir.to_path_buf();
        let pkg_base_dir = repo_dir.join(PACKAGE_DIR_NAME);
        let installer_dir = repo_dir.join("win-installer");
        let scripts_dir = repo_dir.join("scripts");

        PathSet {
            build_dir: PerArch::from_fn(|a| pkg_base_dir.join(format!("build-{}", a.name()))),
            bin_dir: PerArch::from_fn(|a| pkg_base_dir.join(format!("bin-{}", a.name()))),
            iss_file: PerArch::from_fn(|a| {
                installer_dir.join(format!("lumen-setup-{}.iss", a.name()))
            }),
            changelog_file: repo_dir.join("Changelog.txt"),
            license_file: repo_dir.join("LICENSE.txt"),
            date_style_file: scripts_dir.join("hg-shortdate.style"),
            version_style_file: scripts_dir.join("hg-revdatenum.style"),
            pkg_base_dir,
            repo_dir,
        }
    }

    /// Base name (no extension) of an architecture's installer artifact.
    pub fn installer_base_name(release_date: &str, arch: Arch) -> String {
        format!("lumen-setup-{}-{}", release_date, arch.name())
    }

    /// Full path of an architecture's final installer executable.
    pub fn installer_file(&self, release_date: &str, arch: Arch) -> PathBuf {
        self.pkg_base_dir
            .join(Self::installer_base_name(release_date, arch) + ".exe")
    }
}
