//! Release configuration loaded from `release.toml`.
//!
//! The file carries two sections: `[commands]` overrides the identifiers used
//! to invoke the external tools, `[paths]` locates the per-architecture
//! toolchain roots (required) and an optional archive directory that post-run
//! cleanup moves the finished installers into.
//!
//! ```toml
//! [commands]
//! make = "mingw32-make"
//!
//! [paths]
//! win32 = 'C:\mingw32'
//! win64 = 'C:\mingw64'
//! archive = 'D:\releases'
//! ```

use crate::error::{ReleaseError, Result};
use crate::release::arch::PerArch;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// External tool identifiers used by the pipeline.
///
/// Each may be a bare command name resolved through `PATH` or an absolute
/// path.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Commands {
    /// Build configuration generator
    pub qmake: String,
    /// Native build tool
    pub make: String,
    /// Version control tool
    pub hg: String,
    /// Installer compiler (Inno Setup)
    pub iscc: String,
    /// Debug symbol stripper
    pub strip: String,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            qmake: "qmake".into(),
            make: "mingw32-make".into(),
            hg: "hg".into(),
            iscc: "iscc".into(),
            strip: "strip".into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPaths {
    win32: PathBuf,
    win64: PathBuf,
    archive: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    commands: Commands,
    paths: RawPaths,
}

/// Validated release configuration, constructed once per run and passed by
/// reference into every component that needs it.
#[derive(Clone, Debug)]
pub struct ReleaseConfig {
    /// External tool identifiers
    pub commands: Commands,
    /// Per-architecture toolchain root directories
    pub toolchain_dir: PerArch<PathBuf>,
    /// Optional directory the installers are archived into during cleanup
    pub archive_dir: Option<PathBuf>,
}

impl ReleaseConfig {
    /// Loads and validates the configuration file.
    ///
    /// The file itself is required: without the `[paths]` section the
    /// per-architecture toolchain roots cannot be known.
    pub fn load(path: &Path) -> Result<ReleaseConfig> {
        let text = std::fs::read_to_string(path).map_err(|e| ReleaseError::Config {
            path: path.to_path_buf(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::parse(&text).map_err(|reason| ReleaseError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(text: &str) -> std::result::Result<ReleaseConfig, String> {
        let raw: RawConfig = toml::from_str(text).map_err(|e| e.to_string())?;

        if raw.paths.win32.as_os_str().is_empty() || raw.paths.win64.as_os_str().is_empty() {
            return Err("[paths] win32 and win64 must not be empty".into());
        }

        Ok(ReleaseConfig {
            commands: raw.commands,
            toolchain_dir: PerArch {
                win32: raw.paths.win32,
                win64: raw.paths.win64,
            },
            archive_dir: raw.paths.archive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::arch::Arch;

    #[test]
    fn parses_full_config() {
        let cfg = ReleaseConfig::parse(
            r#"
            [commands]
            make = "make"
            iscc = "/opt/innosetup/iscc"

            [paths]
            win32 = "/opt/mingw32"
            win64 = "/opt/mingw64"
            archive = "/srv/releases"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.commands.make, "make");
        assert_eq!(cfg.commands.iscc, "/opt/innosetup/iscc");
        assert_eq!(cfg.commands.qmake, "qmake");
        assert_eq!(cfg.toolchain_dir.get(Arch::Win64), Path::new("/opt/mingw64"));
        assert_eq!(cfg.archive_dir.as_deref(), Some(Path::new("/srv/releases")));
    }

    #[test]
    fn commands_section_is_optional_with_defaults() {
        let cfg = ReleaseConfig::parse(
            r#"
            [paths]
            win32 = "/opt/mingw32"
            win64 = "/opt/mingw64"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.commands.hg, "hg");
        assert_eq!(cfg.commands.strip, "strip");
        assert!(cfg.archive_dir.is_none());
    }

    #[test]
    fn missing_paths_section_is_rejected() {
        assert!(ReleaseConfig::parse("[commands]\nmake = \"make\"\n").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ReleaseConfig::parse(
            r#"
            [paths]
            win32 = "/a"
            win64 = "/b"
            win128 = "/c"
            "#,
        )
        .unwrap_err();
        assert!(err.contains("win128"));
    }
}
