//! Static manifest of third-party shared libraries shipped per architecture.
//!
//! Three origin categories: the MinGW runtime (from the active toolchain),
//! the Qt framework (including plugins that nest below the binary dir), and
//! the third-party developer libraries Lumen links against.

use super::arch::Arch;
use super::sync::CopyTask;
use std::path::{Path, PathBuf};

/// One shared library to ship.
#[derive(Clone, Copy, Debug)]
pub struct LibFile {
    /// Path relative to the category source root. A `/` separator means the
    /// file keeps that subdirectory below the destination root (Qt plugins).
    pub path: &'static str,
    /// Variant suffix carried by the source file name, inserted before the
    /// extension. The destination always uses the canonical name, so one
    /// source tree can carry several build flavors of the same library.
    pub variant: Option<&'static str>,
}

impl LibFile {
    const fn flat(path: &'static str) -> Self {
        Self {
            path,
            variant: None,
        }
    }

    const fn variant(path: &'static str, suffix: &'static str) -> Self {
        Self {
            path,
            variant: Some(suffix),
        }
    }

    /// File name of the source artifact (variant suffix applied).
    pub fn source_name(&self) -> String {
        match self.variant {
            None => self.path.to_string(),
            Some(suffix) => match self.path.rsplit_once('.') {
                Some((stem, ext)) => format!("{stem}{suffix}.{ext}"),
                None => format!("{}{}", self.path, suffix),
            },
        }
    }
}

/// Per-architecture library manifest, grouped by origin.
#[derive(Clone, Copy, Debug)]
pub struct LibraryManifest {
    /// MinGW runtime libraries, copied flat
    pub mingw: &'static [LibFile],
    /// Qt libraries and plugins; nested entries keep their subdirectory
    pub qt: &'static [LibFile],
    /// Third-party developer libraries, copied flat
    pub dev: &'static [LibFile],
}

const QT_COMMON: &[LibFile] = &[
    LibFile::flat("Qt5Core.dll"),
    LibFile::flat("Qt5Gui.dll"),
    LibFile::flat("Qt5Network.dll"),
    LibFile::flat("Qt5Widgets.dll"),
    LibFile::flat("libEGL.dll"),
    LibFile::flat("libGLESv2.dll"),
    LibFile::flat("plugins/platforms/qwindows.dll"),
    LibFile::flat("plugins/imageformats/qjpeg.dll"),
    LibFile::flat("plugins/imageformats/qtiff.dll"),
];

const MANIFEST_WIN32: LibraryManifest = LibraryManifest {
    mingw: &[
        LibFile::flat("libgcc_s_dw2-1.dll"),
        LibFile::flat("libgomp-1.dll"),
        LibFile::flat("libstdc++-6.dll"),
        LibFile::flat("libwinpthread-1.dll"),
    ],
    qt: QT_COMMON,
    dev: &[
        // FFTW ships one source tree with per-width flavors
        LibFile::variant("libfftw3-3.dll", "_32"),
        LibFile::flat("libexiv2.dll"),
        LibFile::flat("libexpat-1.dll"),
        LibFile::flat("libiconv-2.dll"),
        LibFile::flat("libjpeg-8.dll"),
        LibFile::flat("liblcms2-2.dll"),
        LibFile::flat("liblensfun.dll"),
        LibFile::flat("libpng15.dll"),
        LibFile::flat("libtiff-5.dll"),
        LibFile::flat("zlib1.dll"),
    ],
};

const MANIFEST_WIN64: LibraryManifest = LibraryManifest {
    mingw: &[
        LibFile::flat("libgcc_s_seh-1.dll"),
        LibFile::flat("libglib-2.0-0.dll"),
        LibFile::flat("libgomp-1.dll"),
        LibFile::flat("libstdc++-6.dll"),
        LibFile::flat("libwinpthread-1.dll"),
    ],
    qt: QT_COMMON,
    dev: &[
        LibFile::variant("libfftw3-3.dll", "_64"),
        LibFile::flat("libexiv2.dll"),
        LibFile::flat("libexpat-1.dll"),
        LibFile::flat("libGraphicsMagick++-3.dll"),
        LibFile::flat("libGraphicsMagick-3.dll"),
        LibFile::flat("libGraphicsMagickWand-2.dll"),
        LibFile::flat("libiconv-2.dll"),
        LibFile::flat("libintl-8.dll"),
        LibFile::flat("libjpeg-8.dll"),
        LibFile::flat("liblcms2-2.dll"),
        LibFile::flat("liblensfun.dll"),
        LibFile::flat("liblqr-1-0.dll"),
        LibFile::flat("libpng15.dll"),
        LibFile::flat("libtiff-5.dll"),
        LibFile::flat("libtiffxx-5.dll"),
        LibFile::flat("zlib1.dll"),
    ],
};

/// Returns the static manifest for `arch`.
pub fn manifest_for(arch: Arch) -> LibraryManifest {
    match arch {
        Arch::Win32 => MANIFEST_WIN32,
        Arch::Win64 => MANIFEST_WIN64,
    }
}

/// Source roots the manifest categories resolve against.
#[derive(Clone, Debug)]
pub struct LibraryRoots {
    /// MinGW runtime bin directory
    pub mingw: PathBuf,
    /// Qt bin directory (plugins nest below it)
    pub qt: PathBuf,
    /// Developer library bin directory
    pub dev: PathBuf,
}

impl LibraryRoots {
    /// Resolves the per-architecture roots below the devkit base directory.
    pub fn resolve(devkit: &Path, arch: Arch) -> LibraryRoots {
        let base = devkit.join(arch.name());
        LibraryRoots {
            mingw: base.join("mingw").join("bin"),
            qt: base.join("qt").join("bin"),
            dev: base.join("bin"),
        }
    }
}

/// Resolves a manifest into copy tasks against `roots`, destined for
/// `dest_dir`.
///
/// MinGW and dev entries land flat in the destination root; Qt entries keep
/// any subdirectory their descriptor carries. Exactly one task is produced
/// per descriptor.
pub fn resolve_tasks(
    manifest: &LibraryManifest,
    roots: &LibraryRoots,
    dest_dir: &Path,
) -> Vec<CopyTask> {
    let mut tasks = Vec::new();

    for file in manifest.mingw {
        tasks.push(flat_task(&roots.mingw, file, dest_dir));
    }
    for file in manifest.qt {
        tasks.push(nested_task(&roots.qt, file, dest_dir));
    }
    for file in manifest.dev {
        tasks.push(flat_task(&roots.dev, file, dest_dir));
    }

    tasks
}

fn flat_task(root: &Path, file: &LibFile, dest_dir: &Path) -> CopyTask {
    let canonical = file
        .path
        .rsplit('/')
        .next()
        .unwrap_or(file.path);
    CopyTask {
        src: root.join(file.source_name()),
        dest: dest_dir.join(canonical),
    }
}

fn nested_task(root: &Path, file: &LibFile, dest_dir: &Path) -> CopyTask {
    let mut dest = dest_dir.to_path_buf();
    for part in file.path.split('/') {
        dest.push(part);
    }
    CopyTask {
        src: root.join(file.source_name()),
        dest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_descriptor_resolves_to_exactly_one_task() {
        for arch in Arch::ALL {
            let manifest = manifest_for(arch);
            let roots = LibraryRoots::resolve(Path::new("/devkit"), arch);
            let tasks = resolve_tasks(&manifest, &roots, Path::new("/out"));
            assert_eq!(
                tasks.len(),
                manifest.mingw.len() + manifest.qt.len() + manifest.dev.len()
            );
        }
    }

    #[test]
    fn qt_plugins_keep_their_subdirectory() {
        let manifest = manifest_for(Arch::Win64);
        let roots = LibraryRoots::resolve(Path::new("/devkit"), Arch::Win64);
        let tasks = resolve_tasks(&manifest, &roots, Path::new("/out"));

        let plugin = tasks
            .iter()
            .find(|t| t.src.ends_with("plugins/platforms/qwindows.dll"))
            .unwrap();
        assert_eq!(plugin.dest, Path::new("/out/plugins/platforms/qwindows.dll"));
        assert!(plugin.src.starts_with("/devkit/win64/qt/bin"));
    }

    #[test]
    fn variant_suffix_renames_on_copy() {
        let file = LibFile::variant("libfftw3-3.dll", "_64");
        assert_eq!(file.source_name(), "libfftw3-3_64.dll");

        let task = flat_task(Path::new("/src"), &file, Path::new("/out"));
        assert_eq!(task.src, Path::new("/src/libfftw3-3_64.dll"));
        assert_eq!(task.dest, Path::new("/out/libfftw3-3.dll"));
    }

    #[test]
    fn roots_follow_devkit_layout() {
        let roots = LibraryRoots::resolve(Path::new("/devkit"), Arch::Win32);
        assert_eq!(roots.mingw, Path::new("/devkit/win32/mingw/bin"));
        assert_eq!(roots.qt, Path::new("/devkit/win32/qt/bin"));
        assert_eq!(roots.dev, Path::new("/devkit/win32/bin"));
    }
}
