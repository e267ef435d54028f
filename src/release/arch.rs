//! Target architecture types and utilities.

/// Target architecture for a release build.
///
/// The release pipeline builds and packages each variant independently and
/// strictly in sequence, because toolchain selection is a host-global switch
/// (see [`crate::release::toolchain`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// 32-bit Windows (MinGW i686 toolchain)
    Win32,
    /// 64-bit Windows (MinGW x86_64 toolchain)
    Win64,
}

impl Arch {
    /// All supported architectures, in build order.
    pub const ALL: [Arch; 2] = [Arch::Win32, Arch::Win64];

    /// Display name used in directory and artifact naming.
    pub fn name(self) -> &'static str {
        match self {
            Arch::Win32 => "win32",
            Arch::Win64 => "win64",
        }
    }

    /// Bit-width string used in artifact naming.
    pub fn bits(self) -> &'static str {
        match self {
            Arch::Win32 => "32",
            Arch::Win64 => "64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A total map from [`Arch`] to `T`.
///
/// Both variants are always present, so per-architecture lookups can never
/// miss the way index-based tables can.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct PerArch<T> {
    /// Value for [`Arch::Win32`]
    pub win32: T,
    /// Value for [`Arch::Win64`]
    pub win64: T,
}

impl<T> PerArch<T> {
    /// Builds the map by evaluating `f` for each architecture.
    pub fn from_fn(mut f: impl FnMut(Arch) -> T) -> Self {
        Self {
            win32: f(Arch::Win32),
            win64: f(Arch::Win64),
        }
    }

    /// Returns the value for `arch`.
    pub fn get(&self, arch: Arch) -> &T {
        match arch {
            Arch::Win32 => &self.win32,
            Arch::Win64 => &self.win64,
        }
    }
}
