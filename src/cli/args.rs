//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Windows release builder for Lumen
#[derive(Parser, Debug)]
#[command(
    name = "lumen-release",
    version,
    about = "Builds, packages and creates the Lumen win32/win64 installers",
    long_about = "Builds both architecture variants of Lumen, assembles each into a \
self-contained program directory (binaries, shared libraries, bundled data) and drives \
the installer compiler to produce the distributable installer executables.

Run from the folder where \"lumen.pro\" is located.

Exit code 0 means validation, both builds, packaging and installer creation all succeeded."
)]
pub struct Args {
    /// Configuration file with [commands] and [paths] sections
    ///
    /// Defaults to release.toml in the current directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
