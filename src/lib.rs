//! Windows release builder for the Lumen image editor.
//!
//! Automates producing the packaged multi-architecture release: building the
//! win32 and win64 variants, assembling each into a self-contained program
//! directory (binary, shared libraries, bundled data) and driving the
//! installer compiler to produce the distributable installer executables.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod process;
pub mod release;

// Re-export commonly used types
pub use error::{ReleaseError, Result};
pub use release::{Arch, Outcome, PathSet, ReleaseBuilder};
