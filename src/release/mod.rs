//! Release pipeline components.
//!
//! Leaves first: path and manifest resolution are pure data; the
//! synchronizers, preparer and gate operate on the filesystem; the
//! orchestrator sequences everything per architecture.

pub mod arch;
pub mod build;
pub mod cleanup;
pub mod datasync;
pub mod gate;
pub mod installer;
pub mod libsync;
pub mod manifest;
pub mod orchestrator;
pub mod outcome;
pub mod paths;
pub mod prepare;
pub mod summary;
pub mod sync;
pub mod toolchain;
pub mod validate;
pub mod vcs;

pub use arch::{Arch, PerArch};
pub use orchestrator::ReleaseBuilder;
pub use outcome::Outcome;
pub use paths::PathSet;
