//! Installer script templating and compilation.
//!
//! The per-architecture Inno Setup script is a template carrying
//! `{{versionstring}}`, `{{changelogfile}}`, `{{outputbasename}}` and
//! `{{bindir}}` placeholders. Rendering is strict: an unrecognized
//! placeholder is an error rather than passing through unsubstituted. The
//! rendered script is piped to the installer compiler on stdin.

use super::outcome::Outcome;
use crate::error::{ReleaseError, Result};
use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Placeholder values substituted into the installer script.
#[derive(Clone, Debug)]
pub struct InstallerValues {
    /// Full version string from version control
    pub version: String,
    /// Path of the changelog shipped in the installer
    pub changelog_file: String,
    /// Base name (no extension) of the produced installer
    pub output_base_name: String,
    /// Directory holding the finished binaries and data
    pub bin_dir: String,
}

/// Renders the installer script template with `values`.
///
/// Every occurrence of every placeholder is replaced, independent of order
/// or multiplicity; unknown placeholders fail the render.
pub fn render_script(template: &str, values: &InstallerValues) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    let mut data = BTreeMap::new();
    data.insert("versionstring", values.version.as_str());
    data.insert("changelogfile", values.changelog_file.as_str());
    data.insert("outputbasename", values.output_base_name.as_str());
    data.insert("bindir", values.bin_dir.as_str());

    handlebars
        .render_template(template, &data)
        .map_err(|e| ReleaseError::Template(e.to_string()))
}

/// Compiles a rendered installer script by piping it to the installer
/// compiler, which writes its output into `output_dir`.
///
/// Success is exactly a zero exit code.
pub async fn compile_installer(iscc: &str, script: &str, output_dir: &Path) -> Result<Outcome> {
    let out_flag = format!("/O{}", output_dir.display());

    // "-" tells the compiler to read the script from standard input.
    let mut child = Command::new(iscc)
        .arg(&out_flag)
        .arg("-")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ReleaseError::CommandFailed {
            command: iscc.to_string(),
            source: e,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        let fed = async {
            stdin.write_all(script.as_bytes()).await?;
            stdin.shutdown().await
        }
        .await;
        // A compiler that rejects the invocation exits before reading the
        // script; the exit status is the verdict either way.
        if let Err(e) = fed {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }

    let status = child.wait().await.map_err(|e| ReleaseError::CommandFailed {
        command: iscc.to_string(),
        source: e,
    })?;

    Ok(if status.success() {
        Outcome::Success
    } else {
        Outcome::fatal(format!(
            "installer compiler exited with status {:?}",
            status.code()
        ))
    })
}
