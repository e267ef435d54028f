//! Mercurial queries used by the pipeline.
//!
//! Every invocation sets `HGPLAIN=true` so output parsing is immune to the
//! operator's locale and extensions.

use crate::error::Result;
use crate::process;
use std::ffi::OsStr;
use std::path::Path;

/// Thin wrapper around the configured Mercurial command.
#[derive(Clone, Debug)]
pub struct Vcs {
    hg: String,
}

impl Vcs {
    /// Creates a wrapper using the configured `hg` identifier.
    pub fn new(hg: &str) -> Self {
        Self { hg: hg.to_string() }
    }

    fn plain() -> [(&'static str, &'static OsStr); 1] {
        [("HGPLAIN", OsStr::new("true"))]
    }

    /// Name of the branch the working copy is on.
    pub async fn branch(&self) -> Result<String> {
        process::tool_output(&self.hg, &["branch"], &Self::plain()).await
    }

    /// True iff the working copy has no uncommitted changes.
    pub async fn is_clean(&self) -> Result<bool> {
        let summary = process::tool_output(&self.hg, &["summary"], &Self::plain()).await?;
        Ok(summary.contains("commit: (clean)"))
    }

    /// `hg status` lines, one per modified/untracked entry.
    pub async fn status_lines(&self) -> Result<Vec<String>> {
        let status = process::tool_output(&self.hg, &["status"], &Self::plain()).await?;
        Ok(status
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Latest changeset of `branch` rendered through a style template.
    pub async fn styled_log(&self, branch: &str, style_file: &Path) -> Result<String> {
        let style = style_file.display().to_string();
        process::tool_output(
            &self.hg,
            &["log", "-b", branch, "-l", "1", "--style", style.as_str()],
            &Self::plain(),
        )
        .await
    }

    /// Prints the latest changeset description of `branch` to the terminal.
    pub async fn print_last_change(&self, branch: &str) -> Result<bool> {
        process::run_tool(
            &self.hg,
            &["log", "-b", branch, "-l", "1"],
            None,
            &Self::plain(),
        )
        .await
    }
}
