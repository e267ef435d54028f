//! Release build orchestration.
//!
//! Sequences the per-architecture pipeline: toolchain selection, compile,
//! library and data synchronization, the changelog gate, symbol stripping
//! and installer generation. Aggregation of step outcomes is monotonic: a
//! fatal step stops the remaining architectures immediately, so no partial
//! release is ever presented as publishable.

use super::arch::Arch;
use super::outcome::Outcome;
use super::paths::PathSet;
use super::toolchain::ToolchainContext;
use super::vcs::Vcs;
use super::{build, datasync, gate, installer, libsync, summary, validate};
use crate::config::ReleaseConfig;
use crate::console::Prompter;
use crate::error::Result;
use std::path::PathBuf;

/// Drives one full release run across all architectures.
pub struct ReleaseBuilder<'a> {
    config: &'a ReleaseConfig,
    paths: &'a PathSet,
    prompter: &'a mut dyn Prompter,
    vcs: Vcs,
    branch: String,
    release_date: String,
    devkit: PathBuf,
    /// Full version string, queried once on first installer generation.
    version: Option<String>,
    /// The changelog gate runs once per run, before the first data sync.
    changelog_checked: bool,
}

impl<'a> ReleaseBuilder<'a> {
    /// Queries the release metadata and constructs the builder.
    ///
    /// The devkit location must have been validated beforehand (see
    /// [`validate::check_build_env`]).
    pub async fn new(
        config: &'a ReleaseConfig,
        paths: &'a PathSet,
        prompter: &'a mut dyn Prompter,
    ) -> Result<ReleaseBuilder<'a>> {
        let vcs = Vcs::new(&config.commands.hg);
        let branch = vcs.branch().await?;
        let release_date = vcs.styled_log(&branch, &paths.date_style_file).await?;
        let devkit = validate::devkit_dir().map_err(std::io::Error::other)?;

        Ok(ReleaseBuilder {
            config,
            paths,
            prompter,
            vcs,
            branch,
            release_date,
            devkit,
            version: None,
            changelog_checked: false,
        })
    }

    /// Release date token used in artifact names.
    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    /// Builds, packages and creates the installer for every architecture in
    /// order, stopping at the first fatal outcome.
    pub async fn run(&mut self) -> Result<Outcome> {
        let mut verdict = Outcome::Success;

        for arch in Arch::ALL {
            verdict = verdict.merge(self.build_arch(arch).await?);
            if verdict.is_fatal() {
                return Ok(verdict);
            }

            verdict = verdict.merge(self.package_arch(arch).await?);
            if verdict.is_fatal() {
                return Ok(verdict);
            }

            verdict = verdict.merge(self.create_installer(arch).await?);
            if verdict.is_fatal() {
                return Ok(verdict);
            }
        }

        Ok(verdict)
    }

    /// Prints the final status report; success requires both installers.
    pub async fn show_summary(&self) -> Result<Outcome> {
        summary::show_summary(self.paths, &self.vcs, &self.branch, &self.release_date).await
    }

    async fn build_arch(&mut self, arch: Arch) -> Result<Outcome> {
        let ctx = ToolchainContext::acquire(arch, self.config).await;
        build::build_binaries(self.config, self.paths, &ctx).await
    }

    async fn package_arch(&mut self, arch: Arch) -> Result<Outcome> {
        println!("Packaging files ({arch}) ...");
        let bin_dir = self.paths.bin_dir.get(arch);

        let mut verdict =
            libsync::sync_libraries(&self.devkit, bin_dir, arch).await?;
        if verdict.is_fatal() {
            return Ok(verdict);
        }

        if !self.changelog_checked {
            verdict = verdict
                .merge(gate::ensure_changelog_fresh(&self.paths.changelog_file, self.prompter).await?);
            self.changelog_checked = true;
        }

        verdict = verdict.merge(datasync::sync_data(&self.paths.repo_dir, bin_dir).await?);
        if verdict.is_fatal() {
            return Ok(verdict);
        }

        // Strip failures only cost size; the verdict stays recoverable.
        Ok(verdict.merge(build::strip_binaries(self.config, bin_dir).await?))
    }

    async fn create_installer(&mut self, arch: Arch) -> Result<Outcome> {
        println!("Creating installer ({arch}) ...");

        let version = match &self.version {
            Some(v) => v.clone(),
            None => {
                let v = self
                    .vcs
                    .styled_log(&self.branch, &self.paths.version_style_file)
                    .await?;
                self.version = Some(v.clone());
                v
            }
        };

        let template = tokio::fs::read_to_string(self.paths.iss_file.get(arch)).await?;
        let values = installer::InstallerValues {
            version,
            changelog_file: self.paths.changelog_file.display().to_string(),
            output_base_name: PathSet::installer_base_name(&self.release_date, arch),
            bin_dir: self.paths.bin_dir.get(arch).display().to_string(),
        };
        let script = installer::render_script(&template, &values)?;

        let compiled =
            installer::compile_installer(&self.config.commands.iscc, &script, &self.paths.pkg_base_dir)
                .await?;
        if compiled.is_fatal() {
            eprintln!("ERROR: Creating installer ({arch}) failed.");
        }
        Ok(compiled)
    }
}
