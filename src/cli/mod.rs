//! Command line entry point.
//!
//! Sequences the whole run: sentinel check, configuration, environment
//! validation, directory preparation, the per-architecture build loop, the
//! final summary and the optional cleanup.

mod args;

pub use args::Args;

use crate::config::{CONFIG_FILE_NAME, ReleaseConfig};
use crate::console::{Prompter, TerminalPrompter};
use crate::error::Result;
use crate::release::paths::PROJECT_MARKER;
use crate::release::{PathSet, ReleaseBuilder, cleanup, prepare, validate};

const DIVIDER: &str =
    "------------------------------------------------------------------------------";

/// Main CLI entry point; returns the process exit code.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    println!("\nLumen for Windows package builder {}", env!("CARGO_PKG_VERSION"));
    println!("{DIVIDER}\n");

    let cwd = std::env::current_dir()?;
    if !cwd.join(PROJECT_MARKER).is_file() {
        eprintln!("ERROR: Lumen repository not found. Please run this tool from the folder");
        eprintln!("where \"{PROJECT_MARKER}\" is located.");
        return Ok(1);
    }

    let config_path = args
        .config
        .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));
    let config = match ReleaseConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return Ok(1);
        }
    };

    let paths = PathSet::resolve(&cwd);
    let mut prompter = TerminalPrompter;

    match run_pipeline(&config, &paths, &mut prompter).await? {
        Some(release_date) => {
            offer_cleanup(&config, &paths, &release_date, &mut prompter).await
        }
        None => Ok(1),
    }
}

/// Runs validation, preparation, the build loop and the summary. Returns the
/// release date token on full success, `None` on any fatal outcome.
async fn run_pipeline(
    config: &ReleaseConfig,
    paths: &PathSet,
    prompter: &mut dyn Prompter,
) -> Result<Option<String>> {
    let verdict = validate::check_build_env(config, paths, prompter).await?;
    if verdict.is_fatal() {
        return Ok(None);
    }

    let verdict = prepare::prepare_dirs(paths).await;
    if verdict.is_fatal() {
        eprintln!("ERROR: {}", verdict.diagnostic().unwrap_or(""));
        return Ok(None);
    }

    let mut builder = ReleaseBuilder::new(config, paths, prompter).await?;
    let built = builder.run().await?;
    if built.is_fatal() {
        log::error!("release build failed: {}", built.diagnostic().unwrap_or(""));
    }

    // The summary runs even after a failed build so the operator sees which
    // artifacts are missing; its success branch is only reachable when the
    // build loop finished without a fatal outcome.
    let summarized = builder.show_summary().await?;
    if built.is_fatal() || summarized.is_fatal() {
        return Ok(None);
    }

    Ok(Some(builder.release_date().to_string()))
}

async fn offer_cleanup(
    config: &ReleaseConfig,
    paths: &PathSet,
    release_date: &str,
    prompter: &mut dyn Prompter,
) -> Result<i32> {
    println!("Everything looks fine. You can test and upload the release now.");
    println!("\nAfterwards I can clean up automatically, i.e.:");
    match &config.archive_dir {
        Some(archive) => {
            println!("* move installers to {}", archive.display());
            println!("* delete everything else created during the build process");
        }
        None => {
            println!("* delete everything created during the build process except");
            println!("  the two installers");
        }
    }

    if prompter.confirm("\nShall I clean up now?")? {
        let cleaned = cleanup::clean_up(config, paths, release_date).await;
        if let Some(diag) = cleaned.diagnostic() {
            eprintln!("ERROR: {diag}");
            return Ok(1);
        }
    } else {
        println!("OK. The mess stays.");
    }

    println!("All done.");
    Ok(0)
}
