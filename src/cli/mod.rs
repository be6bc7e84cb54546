//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Install the `tracing` subscriber
//! - Load configuration and the API token
//! - Drive the [`crate::engine`] on a tokio runtime
//! - Report the plan or the journal, and save the journal if asked
//!
//! # Architecture
//!
//! The CLI layer is thin. Argument parsing lives in [`args`]; everything
//! that touches a remote happens in the engine.

pub mod args;

pub use args::Cli;

use anyhow::{Context as _, Result};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Config;
use crate::core::journal::Journal;
use crate::core::types::ReleaseName;
use crate::engine::{prepare, Runner};
use crate::forge::GitHubForge;
use crate::secrets::{self, KeychainSecretStore};
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_tracing(verbosity);

    let release = ReleaseName::new(cli.release.as_str())?;
    let loaded = Config::load(cli.config.as_deref())?;
    match &loaded.path {
        Some(path) => debug!("Using config {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }
    let config = loaded.config;
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;

    if cli.dry_run {
        let prepared = runtime.block_on(prepare(&config, &release))?;
        output::print_plan(&prepared.plan, verbosity);
        return Ok(());
    }

    let store = KeychainSecretStore::new(config.credentials.service.as_str());
    let token = secrets::load_token(&store, &config.credentials)
        .context("no GitHub API token in the keychain")?;
    let forge = GitHubForge::with_api_base(token, config.github.api_base.as_str());

    let mut runner = Runner::new(&config, release, &forge);
    let result = runtime.block_on(runner.run());
    let journal = runner.into_journal();

    if let Some(path) = &cli.journal {
        save_journal(&journal, path)?;
    }

    match result {
        Ok(_) => {
            output::print_summary(&journal, verbosity);
            Ok(())
        }
        Err(err) => {
            output::print_partial(&journal);
            Err(err)
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}

fn save_journal(journal: &Journal, path: &std::path::Path) -> Result<()> {
    journal
        .write(path)
        .with_context(|| format!("failed to write journal to {}", path.display()))?;
    debug!("Journal written to {}", path.display());
    Ok(())
}
