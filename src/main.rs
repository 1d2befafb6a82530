//! CLI entry point for the wayback-utils tool.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use wayback_utils::{
    PocketClient, PocketCredentials, Reconciler, RedirectExpander, SubmitEngine, UrlSetFile,
    WaybackClient,
};

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    match args.command {
        Command::Submit {
            delay_secs,
            to_submit,
            submitted,
        } => {
            let archive = WaybackClient::new()?;
            let to_submit = UrlSetFile::new(to_submit);
            let submitted = UrlSetFile::new(submitted);

            let engine = SubmitEngine::new(&archive, &to_submit, &submitted)
                .with_delay(Duration::from_secs(delay_secs));
            let outcome = engine.submit_pending().await?;

            info!(
                submitted = outcome.submitted,
                skipped = outcome.skipped,
                failed = outcome.failed,
                "done"
            );
        }
        Command::Dedup { to_submit } => {
            // Fail fast on missing credentials, before any remote call.
            let credentials = PocketCredentials::from_env()?;
            let pocket = PocketClient::new(credentials)?;
            let expander = RedirectExpander::new()?;
            let store = UrlSetFile::new(to_submit);

            let reconciler = Reconciler::new(&pocket, &expander, &store);
            let outcome = reconciler.reconcile().await?;

            info!(
                kept = outcome.kept,
                deleted = outcome.deleted_performed,
                readded = outcome.readded,
                queued = outcome.queued,
                "done"
            );
        }
    }

    Ok(())
}
