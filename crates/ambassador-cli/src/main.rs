#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod app;
mod command;
mod config;

use std::process;

use anyhow::Context;

use crate::app::App;
use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "ambassador_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "ambassador_cli::config";
pub const TRACING_TARGET_APP: &str = "ambassador_cli::app";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_APP,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let app = App::connect(&cli)
        .await
        .context("failed to start the back office")?;

    let result = cli.command.run(&app).await;
    app.reconcile().await?;
    result
}
