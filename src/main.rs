// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{anyhow, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use helm_deploy::command::ProcessRunner;
use helm_deploy::config::{Cli, Config};
use helm_deploy::pipeline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))?;

    let config = Config::from(cli);
    debug!("Configuration loaded: {:?}", config);

    let outcome = pipeline::run(&ProcessRunner, &config).await;

    // Unix exit codes fit in a byte; anything wider reports a generic failure
    Ok(ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(1)))
}
