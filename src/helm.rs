// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Helm release upgrade-or-install

use crate::command::{run_echoed, CommandRunner, Invocation};
use crate::config::Config;
use crate::constants::chart_values;
use crate::error::Result;
use tracing::{info, instrument};

/// `helm upgrade --install` for the configured release, overriding the image values
pub fn upgrade_install(config: &Config) -> Invocation {
    Invocation::new(&config.tools.helm)
        .args(["upgrade", "--install"])
        .args([&config.release, &config.chart])
        .args(["--namespace", &config.namespace])
        .args(["--set", &set_value(chart_values::IMAGE_REPOSITORY, &config.image_repo)])
        .args(["--set", &set_value(chart_values::IMAGE_TAG, &config.tag)])
}

fn set_value(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// Install or upgrade the release with the configured image.
/// Chart and values are not validated locally; helm reports any problem.
#[instrument(
    skip(runner, config),
    fields(release = %config.release, namespace = %config.namespace)
)]
pub async fn deploy_release<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
) -> Result<()> {
    println!(
        "Deploying release '{}' with image {}:{}...",
        config.release, config.image_repo, config.tag
    );

    run_echoed(runner, &upgrade_install(config)).await?;

    info!("Release {} deployed from {}", config.release, config.chart);
    Ok(())
}
