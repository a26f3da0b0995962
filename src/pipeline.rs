// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The deploy pipeline: namespace, release, rollout, and diagnostics on failure.

use crate::command::CommandRunner;
use crate::config::Config;
use crate::error::DeployError;
use crate::helm::deploy_release;
use crate::kubernetes::{diagnose_rollout_failure, ensure_namespace_exists, wait_for_rollout};
use std::fmt;
use tracing::{error, info, instrument};

/// Pipeline step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    EnsuringNamespace,
    Deploying,
    WaitingRollout,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::EnsuringNamespace => "ensuring namespace",
            Stage::Deploying => "deploying release",
            Stage::WaitingRollout => "waiting for rollout",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed { stage: Stage, exit_code: i32 },
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Succeeded => 0,
            Outcome::Failed { exit_code, .. } => *exit_code,
        }
    }
}

/// Hint printed after a successful deploy
pub fn port_forward_hint(config: &Config) -> String {
    format!(
        "{} port-forward -n {} deploy/{} {}:{}",
        config.tools.kubectl,
        config.namespace,
        config.release,
        config.forward_port,
        config.forward_port
    )
}

/// Run the whole deploy. The first failing step stops the pipeline, diagnostics
/// are printed and the failing command's exit code is reported.
#[instrument(
    skip(runner, config),
    fields(release = %config.release, namespace = %config.namespace)
)]
pub async fn run<R: CommandRunner + ?Sized>(runner: &R, config: &Config) -> Outcome {
    match deploy(runner, config).await {
        Ok(()) => {
            info!("Deploy of {}:{} finished", config.image_repo, config.tag);
            println!("\n✅ Deploy finished successfully.");
            println!("Try port-forward:\n  {}", port_forward_hint(config));
            Outcome::Succeeded
        }
        Err((stage, e)) => {
            let exit_code = e.exit_code();
            error!("Deploy failed while {}: {}", stage, e);
            eprintln!("\n❌ Deploy failed (exit {}).", exit_code);

            diagnose_rollout_failure(
                runner,
                &config.tools.kubectl,
                &config.release,
                &config.namespace,
            )
            .await;

            Outcome::Failed { stage, exit_code }
        }
    }
}

async fn deploy<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
) -> Result<(), (Stage, DeployError)> {
    let kubectl = &config.tools.kubectl;

    ensure_namespace_exists(runner, kubectl, &config.namespace)
        .await
        .map_err(|e| (Stage::EnsuringNamespace, e))?;

    deploy_release(runner, config)
        .await
        .map_err(|e| (Stage::Deploying, e))?;

    wait_for_rollout(runner, kubectl, &config.release, &config.namespace)
        .await
        .map_err(|e| (Stage::WaitingRollout, e))
}
