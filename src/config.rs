// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use clap::{ArgAction, Parser};

/// Command line of the deploy helper
#[derive(Debug, Parser)]
#[command(name = "helm-deploy", version, about = "Minimal Helm deploy helper")]
pub struct Cli {
    /// Image tag to deploy (e.g. 'main' or 'sha-abc1234')
    #[arg(long, value_parser = non_empty)]
    pub tag: String,

    /// Container image repository
    #[arg(long, default_value = defaults::IMAGE_REPO, value_parser = non_empty)]
    pub image_repo: String,

    /// Helm release name, also the name of the Deployment to wait for
    #[arg(long, default_value = defaults::RELEASE, value_parser = non_empty)]
    pub release: String,

    /// Kubernetes namespace
    #[arg(long, default_value = defaults::NAMESPACE, value_parser = non_empty)]
    pub namespace: String,

    /// Path to the Helm chart
    #[arg(long, default_value = defaults::CHART, value_parser = non_empty)]
    pub chart: String,

    /// Port used in the port-forward hint printed on success
    #[arg(long, default_value_t = defaults::FORWARD_PORT)]
    pub port: u16,

    /// kubectl binary to invoke
    #[arg(long, default_value = defaults::KUBECTL, value_parser = non_empty)]
    pub kubectl: String,

    /// helm binary to invoke
    #[arg(long, default_value = defaults::HELM, value_parser = non_empty)]
    pub helm: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter directive for the requested verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn non_empty(value: &str) -> Result<String, String> {
    if value.is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

/// Tool binaries the deploy shells out to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub kubectl: String,
    pub helm: String,
}

#[cfg(test)]
impl Default for Tools {
    fn default() -> Self {
        Self {
            kubectl: defaults::KUBECTL.to_string(),
            helm: defaults::HELM.to_string(),
        }
    }
}

/// Deployment parameters threaded unmodified into every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub release: String,
    pub chart: String,
    pub namespace: String,
    pub image_repo: String,
    pub tag: String,
    pub forward_port: u16,
    pub tools: Tools,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            release: cli.release,
            chart: cli.chart,
            namespace: cli.namespace,
            image_repo: cli.image_repo,
            tag: cli.tag,
            forward_port: cli.port,
            tools: Tools {
                kubectl: cli.kubectl,
                helm: cli.helm,
            },
        }
    }
}
