// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

use crate::command::{run_echoed, CommandRunner, Invocation};
use crate::error::Result;
use tracing::instrument;

pub fn rollout_status(kubectl: &str, deployment: &str, namespace: &str) -> Invocation {
    Invocation::new(kubectl)
        .args(["rollout", "status"])
        .arg(format!("deploy/{}", deployment))
        .args(["-n", namespace])
}

/// Block until kubectl reports the Deployment rolled out. Timeouts are kubectl's own.
#[instrument(skip(runner, kubectl))]
pub async fn wait_for_rollout<R: CommandRunner + ?Sized>(
    runner: &R,
    kubectl: &str,
    deployment: &str,
    namespace: &str,
) -> Result<()> {
    println!(
        "Waiting for rollout of deployment/{} in namespace '{}'...",
        deployment, namespace
    );

    run_echoed(runner, &rollout_status(kubectl, deployment, namespace)).await?;

    println!("✅ Rollout completed successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockRunner;

    #[test]
    fn test_rollout_status_arguments() {
        assert_eq!(
            rollout_status("kubectl", "web", "app").to_string(),
            "kubectl rollout status deploy/web -n app"
        );
    }

    #[tokio::test]
    async fn test_wait_for_rollout_fails_with_kubectl_code() {
        let runner = MockRunner::new().on("kubectl rollout status", 1);

        let err = wait_for_rollout(&runner, "kubectl", "web", "app")
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 1);
    }
}
