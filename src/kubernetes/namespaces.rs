// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace management utilities

use crate::command::{ensure_success, run_echoed, CommandRunner, Invocation};
use crate::error::Result;
use tracing::{debug, info, instrument};

/// Client-side dry run that renders the namespace manifest without touching the cluster
pub fn namespace_manifest(kubectl: &str, namespace: &str) -> Invocation {
    Invocation::new(kubectl).args([
        "create",
        "namespace",
        namespace,
        "--dry-run=client",
        "-o",
        "yaml",
    ])
}

/// Apply a manifest read from stdin
pub fn apply_manifest(kubectl: &str, manifest: impl Into<String>) -> Invocation {
    Invocation::new(kubectl)
        .args(["apply", "-f", "-"])
        .stdin(manifest)
}

/// Ensure a namespace exists in the cluster, create if it doesn't.
/// Applying the dry-run manifest is a no-op when the namespace is already there.
#[instrument(skip(runner, kubectl))]
pub async fn ensure_namespace_exists<R: CommandRunner + ?Sized>(
    runner: &R,
    kubectl: &str,
    namespace: &str,
) -> Result<()> {
    println!("Ensuring namespace '{}' exists...", namespace);

    let generate = namespace_manifest(kubectl, namespace);
    let manifest = runner.capture(&generate).await?;
    if !manifest.success() {
        eprint!("{}", manifest.stderr);
    }
    ensure_success(&generate, manifest.code)?;
    debug!("Generated manifest for namespace {}", namespace);

    run_echoed(runner, &apply_manifest(kubectl, manifest.stdout)).await?;

    info!("Namespace {} is present", namespace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;
    use crate::test_utils::MockRunner;

    const MANIFEST: &str = "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: app\n";

    #[test]
    fn test_namespace_manifest_arguments() {
        let invocation = namespace_manifest("kubectl", "app");

        assert_eq!(
            invocation.to_string(),
            "kubectl create namespace app --dry-run=client -o yaml"
        );
    }

    #[tokio::test]
    async fn test_generated_manifest_is_piped_into_apply() {
        let runner = MockRunner::new().on_output("kubectl create namespace", 0, MANIFEST);

        ensure_namespace_exists(&runner, "kubectl", "app")
            .await
            .unwrap();

        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 2);
        assert_eq!(invocations[1].to_string(), "kubectl apply -f -");
        assert_eq!(invocations[1].stdin.as_deref(), Some(MANIFEST));
    }

    #[tokio::test]
    async fn test_dry_run_failure_skips_apply() {
        let runner = MockRunner::new().on("kubectl create namespace", 1);

        let err = ensure_namespace_exists(&runner, "kubectl", "app")
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::CommandFailed { code: 1, .. }));
        assert_eq!(runner.invocations().len(), 1);
    }

    #[tokio::test]
    async fn test_apply_failure_propagates_code() {
        let runner = MockRunner::new()
            .on_output("kubectl create namespace", 0, MANIFEST)
            .on("kubectl apply", 5);

        let err = ensure_namespace_exists(&runner, "kubectl", "app")
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 5);
    }
}
