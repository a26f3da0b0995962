// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Best-effort diagnostics printed after a failed deploy

use crate::command::{run_echoed, CommandRunner, Invocation};
use crate::constants::diagnostics::{EVENTS_TAIL_LINES, NO_EVENTS_PLACEHOLDER};
use tracing::{instrument, warn};

pub fn list_pods(kubectl: &str, namespace: &str) -> Invocation {
    Invocation::new(kubectl).args(["get", "pods", "-n", namespace, "-o", "wide"])
}

pub fn describe_deployment(kubectl: &str, deployment: &str, namespace: &str) -> Invocation {
    Invocation::new(kubectl).args(["describe", "deploy", deployment, "-n", namespace])
}

pub fn recent_events(kubectl: &str, namespace: &str) -> Invocation {
    Invocation::new(kubectl).args(["get", "events", "-n", namespace, "--sort-by=.lastTimestamp"])
}

/// Last `max_lines` lines of the events listing, or a placeholder when there are none
pub fn events_tail(events: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = events.trim().lines().collect();
    if lines.is_empty() {
        return NO_EVENTS_PLACEHOLDER.to_string();
    }

    lines[lines.len().saturating_sub(max_lines)..].join("\n")
}

/// Print pods, the Deployment description and recent namespace events.
///
/// Each step is independent: a failing step prints a warning and the next one
/// still runs. Nothing here affects the exit code of the deploy.
#[instrument(skip(runner, kubectl))]
pub async fn diagnose_rollout_failure<R: CommandRunner + ?Sized>(
    runner: &R,
    kubectl: &str,
    deployment: &str,
    namespace: &str,
) {
    println!("\n🔎 Gathering diagnostics...");

    if let Err(e) = run_echoed(runner, &list_pods(kubectl, namespace)).await {
        warn!("Listing pods failed: {}", e);
        println!("(!) Could not list pods");
    }

    if let Err(e) = run_echoed(runner, &describe_deployment(kubectl, deployment, namespace)).await {
        warn!("Describing deployment failed: {}", e);
        println!("(!) Could not describe deployment/{}", deployment);
    }

    match runner.capture(&recent_events(kubectl, namespace)).await {
        Ok(events) => {
            if !events.success() {
                warn!(
                    "Fetching events exited with code {}: {}",
                    events.code,
                    events.stderr.trim()
                );
            }
            println!("\n--- Recent events (tail) ---");
            println!("{}", events_tail(&events.stdout, EVENTS_TAIL_LINES));
            println!("----------------------------\n");
        }
        Err(e) => println!("(!) Could not fetch events: {}", e),
    }
}
