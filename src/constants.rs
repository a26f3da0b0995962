// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Default values for the deployment parameters
pub mod defaults {
    pub const IMAGE_REPO: &str = "ghcr.io/oelnajmi/devops-practice";
    pub const RELEASE: &str = "devops-practice";
    pub const NAMESPACE: &str = "app";
    pub const CHART: &str = "./charts/devops-practice";
    /// Port suggested in the port-forward hint after a successful deploy
    pub const FORWARD_PORT: u16 = 3000;
    pub const KUBECTL: &str = "kubectl";
    pub const HELM: &str = "helm";
}

/// Chart values overridden on every deploy
pub mod chart_values {
    pub const IMAGE_REPOSITORY: &str = "image.repository";
    pub const IMAGE_TAG: &str = "image.tag";
}

/// Diagnostics output limits
pub mod diagnostics {
    /// Number of trailing event lines printed after a failed rollout
    pub const EVENTS_TAIL_LINES: usize = 30;
    pub const NO_EVENTS_PLACEHOLDER: &str = "(no events)";
}
