// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! kubectl-driven namespace management, rollout waiting and failure diagnostics.

pub mod diagnostics;
pub mod namespaces;
pub mod rollout;

pub use diagnostics::diagnose_rollout_failure;
pub use namespaces::ensure_namespace_exists;
pub use rollout::wait_for_rollout;
