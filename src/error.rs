// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Exit code reported when a tool binary could not be started at all.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = 127;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Command `{command}` exited with code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl DeployError {
    /// Process exit code this failure maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::CommandFailed { code, .. } => *code,
            DeployError::Launch { .. } => LAUNCH_FAILURE_EXIT_CODE,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
