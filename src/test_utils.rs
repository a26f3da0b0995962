// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for scripting external command results.

use crate::command::{CommandOutput, CommandRunner, Invocation};
use crate::error::{DeployError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum Response {
    Output(CommandOutput),
    LaunchFailure,
}

/// A mock runner that records every invocation and answers with canned
/// results matched by command-line prefix. Unmatched commands succeed with no output.
#[derive(Clone, Default)]
pub struct MockRunner {
    responses: Arc<Mutex<Vec<(String, Response)>>>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with `code` for commands starting with `prefix`
    pub fn on(self, prefix: &str, code: i32) -> Self {
        self.on_output(prefix, code, "")
    }

    /// Exit with `code` and print `stdout` for commands starting with `prefix`
    pub fn on_output(self, prefix: &str, code: i32, stdout: &str) -> Self {
        let output = CommandOutput {
            code,
            stdout: stdout.to_string(),
            stderr: String::new(),
        };
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), Response::Output(output)));
        self
    }

    /// Fail to launch commands starting with `prefix`
    pub fn on_launch_failure(self, prefix: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), Response::LaunchFailure));
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Recorded command lines, in execution order
    pub fn commands(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|invocation| invocation.to_string())
            .collect()
    }

    fn respond(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());

        let line = invocation.to_string();
        let responses = self.responses.lock().unwrap();
        let response = responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone());

        match response {
            Some(Response::Output(output)) => Ok(output),
            Some(Response::LaunchFailure) => Err(DeployError::Launch {
                command: line,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
            None => Ok(CommandOutput::default()),
        }
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn stream(&self, invocation: &Invocation) -> Result<i32> {
        self.respond(invocation).map(|output| output.code)
    }

    async fn capture(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.respond(invocation)
    }
}
