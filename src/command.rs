// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! External command invocation

use crate::error::{DeployError, Result};
use async_trait::async_trait;
use std::fmt;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};
use tracing::{debug, instrument, warn};

/// A single external command: program, ordered arguments and optional stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Feed `input` to the command's standard input
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit code and captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs external commands to completion, one at a time.
///
/// Neither operation treats a non-zero exit as an error; only failing to
/// launch the program is. Use [`ensure_success`] to enforce a zero exit.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with stdout/stderr inherited from this process, returning the exit code
    async fn stream(&self, invocation: &Invocation) -> Result<i32>;

    /// Run with stdout/stderr captured
    async fn capture(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Turn a non-zero exit code into [`DeployError::CommandFailed`]
pub fn ensure_success(invocation: &Invocation, code: i32) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(DeployError::CommandFailed {
            command: invocation.to_string(),
            code,
        })
    }
}

/// Echo `$ <command>` to stdout, stream the command and fail on a non-zero exit
pub async fn run_echoed<R: CommandRunner + ?Sized>(
    runner: &R,
    invocation: &Invocation,
) -> Result<()> {
    println!("$ {}", invocation);
    let code = runner.stream(invocation).await?;
    ensure_success(invocation, code)
}

/// [`CommandRunner`] backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if invocation.stdin.is_some() {
            command.stdin(Stdio::piped());
        }
        command
    }

    fn spawn(invocation: &Invocation, mut command: Command) -> Result<Child> {
        let child = command.spawn().map_err(|source| DeployError::Launch {
            command: invocation.to_string(),
            source,
        })?;
        debug!("Spawned `{}` (pid {:?})", invocation, child.id());
        Ok(child)
    }

    /// Write the invocation's input and close the pipe.
    /// Must run concurrently with the wait: the child may fill its output pipes first.
    async fn feed(invocation: &Invocation, stdin: Option<ChildStdin>) {
        if let (Some(input), Some(mut stdin)) = (&invocation.stdin, stdin) {
            // A child that exits before reading its input reports through its exit code.
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                warn!("Failed to write stdin of `{}`: {}", invocation, e);
            }
        }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[instrument(skip(self, invocation), fields(command = %invocation))]
    async fn stream(&self, invocation: &Invocation) -> Result<i32> {
        let mut child = Self::spawn(invocation, Self::command(invocation))?;
        let stdin = child.stdin.take();
        let (_, status) = tokio::join!(Self::feed(invocation, stdin), child.wait());
        let status = status.map_err(|source| DeployError::Launch {
            command: invocation.to_string(),
            source,
        })?;

        let code = exit_code(status);
        debug!("`{}` exited with code {}", invocation, code);
        Ok(code)
    }

    #[instrument(skip(self, invocation), fields(command = %invocation))]
    async fn capture(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let mut command = Self::command(invocation);
        command.stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = Self::spawn(invocation, command)?;
        let stdin = child.stdin.take();
        let (_, output) = tokio::join!(
            Self::feed(invocation, stdin),
            child.wait_with_output()
        );
        let output = output.map_err(|source| DeployError::Launch {
            command: invocation.to_string(),
            source,
        })?;

        let code = exit_code(output.status);
        debug!("`{}` exited with code {}", invocation, code);
        Ok(CommandOutput {
            code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Numeric exit code of a finished child; signal deaths follow the shell `128 + N` convention.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
