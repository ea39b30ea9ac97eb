// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Analyzer process orchestration.
//!
//! The analyzer is an opaque executable that reads a pcap fixture and writes
//! gzip JSON-lines flow output. Its arguments are positional `key=value`
//! tokens:
//!
//! ```text
//! <executable> output=<file> [outdir=<dir>] tls=1 <input-fixture-path>
//! ```
//!
//! Each run is awaited with a bounded timeout. An overdue process gets
//! SIGTERM, then SIGKILL once the grace period expires.

use log::{debug, error, warn};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::{Child, Command};

use crate::config::{DEFAULT_GRACE_MS, DEFAULT_TIMEOUT_MS};

/// Flag enabling the analyzer's TLS parsing
pub const TLS_FLAG: &str = "tls=1";

/// Wait bounds for a single analyzer run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalyzerTiming {
    /// How long to wait for the process to exit on its own
    pub timeout: Duration,
    /// How long to wait after SIGTERM before killing
    pub grace: Duration,
}

impl Default for AnalyzerTiming {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            grace: Duration::from_millis(DEFAULT_GRACE_MS),
        }
    }
}

/// One analyzer run: which fixture to read and where to write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Output file name, relative to `outdir` or the working directory
    pub output: String,
    pub outdir: Option<PathBuf>,
    pub input: PathBuf,
}

impl Invocation {
    pub fn new(output: impl Into<String>, input: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            outdir: None,
            input: input.into(),
        }
    }

    pub fn with_outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = Some(outdir.into());
        self
    }

    /// Argument vector passed to the analyzer.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(4);
        args.push(OsString::from(format!("output={}", self.output)));
        if let Some(ref dir) = self.outdir {
            let mut arg = OsString::from("outdir=");
            arg.push(dir.as_os_str());
            args.push(arg);
        }
        args.push(OsString::from(TLS_FLAG));
        args.push(self.input.clone().into_os_string());
        args
    }
}

/// Launches analyzer processes.
#[derive(Clone, Debug)]
pub struct Analyzer {
    executable: PathBuf,
    timing: AnalyzerTiming,
    work_dir: Option<PathBuf>,
}

impl Analyzer {
    pub fn new(executable: impl Into<PathBuf>, timing: AnalyzerTiming) -> Self {
        Self {
            executable: executable.into(),
            timing,
            work_dir: None,
        }
    }

    /// Run the analyzer from `dir`; relative output names land there.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Run one invocation to completion.
    pub async fn run(&self, invocation: &Invocation) -> Result<(), AnalyzerError> {
        let child = self.spawn(invocation)?;
        self.wait(child, invocation).await
    }

    /// Start every invocation at once, then wait for all of them.
    ///
    /// Every process is waited for even after one fails. Returns the first
    /// failure in invocation order.
    pub async fn run_all(&self, invocations: &[Invocation]) -> Result<(), AnalyzerError> {
        let children: Vec<_> = invocations.iter().map(|inv| self.spawn(inv)).collect();

        let mut first_error = None;
        for (invocation, child) in invocations.iter().zip(children) {
            let result = match child {
                Ok(child) => self.wait(child, invocation).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                error!("analyzer run for {} failed: {}", invocation.output, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn spawn(&self, invocation: &Invocation) -> Result<Child, AnalyzerError> {
        let args = invocation.args();
        debug!(
            "launching {} {}",
            self.executable.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut command = Command::new(&self.executable);
        command
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true); // No analyzer outlives its handle
        if let Some(ref dir) = self.work_dir {
            command.current_dir(dir);
        }

        command.spawn().map_err(|source| AnalyzerError::Spawn {
            executable: self.executable.clone(),
            source,
        })
    }

    async fn wait(&self, mut child: Child, invocation: &Invocation) -> Result<(), AnalyzerError> {
        let status = match tokio::time::timeout(self.timing.timeout, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                warn!(
                    "analyzer still running after {:?} while writing {}; terminating",
                    self.timing.timeout, invocation.output
                );
                self.terminate(&mut child).await;
                return Err(AnalyzerError::Timeout {
                    output: invocation.output.clone(),
                    after: self.timing.timeout,
                });
            }
        };

        match exit_code(status) {
            0 => {
                debug!("analyzer finished writing {}", invocation.output);
                Ok(())
            }
            code => Err(AnalyzerError::NonZeroExit {
                output: invocation.output.clone(),
                code,
            }),
        }
    }

    /// SIGTERM, wait out the grace period, then SIGKILL.
    async fn terminate(&self, child: &mut Child) {
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Some(pid) = child.id().and_then(|id| i32::try_from(id).ok()) {
                if let Err(e) = kill(Pid::from_raw(pid), Signal::SIGTERM) {
                    debug!("SIGTERM to analyzer {} failed: {}", pid, e);
                }
                let exited = tokio::time::timeout(self.timing.grace, child.wait()).await;
                if let Ok(Ok(status)) = exited {
                    debug!("analyzer {} stopped after SIGTERM ({})", pid, status);
                    return;
                }
            }
        }

        if let Err(e) = child.kill().await {
            warn!("failed to kill analyzer: {}", e);
        }
    }
}

/// Exit code of a finished process. Death by signal N maps to 128 + N.
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

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("failed to launch analyzer {}: {source}", executable.display())]
    Spawn {
        executable: PathBuf,
        source: io::Error,
    },

    #[error("analyzer I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("analyzer exited with code {code} while writing {output}")]
    NonZeroExit { output: String, code: i32 },

    #[error("analyzer did not finish writing {output} within {after:?}")]
    Timeout { output: String, after: Duration },
}

impl AnalyzerError {
    /// Process exit code the harness reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzerError::NonZeroExit { code, .. } => *code,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
