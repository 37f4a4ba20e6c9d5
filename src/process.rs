//! Single-attempt child-process execution with structured results
//!
//! Every external tool invocation in the pipeline goes through here: one
//! attempt, no retries, and a structured outcome (exit code plus captured
//! output) so callers can attach stage context uniformly instead of parsing
//! bare exceptions.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Result;

/// Outcome of one child-process invocation
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    /// Best available failure detail: stderr, falling back to stdout, falling
    /// back to the exit code.
    pub fn detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Seam for child-process execution so the build orchestrator can be
/// exercised in tests without a real package manager on the host.
pub trait ProcessRunner {
    /// Run `program` with `args` in `cwd`. With `stream` set, stdout/stderr
    /// pass through to the terminal live and the captured fields are empty;
    /// otherwise both are captured for error reporting.
    fn run(&self, program: &str, args: &[String], cwd: &Path, stream: bool) -> Result<RunOutput>;
}

/// Real runner backed by `std::process::Command`
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path, stream: bool) -> Result<RunOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd);

        if stream {
            let status = cmd
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()?;
            Ok(RunOutput {
                success: status.success(),
                code: status.code(),
                stdout: String::new(),
                stderr: String::new(),
            })
        } else {
            let output = cmd.output()?;
            Ok(RunOutput {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

/// Render a command line for recovery instructions and logs
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

/// Fake runner for tests: records invocations and reports success, echoing
/// a fixed stdout for callers that parse tool output (version probes)
#[cfg(test)]
pub struct RecordingRunner {
    pub calls: std::cell::RefCell<Vec<(String, Vec<String>, PathBuf)>>,
    stdout: String,
}

#[cfg(test)]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::with_stdout("")
    }

    pub fn with_stdout(stdout: &str) -> Self {
        Self {
            calls: std::cell::RefCell::new(Vec::new()),
            stdout: stdout.to_string(),
        }
    }
}

#[cfg(test)]
impl ProcessRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path, _stream: bool) -> Result<RunOutput> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec(), cwd.to_path_buf()));
        Ok(RunOutput {
            success: true,
            code: Some(0),
            stdout: self.stdout.clone(),
            stderr: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_prefers_stderr() {
        let out = RunOutput {
            success: false,
            code: Some(1),
            stdout: "some stdout".to_string(),
            stderr: "the real problem".to_string(),
        };
        assert_eq!(out.detail(), "the real problem");
    }

    #[test]
    fn test_detail_falls_back_to_stdout_then_code() {
        let out = RunOutput {
            success: false,
            code: Some(2),
            stdout: "only stdout".to_string(),
            stderr: "  ".to_string(),
        };
        assert_eq!(out.detail(), "only stdout");

        let silent = RunOutput {
            success: false,
            code: Some(127),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(silent.detail(), "exit code 127");
    }

    #[test]
    fn test_render_command() {
        assert_eq!(
            render_command("bun", &["run".to_string(), "build".to_string()]),
            "bun run build"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_output() {
        let runner = SystemRunner;
        let out = runner
            .run(
                "sh",
                &["-c".to_string(), "echo hello".to_string()],
                Path::new("."),
                false,
            )
            .unwrap();
        assert!(out.success);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_failure() {
        let runner = SystemRunner;
        let out = runner
            .run(
                "sh",
                &["-c".to_string(), "exit 3".to_string()],
                Path::new("."),
                false,
            )
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
    }
}
