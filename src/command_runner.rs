//! Generic external command execution.
//!
//! The trait is NOT tied to any particular framework tool — it can run any
//! external command. The production implementation uses tokio; test doubles
//! return canned results without spawning processes.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

/// Default timeout for captured probe commands (`doctor` checks).
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs external commands either captured (with timeout and guaranteed kill)
/// or with inherited stdio (no timeout — the operator watches the output).
#[allow(async_fn_in_trait)] // Send bounds not required; runner is always called on the same task
pub trait CommandRunner {
    /// Run a command with stdout/stderr captured, enforcing the default
    /// timeout and killing the child if it fires.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a command with inherited stdio (pass-through).
    /// No timeout — used for provisioning steps whose duration is governed
    /// by the external tool itself.
    async fn run_status(&self, program: &str, args: &[&str])
    -> Result<std::process::ExitStatus>;
}

/// Production `CommandRunner` — uses tokio for async process execution
/// with guaranteed timeout and kill on all platforms.
///
/// On Windows, `tokio::time::timeout` around `.output().await` does NOT kill
/// the child process when the timeout fires — the future is dropped but the
/// OS process keeps running. Captured runs therefore use `tokio::select!`
/// with an explicit `child.kill()`.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        // Read stdout/stderr CONCURRENTLY with wait() to avoid pipe deadlock.
        // A child writing more than the OS pipe buffer blocks on write; if we
        // only awaited wait() first, wait() would never resolve.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(self.timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{program} timed out after {}s", self.timeout.as_secs())
            }
        }
    }

    async fn run_status(
        &self,
        program: &str,
        args: &[&str],
    ) -> Result<std::process::ExitStatus> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = TokioCommandRunner::default();
        let out = runner.run("echo", &["hello"]).await.expect("echo runs");
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_missing_program_is_spawn_error() {
        let runner = TokioCommandRunner::default();
        let err = runner
            .run("staticprep-no-such-program", &[])
            .await
            .expect_err("spawn should fail");
        assert!(err.to_string().contains("failed to spawn"), "got: {err}");
    }

    #[tokio::test]
    async fn test_run_timeout_kills_child() {
        let runner = TokioCommandRunner::new(Duration::from_millis(100));
        let err = runner
            .run("sleep", &["5"])
            .await
            .expect_err("timeout should fire");
        assert!(err.to_string().contains("timed out"), "got: {err}");
    }

    #[tokio::test]
    async fn test_run_status_reports_nonzero_exit() {
        let runner = TokioCommandRunner::default();
        let status = runner
            .run_status("sh", &["-c", "exit 3"])
            .await
            .expect("sh runs");
        assert_eq!(status.code(), Some(3));
    }

    #[tokio::test]
    async fn test_run_status_zero_on_success() {
        let runner = TokioCommandRunner::default();
        let status = runner.run_status("true", &[]).await.expect("true runs");
        assert!(status.success());
    }
}
