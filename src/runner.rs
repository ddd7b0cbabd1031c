//! Fail-fast provisioning engine.
//!
//! Executes a [`Plan`] step by step, in declaration order, stopping at the
//! first failure. All I/O is routed through injected port traits so unit
//! tests can drive the engine with fakes instead of real processes.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::command_runner::CommandRunner;
use crate::domain::error::StepError;
use crate::domain::plan::{Plan, Step, StepKind};

// ── Ports ────────────────────────────────────────────────────────────────────

/// Local filesystem operations the engine needs.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Receives step-level progress events. The terminal implementation lives in
/// `crate::output`; tests use a recording fake.
pub trait ProgressReporter {
    fn step(&self, msg: &str);
    fn success(&self, msg: &str);
    fn skip(&self, msg: &str);
}

// ── Run report ───────────────────────────────────────────────────────────────

/// Outcome of a single step that did not abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Skipped,
}

/// Per-step record in a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub label: String,
    pub status: StepStatus,
}

/// Record of a run in which every enabled step succeeded.
///
/// A failed run never produces a report — the typed [`StepError`] propagates
/// instead, carrying the exit code for `main`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Execute every enabled step of `plan` in order, failing fast.
///
/// No step is retried or rolled back. Disabled steps are reported as skipped
/// and never executed.
///
/// # Errors
///
/// Returns the first step's error unmodified: [`StepError::PathConflict`] or
/// [`StepError::Io`] from the directory step, [`StepError::CommandFailed`]
/// (carrying the external tool's own status) or [`StepError::Killed`] from a
/// manage step, or a spawn/wait error from the command runner.
pub async fn execute(
    plan: &Plan,
    fs: &impl LocalFs,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
) -> Result<RunReport> {
    let started_at = Utc::now();
    let mut steps = Vec::with_capacity(plan.steps.len());

    for step in &plan.steps {
        if !step.enabled {
            reporter.skip(&step.label);
            steps.push(StepReport {
                label: step.label.clone(),
                status: StepStatus::Skipped,
            });
            continue;
        }

        reporter.step(&step.label);
        run_step(plan, step, fs, runner).await?;
        reporter.success(&step.label);
        steps.push(StepReport {
            label: step.label.clone(),
            status: StepStatus::Completed,
        });
    }

    Ok(RunReport { started_at, steps })
}

async fn run_step(
    plan: &Plan,
    step: &Step,
    fs: &impl LocalFs,
    runner: &impl CommandRunner,
) -> Result<()> {
    match &step.kind {
        StepKind::EnsureDir { path } => ensure_directory(fs, path),
        StepKind::Manage { .. } => {
            let (program, argv) = plan
                .command_line(step)
                .ok_or_else(|| anyhow::anyhow!("manage step without a command line"))?;
            invoke_external_command(runner, &program, &argv).await
        }
    }
}

/// Create `path` (and parents) if absent; succeed silently when it already
/// exists as a directory.
///
/// # Errors
///
/// Returns [`StepError::PathConflict`] when the path is occupied by a
/// non-directory entry, or [`StepError::Io`] when creation fails.
fn ensure_directory(fs: &impl LocalFs, path: &Path) -> Result<()> {
    if fs.exists(path) {
        if fs.is_dir(path) {
            return Ok(());
        }
        return Err(StepError::PathConflict {
            path: path.to_path_buf(),
        }
        .into());
    }
    fs.create_dir_all(path).map_err(|source| {
        StepError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Run an external command with inherited stdio, treating its exit status as
/// authoritative.
///
/// # Errors
///
/// Returns [`StepError::CommandFailed`] with the tool's own status on a
/// non-zero exit, [`StepError::Killed`] when the child died to a signal, or
/// the runner's spawn/wait error.
async fn invoke_external_command(
    runner: &impl CommandRunner,
    program: &str,
    argv: &[String],
) -> Result<()> {
    let args: Vec<&str> = argv.iter().map(String::as_str).collect();
    let status = runner.run_status(program, &args).await?;
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(StepError::CommandFailed {
            program: program.to_string(),
            code,
        }
        .into()),
        None => Err(StepError::Killed {
            program: program.to_string(),
        }
        .into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
