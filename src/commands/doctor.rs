//! `staticprep doctor` — preflight diagnostics for a provisioning run.
//!
//! Read-only: probes the interpreter, the manage script, and the static root
//! without mutating anything.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::command_runner::{CommandRunner, TokioCommandRunner};
use crate::commands::ConfigArgs;
use crate::domain::config::PrepConfig;
use crate::infra::fs::RealFs;
use crate::output::OutputContext;
use crate::runner::LocalFs;

/// Arguments for the doctor command.
#[derive(Args, Default)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

// ── Check results ────────────────────────────────────────────────────────────

/// All preflight checks.
#[derive(Debug, Serialize)]
pub struct PreflightChecks {
    /// Interpreter availability.
    pub interpreter: InterpreterCheck,
    /// Whether the manage script exists.
    pub manage_script_found: bool,
    /// State of the configured static root.
    pub static_root: StaticRootState,
}

/// Result of probing the configured interpreter.
#[derive(Debug, Serialize)]
pub struct InterpreterCheck {
    /// Whether the interpreter could be spawned and exited cleanly.
    pub available: bool,
    /// Reported version string, when available.
    pub version: Option<String>,
}

/// What currently occupies the static root path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticRootState {
    /// Absent — `run` will create it.
    Missing,
    /// Already a directory — `run` leaves it alone.
    Directory,
    /// Blocked by a non-directory entry — `run` will fail.
    Conflict,
}

impl PreflightChecks {
    /// A run can only succeed when every check passed.
    #[must_use]
    pub fn healthy(&self) -> bool {
        self.interpreter.available
            && self.manage_script_found
            && self.static_root != StaticRootState::Conflict
    }
}

// ── Probing ──────────────────────────────────────────────────────────────────

/// Gather all preflight checks through the injected ports.
pub async fn checks(
    cfg: &PrepConfig,
    fs: &impl LocalFs,
    runner: &impl CommandRunner,
) -> PreflightChecks {
    PreflightChecks {
        interpreter: probe_interpreter(runner, &cfg.interpreter).await,
        manage_script_found: fs.exists(Path::new(&cfg.manage_script)),
        static_root: probe_static_root(fs, Path::new(&cfg.static_dir)),
    }
}

async fn probe_interpreter(runner: &impl CommandRunner, interpreter: &str) -> InterpreterCheck {
    match runner.run(interpreter, &["--version"]).await {
        Ok(out) if out.status.success() => {
            // Some interpreters report the version on stderr.
            let text = if out.stdout.is_empty() {
                out.stderr
            } else {
                out.stdout
            };
            let version = String::from_utf8_lossy(&text)
                .lines()
                .next()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty());
            InterpreterCheck {
                available: true,
                version,
            }
        }
        _ => InterpreterCheck {
            available: false,
            version: None,
        },
    }
}

fn probe_static_root(fs: &impl LocalFs, path: &Path) -> StaticRootState {
    if !fs.exists(path) {
        StaticRootState::Missing
    } else if fs.is_dir(path) {
        StaticRootState::Directory
    } else {
        StaticRootState::Conflict
    }
}

// ── Command entry point ──────────────────────────────────────────────────────

/// Run `staticprep doctor`.
///
/// # Errors
///
/// Returns an error if configuration is invalid or any fatal check fails.
pub async fn run(args: &DoctorArgs, ctx: &OutputContext, json: bool) -> Result<()> {
    let cfg = args.config.resolve()?;
    let checks = checks(&cfg, &RealFs, &TokioCommandRunner::default()).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        render(&cfg, &checks, ctx);
    }

    anyhow::ensure!(checks.healthy(), "preflight checks failed");
    Ok(())
}

fn render(cfg: &PrepConfig, checks: &PreflightChecks, ctx: &OutputContext) {
    ctx.header("Preflight");

    if checks.interpreter.available {
        let version = checks.interpreter.version.as_deref().unwrap_or("unknown version");
        ctx.success(&format!("interpreter '{}' ({version})", cfg.interpreter));
    } else {
        ctx.error(&format!("interpreter '{}' not available", cfg.interpreter));
    }

    if checks.manage_script_found {
        ctx.success(&format!("manage script {}", cfg.manage_script));
    } else {
        ctx.error(&format!("manage script {} not found", cfg.manage_script));
    }

    match checks.static_root {
        StaticRootState::Missing => {
            ctx.info(&format!("static root {} absent (will be created)", cfg.static_dir));
        }
        StaticRootState::Directory => {
            ctx.success(&format!("static root {}", cfg.static_dir));
        }
        StaticRootState::Conflict => {
            ctx.error(&format!(
                "static root {} is blocked by a non-directory entry",
                cfg.static_dir
            ));
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
