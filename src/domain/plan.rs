//! Provisioning plan — the ordered step list built from configuration.
//!
//! Pure data, no I/O. The runner in `crate::runner` executes a [`Plan`];
//! `staticprep plan` renders one without executing anything.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::config::{NON_INTERACTIVE_FLAG, PrepConfig};

/// One fallible, ordered unit of provisioning work.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Short human-readable label shown in progress output.
    pub label: String,
    /// What the step actually does.
    pub kind: StepKind,
    /// Disabled steps are reported as skipped and never executed.
    pub enabled: bool,
}

/// The action a step performs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    /// Create a directory (and parents) if absent. Idempotent.
    EnsureDir { path: PathBuf },
    /// Run a management command through the configured interpreter.
    Manage {
        subcommand: String,
        args: Vec<String>,
    },
}

/// A full execution plan: interpreter context plus ordered steps.
///
/// Built fresh on every invocation; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Interpreter that runs the manage script.
    pub interpreter: String,
    /// Path to the framework's management entry point.
    pub manage_script: String,
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

impl Plan {
    /// Build the fixed step sequence from configuration.
    ///
    /// Order is part of the contract: the static root must exist before
    /// `collectstatic` writes into it, and `migrate` (when enabled) runs
    /// last. The non-interactive flag is appended to `collectstatic` args
    /// if the configuration omitted it, so no config can reintroduce a
    /// prompt into an unattended run.
    #[must_use]
    pub fn from_config(cfg: &PrepConfig, with_migrate: bool) -> Self {
        let mut collect_args = cfg.collectstatic.args.clone();
        if !collect_args.iter().any(|a| a == NON_INTERACTIVE_FLAG) {
            collect_args.push(NON_INTERACTIVE_FLAG.to_string());
        }

        let steps = vec![
            Step {
                label: format!("create static root {}", cfg.static_dir),
                kind: StepKind::EnsureDir {
                    path: PathBuf::from(&cfg.static_dir),
                },
                enabled: true,
            },
            Step {
                label: "collect static assets".to_string(),
                kind: StepKind::Manage {
                    subcommand: "collectstatic".to_string(),
                    args: collect_args,
                },
                enabled: true,
            },
            Step {
                label: "apply database migrations".to_string(),
                kind: StepKind::Manage {
                    subcommand: "migrate".to_string(),
                    args: cfg.migrate.args.clone(),
                },
                enabled: cfg.migrate.enabled || with_migrate,
            },
        ];

        Self {
            interpreter: cfg.interpreter.clone(),
            manage_script: cfg.manage_script.clone(),
            steps,
        }
    }

    /// Command line for a manage step: `interpreter manage.py sub args…`.
    ///
    /// Returns `None` for non-command steps.
    #[must_use]
    pub fn command_line(&self, step: &Step) -> Option<(String, Vec<String>)> {
        match &step.kind {
            StepKind::EnsureDir { .. } => None,
            StepKind::Manage { subcommand, args } => {
                let mut argv = vec![self.manage_script.clone(), subcommand.clone()];
                argv.extend(args.iter().cloned());
                Some((self.interpreter.clone(), argv))
            }
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
