//! `staticprep plan` — render the ordered steps without executing anything.

use anyhow::Result;
use clap::Args;

use crate::commands::ConfigArgs;
use crate::domain::plan::{Plan, StepKind};
use crate::output::OutputContext;

/// Arguments for the plan command.
#[derive(Args, Default)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Show the plan as it would run with the migration step enabled
    #[arg(long)]
    pub with_migrate: bool,
}

/// Run `staticprep plan`.
///
/// # Errors
///
/// Returns an error if configuration is invalid.
pub fn run(args: &PlanArgs, ctx: &OutputContext, json: bool) -> Result<()> {
    let cfg = args.config.resolve()?;
    let plan = Plan::from_config(&cfg, args.with_migrate);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    ctx.header("Provisioning plan");
    for (i, step) in plan.steps.iter().enumerate() {
        let n = i + 1;
        if !step.enabled {
            ctx.kv(&format!("{n}."), &format!("{} (disabled)", step.label));
            continue;
        }
        ctx.info(&format!("{n}. {}", step.label));
        match &step.kind {
            StepKind::EnsureDir { path } => {
                ctx.kv("   mkdir -p", &path.display().to_string());
            }
            StepKind::Manage { .. } => {
                if let Some((program, argv)) = plan.command_line(step) {
                    ctx.kv("   exec", &format!("{program} {}", argv.join(" ")));
                }
            }
        }
    }
    Ok(())
}
