//! `staticprep run` — execute the provisioning plan, failing fast.

use anyhow::Result;
use clap::Args;

use crate::command_runner::TokioCommandRunner;
use crate::commands::ConfigArgs;
use crate::domain::plan::Plan;
use crate::infra::fs::RealFs;
use crate::output::OutputContext;
use crate::runner;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Also run the gated database migration step
    #[arg(long)]
    pub with_migrate: bool,
}

/// Run `staticprep run`.
///
/// # Errors
///
/// Returns an error if configuration is invalid or any step fails; a failing
/// external command's exit status is carried in the error for `main`.
pub async fn run(args: &RunArgs, ctx: &OutputContext, json: bool) -> Result<()> {
    let cfg = args.config.resolve()?;
    let plan = Plan::from_config(&cfg, args.with_migrate);

    let report = runner::execute(&plan, &RealFs, &TokioCommandRunner::default(), ctx).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ctx.success("provisioning complete");
    }
    Ok(())
}
