//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Fail-fast provisioning runner for web app deploys
#[derive(Parser)]
#[command(
    name = "staticprep",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute the provisioning steps in order, stopping at the first failure
    Run(commands::run::RunArgs),

    /// Show the ordered steps without executing anything
    Plan(commands::plan::PlanArgs),

    /// Check that a run could succeed (interpreter, manage script, static root)
    Doctor(commands::doctor::DoctorArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails; `main` maps it to the process
    /// exit code.
    pub async fn run(self) -> Result<()> {
        let Cli { no_color, quiet, json, command } = self;
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Run(args) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet || json);
                commands::run::run(&args, &ctx, json).await
            }
            Command::Plan(args) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                commands::plan::run(&args, &ctx, json)
            }
            Command::Doctor(args) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                commands::doctor::run(&args, &ctx, json).await
            }
        }
    }
}
