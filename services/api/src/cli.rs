use crate::demo::{run_demo, run_plan, DemoArgs, PlanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fitwell::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FitWell",
    about = "Score members, generate wellness plans, and run the FitWell API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one intake and print the generated plan
    Plan(PlanArgs),
    /// Walk through repeated plan generation for a sample member
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Plan(args) => run_plan(args),
        Command::Demo(args) => run_demo(args),
    }
}
