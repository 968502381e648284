use crate::demo::{run_demo, run_pipeline_report, DemoArgs, PipelineReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rekrut::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment Pipeline Service",
    about = "Run and demonstrate the recruitment pipeline service from the command line",
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
    /// Inspect the stage pipeline evaluator without a running service
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommand,
    },
    /// Run an end-to-end CLI demo covering intake, review, and the roster
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PipelineCommand {
    /// Derive the progress display for one set of stage statuses
    Report(PipelineReportArgs),
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
        Command::Pipeline {
            command: PipelineCommand::Report(args),
        } => run_pipeline_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
