use crate::report::{run_report, run_snapshot, ReportArgs, SnapshotArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use enade_insights::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ENADE Insights",
    about = "Serve and precompute ENADE questionnaire comparisons from the command line",
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
    /// Rebuild the static JSON snapshot from the questionnaire export
    Snapshot(SnapshotArgs),
    /// Print a comparison report for the benchmark institution
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the questionnaire CSV export path
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Override the snapshot JSON path
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Rebuild and write the snapshot before serving instead of reading it
    #[arg(long)]
    pub(crate) rebuild_snapshot: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Snapshot(args) => run_snapshot(args),
        Command::Report(args) => run_report(args),
    }
}
