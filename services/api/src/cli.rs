use crate::infra::PropertyFields;
use crate::report::{run_comparison, run_matrix, run_rental, CompareArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use immo_rechner::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Immo Rechner",
    about = "Estimate rental values and compare selling against renting out a property",
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
    /// Estimate the achievable rent for a property
    Rental(PropertyFields),
    /// Compare selling today against keeping and renting out
    Compare(CompareArgs),
    /// Print the active pricing matrix as JSON
    Matrix,
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
        Command::Rental(args) => run_rental(args),
        Command::Compare(args) => run_comparison(args),
        Command::Matrix => run_matrix(),
    }
}
