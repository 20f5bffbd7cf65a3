mod cli;
mod infra;
mod report;
mod routes;
mod server;

use immo_rechner::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
