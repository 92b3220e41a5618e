mod config;
mod error;

use clap::Parser;
use config::{Cli, Command, ServeArgs};
use error::ServeError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => match serve(args).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!(error = %err, "serve failed");
                ExitCode::FAILURE
            }
        },
        Command::Openapi => {
            println!("{}", pb_serve::openapi::generate_spec());
            ExitCode::SUCCESS
        }
    }
}

async fn serve(args: ServeArgs) -> Result<(), ServeError> {
    std::fs::create_dir_all(&args.data_dir).map_err(|source| ServeError::DataDir {
        path: args.data_dir.clone(),
        source,
    })?;
    let db_path = args.db_path();
    let state = pb_serve::AppState::open(&db_path)?;
    tracing::info!(db = %db_path.display(), "postback store ready");
    pb_serve::serve(state, args.addr()).await?;
    Ok(())
}
