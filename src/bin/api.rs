//! Project catalog API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::time::Duration;

use clap::Parser;
use miette::Diagnostic;
use project_catalog::api::{self, Config, ConfigError, ServerError};
use project_catalog::db::{Database, DbConfig, DbError, SqliteDatabase};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(project_catalog::binary::database))]
    Database(#[from] DbError),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(project_catalog::binary::config))]
    Config(#[from] ConfigError),

    #[error("API server error: {0}")]
    #[diagnostic(code(project_catalog::binary::api))]
    Api(#[from] ServerError),
}

#[derive(Parser)]
#[command(name = "project-catalog")]
#[command(author, version, about = "Project catalog API server", long_about = None)]
struct Cli {
    /// Address to listen on (host:port, or :port for all interfaces)
    #[arg(long, default_value = api::DEFAULT_ADDR)]
    addr: String,

    /// Seconds to wait for in-flight requests on shutdown
    #[arg(long, default_value_t = api::DEFAULT_SHUTDOWN_TIMEOUT.as_secs())]
    shutdown_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    api::init_tracing();

    let cli = Cli::parse();
    let config = Config::from_addr(&cli.addr)?
        .with_shutdown_timeout(Duration::from_secs(cli.shutdown_timeout));

    // Create the concrete database implementation
    let db_config = DbConfig::from_env();
    let db = SqliteDatabase::from_config(&db_config).await?;
    db.migrate().await?;
    info!("Database migrations complete");

    let shutdown = CancellationToken::new();
    let signal = tokio::spawn(api::cancel_on_signal(
        tokio::signal::ctrl_c(),
        shutdown.clone(),
    ));

    let result = api::run(config, db.clone(), shutdown).await;
    db.close().await;
    result?;

    // Only the signal task cancels the token; collect its outcome.
    signal.await.map_err(|e| ServerError::Task {
        message: e.to_string(),
    })??;

    Ok(())
}
