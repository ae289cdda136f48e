//! HTTP API: routing, request validation, aggregation and server lifecycle.

mod aggregate;
mod encode;
mod error;
mod handlers;
mod query;
pub mod routes;
mod server;
mod state;


use std::future::Future;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

pub use encode::encode;
pub use error::ApiError;
pub use handlers::{LinkResponse, ProjectResponse, TagResponse};
pub use query::{LIMIT, OFFSET, QueryParam, RawQuery, page_from_query, parse_scalar};
pub use server::{Server, ServerError, ServerState};
pub use state::AppState;

/// Default listen address, Go-style (all interfaces, port 3000).
pub const DEFAULT_ADDR: &str = ":3000";

/// Default budget for draining in-flight requests on shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Invalid listen address '{addr}': {message}")]
    #[diagnostic(
        code(project_catalog::config::invalid_addr),
        help("Use host:port, or :port to listen on all interfaces")
    )]
    InvalidAddr { addr: String, message: String },
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to bind to
    pub addr: SocketAddr,
    /// How long shutdown waits for in-flight requests
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl Config {
    /// Build a config from an address string such as `:3000`,
    /// `127.0.0.1:8080` or `localhost:3000`.
    pub fn from_addr(addr: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            addr: parse_addr(addr)?,
            ..Self::default()
        })
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

/// Parse a listen address. A leading `:` means all interfaces.
pub fn parse_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidAddr {
        addr: addr.to_string(),
        message,
    };

    let candidate = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };

    if let Ok(parsed) = candidate.parse::<SocketAddr>() {
        return Ok(parsed);
    }

    candidate
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses resolved".to_string()))
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Cancel `token` once `signal` resolves.
///
/// A signal that cannot be installed also cancels the token, and the error is
/// returned so the caller can exit non-zero after the drain.
pub async fn cancel_on_signal<F>(signal: F, token: CancellationToken) -> Result<(), ServerError>
where
    F: Future<Output = std::io::Result<()>>,
{
    let result = signal.await;
    token.cancel();

    match result {
        Ok(()) => {
            info!("Interrupt received");
            Ok(())
        }
        Err(e) => {
            error!("Failed to listen for interrupt, shutting down: {}", e);
            Err(ServerError::Signal(e))
        }
    }
}

/// Run the API server until `shutdown` is cancelled, then drain.
///
/// Returns early with the serve error if the listener fails while running.
pub async fn run<D: Database + 'static>(
    config: Config,
    db: D,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let mut server = Server::new(config, db);
    let addr = server.start().await?;
    info!("API server listening on http://{}", addr);

    tokio::select! {
        _ = shutdown.cancelled() => info!("Shutdown signal received"),
        _ = server.failed() => info!("Server stopped unexpectedly"),
    }

    server.shutdown().await
}
