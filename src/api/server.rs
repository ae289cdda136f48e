//! HTTP server lifecycle.
//!
//! ```text
//! Created --start--> Running --shutdown--> ShuttingDown --drained--> Stopped
//!    |                  |                        |
//!    +----bind error----+----listener error------+----timeout----> Errored
//! ```

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::{AppState, Config, routes};
use crate::db::Database;

/// Lifecycle state of a [`Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Created,
    Running,
    ShuttingDown,
    Stopped,
    Errored,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerState::Created => "created",
            ServerState::Running => "running",
            ServerState::ShuttingDown => "shutting down",
            ServerState::Stopped => "stopped",
            ServerState::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Lifecycle failures. All of these are fatal to the process.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(project_catalog::server::bind),
        help("Is another process already listening on this address?")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// `axum::serve` retries accept errors itself, so this is only reached if
    /// the serve future returns an error outright.
    #[error("Server failed while serving: {0}")]
    #[diagnostic(code(project_catalog::server::serve))]
    Serve(#[source] std::io::Error),

    #[error("Failed to listen for shutdown signal: {0}")]
    #[diagnostic(code(project_catalog::server::signal))]
    Signal(#[source] std::io::Error),

    #[error("Server task aborted: {message}")]
    #[diagnostic(code(project_catalog::server::task))]
    Task { message: String },

    #[error("Server shutdown failed: in-flight requests did not finish within {timeout:?}")]
    #[diagnostic(code(project_catalog::server::shutdown_timeout))]
    ShutdownTimeout { timeout: Duration },

    #[error("Cannot {action} a server that is {state}")]
    #[diagnostic(code(project_catalog::server::invalid_state))]
    InvalidState {
        action: &'static str,
        state: ServerState,
    },
}

/// Owns the listener task and drives its lifecycle.
pub struct Server<D: Database + 'static> {
    config: Config,
    state: AppState<D>,
    status: Arc<watch::Sender<ServerState>>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<Result<(), ServerError>>>,
}

impl<D: Database + 'static> Server<D> {
    pub fn new(config: Config, db: D) -> Self {
        let (status, _) = watch::channel(ServerState::Created);
        Self {
            config,
            state: AppState::new(db),
            status: Arc::new(status),
            shutdown: CancellationToken::new(),
            task: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServerState {
        *self.status.borrow()
    }

    /// Watch lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.status.subscribe()
    }

    /// Resolves once the server has entered `Errored`.
    ///
    /// With axum 0.8 the accept loop does not fail on its own, so in practice
    /// this only fires after a failed shutdown.
    pub async fn failed(&self) {
        let mut rx = self.status.subscribe();
        loop {
            let errored = *rx.borrow_and_update() == ServerState::Errored;
            if errored || rx.changed().await.is_err() {
                return;
            }
        }
    }

    fn transition(&self, next: ServerState) {
        let prev = self.status.send_replace(next);
        info!(from = %prev, to = %next, "Server state changed");
    }

    /// Bind the configured address and spawn the accept loop.
    ///
    /// Returns the bound address, which differs from the configured one when
    /// port 0 was requested.
    pub async fn start(&mut self) -> Result<SocketAddr, ServerError> {
        let current = self.state();
        if current != ServerState::Created {
            return Err(ServerError::InvalidState {
                action: "start",
                state: current,
            });
        }

        let listener = TcpListener::bind(self.config.addr).await.map_err(|source| {
            self.transition(ServerState::Errored);
            ServerError::Bind {
                addr: self.config.addr,
                source,
            }
        })?;
        let local_addr = listener.local_addr().map_err(|source| {
            self.transition(ServerState::Errored);
            ServerError::Bind {
                addr: self.config.addr,
                source,
            }
        })?;

        let app = routes::create_router(self.state.clone()).layer(TraceLayer::new_for_http());
        let token = self.shutdown.clone();
        let status = Arc::clone(&self.status);

        self.task = Some(tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(token.cancelled_owned())
                .await;

            result.map_err(|e| {
                error!("Listener failed: {}", e);
                status.send_replace(ServerState::Errored);
                ServerError::Serve(e)
            })
        }));

        self.transition(ServerState::Running);
        Ok(local_addr)
    }

    /// Stop accepting connections and wait up to the configured timeout for
    /// in-flight requests to finish.
    ///
    /// A server that already failed reports its original error.
    pub async fn shutdown(&mut self) -> Result<(), ServerError> {
        let Some(mut task) = self.task.take() else {
            return Err(ServerError::InvalidState {
                action: "shut down",
                state: self.state(),
            });
        };

        if self.state() == ServerState::Running {
            self.transition(ServerState::ShuttingDown);
        }
        let timeout = self.config.shutdown_timeout;
        info!(?timeout, "Draining in-flight requests");
        self.shutdown.cancel();

        let outcome = match tokio::time::timeout(timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ServerError::Task {
                message: join_error.to_string(),
            }),
            Err(_) => {
                task.abort();
                Err(ServerError::ShutdownTimeout { timeout })
            }
        };

        match outcome {
            Ok(()) => {
                self.transition(ServerState::Stopped);
                info!("Server shutdown succeeded");
                Ok(())
            }
            Err(e) => {
                self.transition(ServerState::Errored);
                error!("Server shutdown failed: {}", e);
                Err(e)
            }
        }
    }
}
