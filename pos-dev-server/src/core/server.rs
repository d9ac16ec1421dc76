//! Server Implementation

use tokio::net::TcpListener;

use crate::api::build_router;
use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with a catalog loaded from the seed menu
    pub fn new(config: Config) -> Self {
        let state = ServerState::initialize(&config);
        Self { config, state }
    }

    /// Bind the configured port and serve until Ctrl-C
    pub async fn run(&self) -> anyhow::Result<()> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Menu API listening on http://{}", addr);
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        let app = build_router(self.state.clone());
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
