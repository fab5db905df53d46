//! Listener setup and serving
//!
//! `host` may be an IP literal or a resolvable name such as `localhost`.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;
use crate::routes;

/// The calculator API, ready to bind
pub struct Server {
    config: Arc<ServerConfig>,
    router: Router,
}

impl Server {
    /// Build the router for `config`
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let router = routes::build_router(config.clone());

        Self { config, router }
    }

    /// The configuration the router was built from
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the configured `host:port`
    pub async fn bind(&self) -> io::Result<TcpListener> {
        TcpListener::bind((self.config.host.as_str(), self.config.port)).await
    }

    /// Bind, then serve until ctrl-c
    pub async fn run(self) -> io::Result<()> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until ctrl-c
    pub async fn serve(self, listener: TcpListener) -> io::Result<()> {
        tracing::info!(address = %listener.local_addr()?, "listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }

    /// Serve `config` on an ephemeral loopback port in a background task
    pub async fn spawn_local(config: ServerConfig) -> io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server = Self::new(config);
        let handle = tokio::spawn(async move {
            if let Err(err) = server.serve(listener).await {
                tracing::error!(error = %err, "server task failed");
            }
        });

        Ok((addr, handle))
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
