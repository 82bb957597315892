//! axum integration for the identity repository exception handler
//!
//! Application handlers return `Result<_, ApiFault>` and read bodies with
//! [`ApiJson`]; [`Server`] wires the exception middleware around them.

mod extract;
mod fault;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use idrepo_config::Config;
use idrepo_exception::ExceptionHandler;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use extract::{ApiJson, rejection_to_fault};
pub use fault::{ApiFault, exception_middleware, translate};

/// Assembled server with application routes and fault translation
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server around the application's routes
    #[must_use]
    pub fn new(config: &Config, routes: Router) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8090)));

        let handler = Arc::new(ExceptionHandler::new(&config.response));

        let mut app = routes;

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(|| async { "ok" }));
        }

        // Only applies to routes registered so far
        app = app.method_not_allowed_fallback(fault::method_not_allowed);

        // Panics become faults before translation sees the response
        app = app.layer(CatchPanicLayer::custom(fault::panic_response));

        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let handler = Arc::clone(&handler);
            async move { exception_middleware(handler, req, next).await }
        }));

        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.listen_address).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve requests on an already bound listener
    ///
    /// # Errors
    ///
    /// Returns an error if reading the local address or serving fails
    pub async fn serve_on(self, listener: TcpListener, shutdown: CancellationToken) -> anyhow::Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
