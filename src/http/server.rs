//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap the assembled router with the middleware stack
//! - Bind to a listener and serve until the shutdown future resolves
//!
//! # Design Decisions
//! - The server takes a finished router; tree assembly happens before
//!   serving, never during
//! - Shutdown is an arbitrary future, so callers pick their own signal
//!   (ctrl-c, a channel, a test hook)

use std::future::Future;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::request::RequestIdLayer;

/// HTTP server for an assembled route tree.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Wrap `router` with the middleware stack described by `config`.
    pub fn new(config: &ServerConfig, router: Router) -> Self {
        let router = router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
