//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum app: health endpoint plus a fallback into the route table
//! - Wire up layers (request ID, timeout, tracing)
//! - Serve on a listener until shutdown is signalled

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::response;
use crate::routing::Router;

/// HTTP server exposing a [`Router`].
pub struct HttpServer {
    app: axum::Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server for `router`. Routes may still be registered on the
    /// router afterwards; they are visible to the next request.
    pub fn new(config: ServerConfig, router: Arc<Router>) -> Self {
        let app = Self::build_app(&config, router);
        Self { app, config }
    }

    /// Build the axum app with all middleware layers.
    #[allow(deprecated)]
    pub fn build_app(config: &ServerConfig, router: Arc<Router>) -> axum::Router {
        axum::Router::new()
            .route(&config.routing.health_path, any(health_handler))
            .fallback(dispatch_handler)
            .with_state(router)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A clone of the app, for in-process testing.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    /// Serve connections on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            health_path = %self.config.routing.health_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn health_handler() -> Response {
    response::health()
}

async fn dispatch_handler(State(router): State<Arc<Router>>, request: Request<Body>) -> Response {
    router.dispatch(request).await
}
