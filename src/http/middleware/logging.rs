//! Request logging middleware.

use axum::{body::Body, http::Request};
use futures_util::FutureExt;
use std::sync::Arc;
use std::time::Instant;

use crate::http::handler::Handler;
use crate::http::middleware::compose::{middleware, Middleware};
use crate::routing::params::RouteVariablesExt;

/// Log method, path, bound variable count, status and latency for each request.
pub fn log_requests() -> Middleware {
    middleware(|next: Handler| {
        Arc::new(move |req: Request<Body>| {
            let next = next.clone();
            let method = req.method().clone();
            let path = req.uri().path().to_string();
            let variables = req.route_params().map_or(0, |p| p.len());
            async move {
                let start = Instant::now();
                let response = next(req).await;
                tracing::info!(
                    method = %method,
                    path = %path,
                    variables,
                    status = response.status().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Request handled"
                );
                response
            }
            .boxed()
        })
    })
}
