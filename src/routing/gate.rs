//! Method gate.
//!
//! # Responsibilities
//! - Validate declared method names at registration
//! - Wrap a handler so only declared methods reach it
//!
//! # Design Decisions
//! - Only GET, POST, PUT and DELETE may be declared (case-sensitive)
//! - An empty method list is accepted and rejects every request
//! - Rejections are answered per `MethodMismatch` (404 by default)

use axum::{body::Body, http::Method, http::Request};
use futures_util::FutureExt;
use std::sync::Arc;

use crate::config::MethodMismatch;
use crate::error::RouteError;
use crate::http::handler::Handler;
use crate::http::response;
use crate::observability::metrics;

/// Methods a route may declare.
pub static ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// Metric label for a request method; anything outside the allowed set is `"other"`.
fn method_label(method: &Method) -> &'static str {
    ALLOWED_METHODS
        .iter()
        .find(|m| *m == method)
        .map(Method::as_str)
        .unwrap_or("other")
}

/// Validate method names for `path`, failing on the first unsupported one.
pub fn parse_methods<S: AsRef<str>>(path: &str, methods: &[S]) -> Result<Vec<Method>, RouteError> {
    let mut parsed = Vec::with_capacity(methods.len());
    for name in methods {
        let name = name.as_ref();
        let method = ALLOWED_METHODS
            .iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| RouteError::InvalidMethod {
                method: name.to_string(),
                path: path.to_string(),
            })?;
        if !parsed.contains(method) {
            parsed.push(method.clone());
        }
    }
    Ok(parsed)
}

/// Wrap `next` so requests using any other method are rejected.
pub fn gate_method(next: Handler, methods: Vec<Method>, policy: MethodMismatch) -> Handler {
    let methods: Arc<[Method]> = methods.into();
    Arc::new(move |req: Request<Body>| {
        if methods.contains(req.method()) {
            return next(req);
        }

        tracing::warn!(
            method = %req.method(),
            path = %req.uri().path(),
            "Method not declared for route"
        );
        metrics::record_method_rejection(method_label(req.method()));
        let response = response::method_rejected(policy, &methods);
        async move { response }.boxed()
    })
}
