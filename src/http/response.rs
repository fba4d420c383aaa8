//! Fixed JSON responses produced by the routing layer.
//!
//! # Responsibilities
//! - Not-found and method-rejection payloads
//! - Liveness payload for the health endpoint
//! - Map dispatch errors to HTTP status codes
//!
//! # Design Decisions
//! - Payload bytes are fixed strings so clients can match them exactly
//! - Method rejection shares 404 with not-found unless configured otherwise

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::MethodMismatch;
use crate::error::RouteError;

/// Body for paths no route matches.
pub const NOT_FOUND_BODY: &str = r#"{"msg": "route not found"}"#;

/// Body for requests whose method the route does not declare.
pub const METHOD_REJECTED_BODY: &str = r#"{"error": "The method for this route doesnt exist"}"#;

/// Body for the liveness endpoint.
pub const HEALTH_BODY: &str = r#"{"alive": "Server running"}"#;

fn json(status: StatusCode, body: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// 404 for an unknown route.
pub fn not_found() -> Response {
    json(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Rejection for an undeclared method.
pub fn method_rejected(policy: MethodMismatch, allowed: &[Method]) -> Response {
    match policy {
        MethodMismatch::NotFound => json(StatusCode::NOT_FOUND, METHOD_REJECTED_BODY),
        MethodMismatch::MethodNotAllowed => {
            let mut response = json(StatusCode::METHOD_NOT_ALLOWED, METHOD_REJECTED_BODY);
            let allow = allowed
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
            response
        }
    }
}

/// 200 liveness response.
pub fn health() -> Response {
    json(StatusCode::OK, HEALTH_BODY)
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::NotFound(_) => not_found(),
            RouteError::MethodRejected { .. } => method_rejected(MethodMismatch::NotFound, &[]),
            other => {
                let body = serde_json::json!({ "error": other.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}
