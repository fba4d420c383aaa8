//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use pathgate::{handler, Handler, RouteVariablesExt};

/// Build a request with an empty body.
#[allow(dead_code)]
pub fn request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body into a string.
#[allow(dead_code)]
pub async fn body_string(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Handler that echoes the named variables as `name=value` pairs joined by `&`.
#[allow(dead_code)]
pub fn echo_vars(names: &'static [&'static str]) -> Handler {
    handler(move |req: Request<Body>| async move {
        names
            .iter()
            .map(|n| format!("{}={}", n, req.route_var(n).unwrap_or("")))
            .collect::<Vec<_>>()
            .join("&")
    })
}

/// Handler returning a fixed body.
#[allow(dead_code)]
pub fn fixed(body: &'static str) -> Handler {
    handler(move |_req| async move { body })
}
