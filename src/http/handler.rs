//! Handler type shared by the route table, the method gate and middleware.
//!
//! A handler takes ownership of the request and resolves to a response.
//! Handlers are reference counted so one registration can be wrapped by
//! several layers and served from many tasks at once.

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use futures_util::{future::BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;

/// A type-erased request handler.
pub type Handler = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// Adapt an async function into a [`Handler`].
///
/// ```ignore
/// async fn show_user(req: Request<Body>) -> impl IntoResponse {
///     req.route_var("id").unwrap_or_default().to_string()
/// }
/// router.register("/users/{id}", handler(show_user), &["GET"])?;
/// ```
pub fn handler<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    Arc::new(move |req: Request<Body>| {
        let fut = f(req);
        async move { fut.await.into_response() }.boxed()
    })
}
