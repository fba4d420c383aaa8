//! Middleware composition.

use std::sync::Arc;

use crate::http::handler::Handler;

/// A handler-to-handler transformation.
pub type Middleware = Arc<dyn Fn(Handler) -> Handler + Send + Sync>;

/// Wrap a closure as a [`Middleware`].
pub fn middleware<F>(f: F) -> Middleware
where
    F: Fn(Handler) -> Handler + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap `handler` in `middlewares`.
///
/// The last middleware listed is the outermost: for `[mw1, mw2]` a request
/// runs mw2's pre-logic, then mw1's, then the handler, then mw1's
/// post-logic, then mw2's.
pub fn compose<I>(handler: Handler, middlewares: I) -> Handler
where
    I: IntoIterator<Item = Middleware>,
{
    middlewares
        .into_iter()
        .fold(handler, |inner, mw| mw(inner))
}
